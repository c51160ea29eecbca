// SPDX-License-Identifier: MPL-2.0
//! User interface for the upload screen.
//!
//! - [`upload_view`] - the single screen: controls, banners, image panes
//! - [`widgets`] - custom Iced widgets (spinner)
//! - [`design_tokens`] - design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod design_tokens;
pub mod theming;
pub mod upload_view;
pub mod widgets;
