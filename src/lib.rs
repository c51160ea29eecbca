// SPDX-License-Identifier: MPL-2.0
//! `iced_pixelate` is a desktop client for a face-pixelation service.
//!
//! Pick or drop an image, preview it, and submit it as a multipart upload with
//! an optional debug flag. The request is raced against a timeout and the
//! processed image, or a localized error, is shown next to the original.

pub mod app;
pub mod config;
pub mod error;
pub mod i18n;
pub mod ui;
pub mod upload;
