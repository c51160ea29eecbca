// SPDX-License-Identifier: MPL-2.0
//! Light, dark and system theme modes.

use crate::ui::design_tokens::palette;
use iced::{Color, Theme};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Returns true if the effective theme is dark.
    /// For System mode, detects the actual system theme.
    #[must_use]
    pub fn is_dark(self) -> bool {
        match self {
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
            // Detection errors fall back to dark.
            ThemeMode::System => !matches!(dark_light::detect(), Ok(dark_light::Mode::Light)),
        }
    }

    /// The Iced theme for this mode.
    #[must_use]
    pub fn theme(self) -> Theme {
        if self.is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Colors the upload screen paints itself with, on top of the Iced theme.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    pub pane_background: Color,
    pub pane_border: Color,
    pub text_secondary: Color,
    pub brand: Color,
    pub error: Color,
    pub warning: Color,
    pub online: Color,
}

impl ColorScheme {
    #[must_use]
    pub fn light() -> Self {
        Self {
            pane_background: palette::GRAY_100,
            pane_border: palette::GRAY_200,
            text_secondary: palette::GRAY_700,
            brand: palette::PRIMARY_500,
            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            online: palette::SUCCESS_500,
        }
    }

    #[must_use]
    pub fn dark() -> Self {
        Self {
            pane_background: palette::GRAY_800,
            pane_border: palette::GRAY_700,
            text_secondary: palette::GRAY_200,
            brand: palette::PRIMARY_400,
            error: palette::ERROR_500,
            warning: palette::WARNING_500,
            online: palette::SUCCESS_500,
        }
    }

    #[must_use]
    pub fn for_dark(is_dark: bool) -> Self {
        if is_dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_scheme_has_light_panes() {
        assert!(ColorScheme::light().pane_background.r > 0.9);
    }

    #[test]
    fn dark_scheme_has_dark_panes() {
        assert!(ColorScheme::dark().pane_background.r < 0.2);
    }

    #[test]
    fn explicit_modes_map_to_matching_iced_theme() {
        assert!(!ThemeMode::Light.is_dark());
        assert!(ThemeMode::Dark.is_dark());
        assert_eq!(ThemeMode::Light.theme(), Theme::Light);
        assert_eq!(ThemeMode::Dark.theme(), Theme::Dark);
        // Depends on the host; must not panic.
        let _ = ThemeMode::System.theme();
    }

    #[test]
    fn theme_mode_serializes_lowercase() {
        #[derive(Serialize)]
        struct Wrapper {
            mode: ThemeMode,
        }
        let out = toml::to_string(&Wrapper {
            mode: ThemeMode::Dark,
        })
        .expect("serialize");
        assert!(out.contains("mode = \"dark\""));
    }
}
