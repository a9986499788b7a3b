//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents. Two are built in (`midnight`, the default, and
//! `daylight`); custom themes load from a file with the same layout:
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! text = "#ffffff"
//! text_dim = "#a3a3a3"
//! accent = "#50c99e"
//! price = "#f5f5f5"
//! indicator_fg = "#ffffff"
//! indicator_bg = "#262626"
//! badge_bg = "#ef4444"
//! border = "#404040"
//! nav_fg = "#4b5563"
//! ```

use crate::domain::{ReelFeedError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Color scheme for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors of every rendered element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Primary text (username, title, captions).
    pub text: String,
    /// Secondary text (seller role, poster line, notification message).
    pub text_dim: String,
    /// Accent for the unread dot and scroll hint.
    pub accent: String,
    pub price: String,
    pub indicator_fg: String,
    pub indicator_bg: String,
    /// Notification count badge background.
    pub badge_bg: String,
    pub border: String,
    pub nav_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// ```
    /// use reelfeed::ui::Theme;
    ///
    /// assert_eq!(Theme::from_name("daylight").unwrap().name, "daylight");
    /// assert!(Theme::from_name("neon").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "midnight" => include_str!("../../themes/midnight.toml"),
            "daylight" => include_str!("../../themes/daylight.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ReelFeedError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ReelFeedError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| ReelFeedError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Parses `#rrggbb`, falling back to white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground escape sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The `midnight` theme.
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("midnight").expect("built-in midnight theme should always parse")
    }
}
