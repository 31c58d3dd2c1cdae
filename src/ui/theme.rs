//! Theme management and ANSI escape sequence generation.
//!
//! Supports built-in themes (Catppuccin variants) and custom themes loaded
//! from TOML files, plus helpers that turn hex colors into ANSI sequences.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! tab_active_fg = "#1e1e2e"
//! tab_active_bg = "#89b4fa"
//! tab_inactive_fg = "#a6adc8"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! success_fg = "#a6e3a1"
//! error_fg = "#f38ba8"
//! loading_fg = "#f9e2af"
//! modal_border = "#b4befe"
//! field_focus_fg = "#f5c2e7"
//! required_fg = "#f38ba8"
//! ```
//!
//! # Example
//!
//! ```rust
//! use patient_registry::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-latte").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.ends_with("\u{1b}[0m"));
//! assert_eq!(theme.name, "catppuccin-latte");
//! ```

use crate::domain::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const MOCHA: &str = include_str!("../../themes/catppuccin-mocha.toml");
const LATTE: &str = include_str!("../../themes/catppuccin-latte.toml");

/// Color scheme configuration for UI rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette for all UI elements.
    pub colors: ThemeColors,
}

/// Color definitions for all UI elements, as hex strings (e.g. `"#cdd6f4"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub tab_active_fg: String,
    pub tab_active_bg: String,
    pub tab_inactive_fg: String,

    /// Selected row colors.
    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    /// Footer, placeholders and secondary info.
    pub text_dim: String,

    /// Border and separator line color.
    pub border: String,

    pub search_bar_border: String,
    /// Search match highlight.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Banner colors.
    pub success_fg: String,
    pub error_fg: String,

    /// Loading indicator in the header.
    pub loading_fg: String,

    pub modal_border: String,
    /// Label of the focused form field.
    pub field_focus_fg: String,
    /// Required-field marker.
    pub required_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// # Parameters
    ///
    /// * `name` - `catppuccin-mocha` or `catppuccin-latte`
    ///
    /// # Returns
    ///
    /// `None` if the theme name is unknown.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => MOCHA,
            "catppuccin-latte" => LATTE,
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// Every color key must be present; see the module docs for the format.
    ///
    /// # Parameters
    ///
    /// * `path` - Path to the TOML file, already tilde-expanded
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Theme`] if the file cannot be read or its
    /// content is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| RegistryError::Theme(format!("Failed to read theme file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| RegistryError::Theme(format!("Failed to parse theme TOML: {e}")))
    }

    /// Converts a hex color to an RGB tuple. Malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground color escape sequence.
    ///
    /// # Parameters
    ///
    /// * `hex` - Color as `#rrggbb` (leading `#` optional)
    ///
    /// ```
    /// use patient_registry::ui::Theme;
    ///
    /// assert_eq!(Theme::fg("#a6e3a1"), "\u{1b}[38;2;166;227;161m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color escape sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Bold text.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Dimmed text, used for placeholders and hints.
    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling (colors, bold, dim, etc.).
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Returns the default theme (Catppuccin Mocha).
    ///
    /// # Panics
    ///
    /// Panics if the built-in theme fails to parse, which the tests rule out.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}
