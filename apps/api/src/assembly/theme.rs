//! Themes and brand palettes.
//!
//! Both are validated up front: a theme name outside the fixed set or a color
//! that is not a hex literal fails assembly before anything is generated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::assembly::AssemblyError;

// ────────────────────────────────────────────────────────────────────────────
// Colors
// ────────────────────────────────────────────────────────────────────────────

/// A CSS hex color, `#RGB` or `#RRGGBB`. Stored as written by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parses a hex color literal. Returns `None` for anything else.
    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix('#')?;
        let well_formed =
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit());
        well_formed.then(|| HexColor(raw.to_string()))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Theme
// ────────────────────────────────────────────────────────────────────────────

/// The fixed set of page color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    Light,
    Dark,
    Custom,
}

/// Background/foreground pair a theme resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeColors {
    pub background: &'static str,
    pub foreground: &'static str,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::Custom];

    pub fn colors(&self) -> ThemeColors {
        let (background, foreground) = match self {
            Theme::Light => ("#FFFFFF", "#000000"),
            Theme::Dark => ("#333333", "#FFFFFF"),
            Theme::Custom => ("#F0F0F0", "#000000"),
        };
        ThemeColors {
            background,
            foreground,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::Custom => "Custom",
        }
    }
}

impl FromStr for Theme {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AssemblyError::InvalidTheme(s.to_string()))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Brand palette
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_PRIMARY: &str = "#1a73e8";
pub const DEFAULT_SECONDARY: &str = "#ff7043";

/// Unvalidated palette as supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteInput {
    #[serde(default = "default_primary")]
    pub primary: String,
    #[serde(default = "default_secondary")]
    pub secondary: String,
}

fn default_primary() -> String {
    DEFAULT_PRIMARY.to_string()
}

fn default_secondary() -> String {
    DEFAULT_SECONDARY.to_string()
}

impl Default for PaletteInput {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            secondary: default_secondary(),
        }
    }
}

/// Validated brand colors: `primary` styles the page title, `secondary` every
/// section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandPalette {
    pub primary: HexColor,
    pub secondary: HexColor,
}

impl BrandPalette {
    pub fn parse(input: &PaletteInput) -> Result<Self, AssemblyError> {
        Ok(Self {
            primary: parse_color("primary", &input.primary)?,
            secondary: parse_color("secondary", &input.secondary)?,
        })
    }
}

fn parse_color(field: &'static str, raw: &str) -> Result<HexColor, AssemblyError> {
    HexColor::parse(raw).ok_or_else(|| AssemblyError::InvalidColor {
        field,
        value: raw.to_string(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_colors_are_exhaustive_and_fixed() {
        let resolved: Vec<(&str, &str)> = Theme::ALL
            .iter()
            .map(|t| {
                let c = t.colors();
                (c.background, c.foreground)
            })
            .collect();
        assert_eq!(
            resolved,
            vec![
                ("#FFFFFF", "#000000"),
                ("#333333", "#FFFFFF"),
                ("#F0F0F0", "#000000"),
            ]
        );
    }

    #[test]
    fn test_theme_resolution_is_deterministic() {
        for theme in Theme::ALL {
            assert_eq!(theme.colors(), theme.colors());
        }
    }

    #[test]
    fn test_theme_parse_is_case_insensitive() {
        assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
        assert_eq!(" DARK ".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!("Custom".parse::<Theme>().unwrap(), Theme::Custom);
    }

    #[test]
    fn test_theme_parse_rejects_unknown() {
        let err = "Solarized".parse::<Theme>().unwrap_err();
        assert!(matches!(err, AssemblyError::InvalidTheme(ref v) if v == "Solarized"));
    }

    #[test]
    fn test_hex_color_accepts_short_and_long_forms() {
        assert!(HexColor::parse("#fff").is_some());
        assert!(HexColor::parse("#1A73e8").is_some());
    }

    #[test]
    fn test_hex_color_rejects_malformed_values() {
        for bad in ["1a73e8", "#12345", "#ggg", "", "#", "red", "#1a73e80"] {
            assert!(HexColor::parse(bad).is_none(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_palette_reports_offending_field() {
        let input = PaletteInput {
            primary: DEFAULT_PRIMARY.to_string(),
            secondary: "orange".to_string(),
        };
        match BrandPalette::parse(&input) {
            Err(AssemblyError::InvalidColor { field, value }) => {
                assert_eq!(field, "secondary");
                assert_eq!(value, "orange");
            }
            other => panic!("expected InvalidColor, got {other:?}"),
        }
    }

    #[test]
    fn test_default_palette_is_valid() {
        let palette = BrandPalette::parse(&PaletteInput::default()).unwrap();
        assert_eq!(palette.primary.to_string(), DEFAULT_PRIMARY);
        assert_eq!(palette.secondary.to_string(), DEFAULT_SECONDARY);
    }
}
