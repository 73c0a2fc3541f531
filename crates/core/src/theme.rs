//! Design templates, color schemes and their fixed theme colors.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase hex without `#`, as used by DrawingML `srgbClr`.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Visual template applied to a whole deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignTemplate {
    #[default]
    Modern,
    Dark,
    Minimal,
    Corporate,
}

impl DesignTemplate {
    /// All templates in display order.
    pub const ALL: [DesignTemplate; 4] = [
        DesignTemplate::Modern,
        DesignTemplate::Dark,
        DesignTemplate::Minimal,
        DesignTemplate::Corporate,
    ];

    /// The lowercase name used as lookup key.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Dark => "dark",
            Self::Minimal => "minimal",
            Self::Corporate => "corporate",
        }
    }

    /// Theme colors for this template.
    pub fn theme(&self) -> ThemeConfig {
        match self {
            Self::Modern => ThemeConfig {
                title_color: RgbColor::new(102, 126, 234),
                content_color: RgbColor::new(45, 55, 72),
                background_color: RgbColor::new(255, 255, 255),
            },
            Self::Dark => ThemeConfig {
                title_color: RgbColor::new(79, 172, 254),
                content_color: RgbColor::new(255, 255, 255),
                background_color: RgbColor::new(26, 26, 26),
            },
            Self::Minimal => ThemeConfig {
                title_color: RgbColor::new(40, 167, 69),
                content_color: RgbColor::new(33, 37, 41),
                background_color: RgbColor::new(248, 249, 250),
            },
            Self::Corporate => ThemeConfig {
                title_color: RgbColor::new(0, 86, 179),
                content_color: RgbColor::new(51, 51, 51),
                background_color: RgbColor::new(255, 255, 255),
            },
        }
    }
}

impl fmt::Display for DesignTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DesignTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidOption(format!("unknown design template '{}'", s)))
    }
}

/// Title, content and background colors of a rendered deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub title_color: RgbColor,
    pub content_color: RgbColor,
    pub background_color: RgbColor,
}

impl ThemeConfig {
    /// Look up a theme by template name, falling back to `modern`.
    pub fn by_name(name: &str) -> Self {
        name.parse::<DesignTemplate>()
            .unwrap_or_default()
            .theme()
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        DesignTemplate::Modern.theme()
    }
}

/// Accent palette used for slide previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorScheme {
    #[default]
    BluePurple,
    GreenBlue,
    OrangeRed,
    PurplePink,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 4] = [
        ColorScheme::BluePurple,
        ColorScheme::GreenBlue,
        ColorScheme::OrangeRed,
        ColorScheme::PurplePink,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::BluePurple => "blue-purple",
            Self::GreenBlue => "green-blue",
            Self::OrangeRed => "orange-red",
            Self::PurplePink => "purple-pink",
        }
    }

    /// Primary accent as `#rrggbb`.
    pub fn primary(&self) -> &'static str {
        match self {
            Self::BluePurple | Self::PurplePink => "#667eea",
            Self::GreenBlue => "#11998e",
            Self::OrangeRed => "#ff6b6b",
        }
    }

    /// Secondary accent as `#rrggbb`.
    pub fn secondary(&self) -> &'static str {
        match self {
            Self::BluePurple => "#764ba2",
            Self::GreenBlue => "#38ef7d",
            Self::OrangeRed => "#ffa726",
            Self::PurplePink => "#f093fb",
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidOption(format!("unknown color scheme '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_lookup_by_name() {
        let dark = ThemeConfig::by_name("dark");
        assert_eq!(dark.background_color, RgbColor::new(26, 26, 26));
        assert_eq!(dark.title_color, RgbColor::new(79, 172, 254));

        let corporate = ThemeConfig::by_name("Corporate");
        assert_eq!(corporate.title_color, RgbColor::new(0, 86, 179));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_modern() {
        assert_eq!(ThemeConfig::by_name("neon"), DesignTemplate::Modern.theme());
        assert_eq!(ThemeConfig::by_name(""), ThemeConfig::default());
    }

    #[test]
    fn test_rgb_hex() {
        assert_eq!(RgbColor::new(102, 126, 234).to_hex(), "667EEA");
        assert_eq!(RgbColor::new(0, 86, 179).to_hex(), "0056B3");
    }

    #[test]
    fn test_parse_template_and_scheme() {
        assert_eq!("minimal".parse::<DesignTemplate>().unwrap(), DesignTemplate::Minimal);
        assert!("gradient".parse::<DesignTemplate>().is_err());
        assert_eq!("orange-red".parse::<ColorScheme>().unwrap(), ColorScheme::OrangeRed);
        assert_eq!(ColorScheme::PurplePink.secondary(), "#f093fb");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ColorScheme::GreenBlue).unwrap();
        assert_eq!(json, "\"green-blue\"");
        let json = serde_json::to_string(&DesignTemplate::Corporate).unwrap();
        assert_eq!(json, "\"corporate\"");
    }
}
