//! Theme identities and the color palettes attached to them.
//!
//! A [`Palette`] is the configured `{background, normal, special}` triple as
//! CSS color strings; a [`ResolvedPalette`] is the same triple parsed to RGBA
//! once up front, so no per-frame parsing happens outside of a crossfade.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::color::{blend, parse_color_or_default};

/// The two selectable themes.
///
/// The engine never inspects host styling state; the active theme is always
/// passed in explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// The opposite theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}', expected 'light' or 'dark'", other)),
        }
    }
}

/// Configured colors for one theme, as CSS color strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Full-viewport clear color
    pub background: String,
    /// Trail color for ordinary stars
    pub normal: String,
    /// Accent color for special stars (trails and glow)
    pub special: String,
}

impl Palette {
    /// Parse all three colors up front. Unparseable entries degrade to the
    /// black fallback rather than failing.
    pub fn resolve(&self) -> ResolvedPalette {
        ResolvedPalette {
            background: parse_color_or_default(&self.background),
            normal: parse_color_or_default(&self.normal),
            special: parse_color_or_default(&self.special),
        }
    }

    fn light_default() -> Self {
        Palette {
            background: "#ffffffff".to_string(),
            normal: "#000000ff".to_string(),
            special: "#00aeff".to_string(),
        }
    }

    fn dark_default() -> Self {
        Palette {
            background: "#000000ff".to_string(),
            normal: "#ffffffff".to_string(),
            special: "#00aeff".to_string(),
        }
    }
}

/// The light/dark palette pair from configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemePalettes {
    #[serde(default = "Palette::light_default")]
    pub light: Palette,
    #[serde(default = "Palette::dark_default")]
    pub dark: Palette,
}

impl Default for ThemePalettes {
    fn default() -> Self {
        ThemePalettes {
            light: Palette::light_default(),
            dark: Palette::dark_default(),
        }
    }
}

/// A palette with all colors parsed to RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPalette {
    pub background: Rgba<u8>,
    pub normal: Rgba<u8>,
    pub special: Rgba<u8>,
}

impl ResolvedPalette {
    /// Per-channel linear blend of all three color roles.
    pub fn blend(&self, to: &ResolvedPalette, progress: f64) -> ResolvedPalette {
        ResolvedPalette {
            background: blend(self.background, to.background, progress),
            normal: blend(self.normal, to.normal, progress),
            special: blend(self.special, to.special, progress),
        }
    }
}
