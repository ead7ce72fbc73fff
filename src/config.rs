//! Configuration schema and loading for the starfield engine.
//!
//! All options have defaults matching the reference animation, so an empty
//! config (or none at all) produces the stock starfield. Configuration is
//! static for the process lifetime; there is no hot reload.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::ThemePalettes;

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// An inclusive min/max interval for randomized star attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// Pivot position as a fraction of the viewport.
///
/// Components may exceed 1.0; the reference animation keeps its pivot well
/// below the bottom edge (`y = 1.8`) so the stars sweep across the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PivotFraction {
    pub x: f64,
    pub y: f64,
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarfieldConfig {
    /// Number of stars in the field
    #[serde(default = "default_star_count")]
    pub star_count: usize,
    /// Radians added to the global angle per tick
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f64,
    /// Number of concentric rings stars are placed on
    #[serde(default = "default_orbital_rings")]
    pub orbital_rings: usize,
    /// Trail arc length in radians
    #[serde(default = "default_trail_length")]
    pub trail_length: Range,
    /// Stroke width for ordinary stars
    #[serde(default = "default_normal_thickness")]
    pub normal_thickness: Range,
    /// Stroke width for special stars
    #[serde(default = "default_special_thickness")]
    pub special_thickness: Range,
    /// Probability that a star is special (accent-colored)
    #[serde(default = "default_special_chance")]
    pub special_chance: f64,
    /// Paint a glow under each special star's head
    #[serde(default)]
    pub glow_enabled: bool,
    /// Glow radius as a multiple of star thickness
    #[serde(default = "default_glow_radius_multiplier")]
    pub glow_radius_multiplier: f64,
    /// Glow opacity at its center
    #[serde(default = "default_glow_opacity")]
    pub glow_opacity: f64,
    /// Orbit center as a fraction of viewport size
    #[serde(default = "default_pivot")]
    pub pivot: PivotFraction,
    /// Theme crossfade duration in milliseconds
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: f64,
    /// Seed for the star generator; a fixed default keeps runs reproducible
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seed: Option<u64>,
    /// Light and dark palettes
    #[serde(default)]
    pub palettes: ThemePalettes,
}

fn default_star_count() -> usize {
    600
}

fn default_rotation_speed() -> f64 {
    0.001
}

fn default_orbital_rings() -> usize {
    100
}

fn default_trail_length() -> Range {
    Range { min: 0.09, max: 0.11 }
}

fn default_normal_thickness() -> Range {
    Range { min: 0.5, max: 1.0 }
}

fn default_special_thickness() -> Range {
    Range { min: 1.0, max: 2.0 }
}

fn default_special_chance() -> f64 {
    0.04
}

fn default_glow_radius_multiplier() -> f64 {
    7.0
}

fn default_glow_opacity() -> f64 {
    0.3
}

fn default_pivot() -> PivotFraction {
    PivotFraction { x: 0.5, y: 1.8 }
}

fn default_transition_duration_ms() -> f64 {
    350.0
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        StarfieldConfig {
            star_count: default_star_count(),
            rotation_speed: default_rotation_speed(),
            orbital_rings: default_orbital_rings(),
            trail_length: default_trail_length(),
            normal_thickness: default_normal_thickness(),
            special_thickness: default_special_thickness(),
            special_chance: default_special_chance(),
            glow_enabled: false,
            glow_radius_multiplier: default_glow_radius_multiplier(),
            glow_opacity: default_glow_opacity(),
            pivot: default_pivot(),
            transition_duration_ms: default_transition_duration_ms(),
            seed: None,
            palettes: ThemePalettes::default(),
        }
    }
}

impl StarfieldConfig {
    /// Validate the configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.star_count == 0 {
            errors.push("star_count must be at least 1".to_string());
        }
        if self.orbital_rings == 0 {
            errors.push("orbital_rings must be at least 1".to_string());
        }
        if !self.rotation_speed.is_finite() {
            errors.push("rotation_speed must be finite".to_string());
        }
        for (name, range) in [
            ("trail_length", &self.trail_length),
            ("normal_thickness", &self.normal_thickness),
            ("special_thickness", &self.special_thickness),
        ] {
            if range.min < 0.0 {
                errors.push(format!("{}.min must not be negative", name));
            }
            if range.min > range.max {
                errors.push(format!("{}.min must not exceed {}.max", name, name));
            }
        }
        if !(0.0..=1.0).contains(&self.special_chance) {
            errors.push("special_chance must be within [0, 1]".to_string());
        }
        if self.glow_radius_multiplier < 0.0 {
            errors.push("glow_radius_multiplier must not be negative".to_string());
        }
        if !(0.0..=1.0).contains(&self.glow_opacity) {
            errors.push("glow_opacity must be within [0, 1]".to_string());
        }
        if self.transition_duration_ms < 0.0 {
            errors.push("transition_duration_ms must not be negative".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

/// Load and validate a TOML configuration file.
pub fn load_config(path: &Path) -> Result<StarfieldConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: StarfieldConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
