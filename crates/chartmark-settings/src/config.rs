//! Configuration for chartmark
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats stored in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Interaction settings (hover and handle tolerances, handle size)
//! - Measurement overlay (label box metrics, up/down palettes)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{SettingsError, SettingsResult};

/// Pointer interaction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Hover band around a drawing, in pixels
    pub hover_tolerance: f64,
    /// Distance from a corner or endpoint that grabs it instead of the whole shape
    pub handle_tolerance: f64,
    /// Radius of the handle circles drawn on hovered drawings
    pub handle_radius: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            hover_tolerance: 4.0,
            handle_tolerance: 10.0,
            handle_radius: 3.0,
        }
    }
}

/// Floating label metrics for the measurement overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSettings {
    /// Width of the label hit box
    pub hit_width: f64,
    /// Height of the label hit box
    pub hit_height: f64,
    /// Distance from the measured box top to the label hit box top
    pub hit_offset: f64,
    pub padding: f64,
    pub line_height: f64,
    pub corner_radius: f64,
    /// Gap between the drawn label and the measured box
    pub gap: f64,
    pub font: String,
    /// Average glyph width used to estimate text extents
    pub glyph_width: f64,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            hit_width: 150.0,
            hit_height: 50.0,
            hit_offset: 65.0,
            padding: 8.0,
            line_height: 22.0,
            corner_radius: 4.0,
            gap: 10.0,
            font: "14px Arial Bold".to_string(),
            glyph_width: 8.0,
        }
    }
}

/// Fill and accent color for one direction of a measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub fill: String,
    pub text: String,
}

/// Measurement colors keyed by direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub up: Palette,
    pub down: Palette,
    /// Label text color drawn over the accent background
    pub label_text: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        Self {
            up: Palette {
                fill: "rgba(33, 150, 243, 0.2)".to_string(),
                text: "rgba(33, 150, 243, 1)".to_string(),
            },
            down: Palette {
                fill: "rgba(239, 83, 80, 0.2)".to_string(),
                text: "rgba(239, 83, 80, 1)".to_string(),
            },
            label_text: "#FFFFFF".to_string(),
        }
    }
}

impl PaletteSettings {
    /// Palette for a signed change; only a negative change is drawn as down.
    pub fn for_change(&self, pct: f64) -> &Palette {
        if pct < 0.0 {
            &self.down
        } else {
            &self.up
        }
    }
}

/// Measurement overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MeasureSettings {
    pub label: LabelSettings,
    pub palette: PaletteSettings,
}

/// Complete chartmark configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Interaction settings
    pub interaction: InteractionSettings,
    /// Measurement overlay settings
    pub measure: MeasureSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration file location, `<config dir>/chartmark/config.toml`.
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        path.push("chartmark");
        path.push("config.toml");
        path
    }

    /// Load a configuration file, choosing the format from its extension.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::info!(
                "No settings file at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    /// Validate and write the configuration, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::from_path(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        tracing::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Tolerances and label metrics must be positive and finite.
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = [
            ("interaction.hover_tolerance", self.interaction.hover_tolerance),
            ("interaction.handle_tolerance", self.interaction.handle_tolerance),
            ("interaction.handle_radius", self.interaction.handle_radius),
            ("measure.label.hit_width", self.measure.label.hit_width),
            ("measure.label.hit_height", self.measure.label.hit_height),
            ("measure.label.line_height", self.measure.label.line_height),
            ("measure.label.glyph_width", self.measure.label.glyph_width),
        ];
        for (key, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::invalid(key, "must be positive and finite"));
            }
        }

        let non_negative = [
            ("measure.label.hit_offset", self.measure.label.hit_offset),
            ("measure.label.padding", self.measure.label.padding),
            ("measure.label.corner_radius", self.measure.label.corner_radius),
            ("measure.label.gap", self.measure.label.gap),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::invalid(key, "must be non-negative and finite"));
            }
        }

        if self.measure.label.font.trim().is_empty() {
            return Err(SettingsError::invalid("measure.label.font", "must not be empty"));
        }

        Ok(())
    }
}
