//! Chartmark Settings Crate
//!
//! Handles interaction tolerances, measurement label metrics and palettes,
//! and their persistence as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{
    Config, InteractionSettings, LabelSettings, MeasureSettings, Palette, PaletteSettings,
};
pub use error::{SettingsError, SettingsResult};
