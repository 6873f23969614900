//! Per-kind style options.
//!
//! Options are persisted with camelCase keys and every key is optional;
//! missing keys take their defaults and unknown keys are ignored.

use serde::{Deserialize, Serialize};

/// Stroke pattern, persisted as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
    LargeDashed,
    SparseDotted,
}

impl LineStyle {
    /// Dash segments for a stroke of `width` pixels. Empty means solid.
    pub fn dash_pattern(&self, width: f64) -> Vec<f64> {
        match self {
            LineStyle::Solid => Vec::new(),
            LineStyle::Dotted => vec![width, width],
            LineStyle::Dashed => vec![2.0 * width, 2.0 * width],
            LineStyle::LargeDashed => vec![6.0 * width, 6.0 * width],
            LineStyle::SparseDotted => vec![width, 4.0 * width],
        }
    }
}

impl TryFrom<u8> for LineStyle {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LineStyle::Solid),
            1 => Ok(LineStyle::Dotted),
            2 => Ok(LineStyle::Dashed),
            3 => Ok(LineStyle::LargeDashed),
            4 => Ok(LineStyle::SparseDotted),
            other => Err(format!("line style must be 0-4, got {}", other)),
        }
    }
}

impl From<LineStyle> for u8 {
    fn from(style: LineStyle) -> Self {
        match style {
            LineStyle::Solid => 0,
            LineStyle::Dotted => 1,
            LineStyle::Dashed => 2,
            LineStyle::LargeDashed => 3,
            LineStyle::SparseDotted => 4,
        }
    }
}

/// Options shared by every kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DrawingOptions {
    pub line_color: String,
    pub line_style: LineStyle,
    pub width: f64,
}

impl Default for DrawingOptions {
    fn default() -> Self {
        Self {
            line_color: "#1E80F0".to_string(),
            line_style: LineStyle::Solid,
            width: 4.0,
        }
    }
}

impl DrawingOptions {
    pub fn dash(&self) -> Vec<f64> {
        self.line_style.dash_pattern(self.width)
    }
}

/// Options for kinds that can fill their bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FillOptions {
    #[serde(flatten)]
    pub line: DrawingOptions,
    pub fill_enabled: bool,
    pub fill_color: String,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            line: DrawingOptions::default(),
            fill_enabled: true,
            fill_color: "rgba(255, 255, 255, 0.2)".to_string(),
        }
    }
}

pub type BoxOptions = FillOptions;
pub type MeasureOptions = FillOptions;

/// Options for horizontal and ray lines, which may carry a text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct LineTextOptions {
    #[serde(flatten)]
    pub line: DrawingOptions,
    pub text: String,
}
