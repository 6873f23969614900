//! Draw commands produced by the annotation renderers.
//!
//! Renderers are pure: they take projected pixel positions and options and
//! return a list of [`RenderCommand`]s for the host canvas to execute. The
//! commands serialize to JSON for replay and debugging.

use chartmark_core::PixelPoint;
use chartmark_settings::Config;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in pane pixels with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Normalized rectangle spanned by two opposite corners.
    pub fn from_corners(a: PixelPoint, b: PixelPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Point-in-rectangle test with `band` pixels of slack on every side.
    /// Points exactly on the band edge count as inside.
    pub fn contains(&self, p: PixelPoint, band: f64) -> bool {
        p.x >= self.x - band
            && p.x <= self.right() + band
            && p.y >= self.y - band
            && p.y <= self.bottom() + band
    }

    /// Corners in top-left, top-right, bottom-right, bottom-left order.
    pub fn corners(&self) -> [PixelPoint; 4] {
        [
            PixelPoint::new(self.x, self.y),
            PixelPoint::new(self.right(), self.y),
            PixelPoint::new(self.right(), self.bottom()),
            PixelPoint::new(self.x, self.bottom()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

/// A single canvas operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum RenderCommand {
    FillRect {
        rect: Rect,
        color: String,
    },
    StrokeRect {
        rect: Rect,
        color: String,
        width: f64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        dash: Vec<f64>,
    },
    Line {
        from: PixelPoint,
        to: PixelPoint,
        color: String,
        width: f64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        dash: Vec<f64>,
    },
    RoundedRect {
        rect: Rect,
        radius: f64,
        color: String,
    },
    Text {
        text: String,
        at: PixelPoint,
        font: String,
        color: String,
        align: TextAlign,
    },
    Circle {
        center: PixelPoint,
        radius: f64,
        color: String,
    },
}

/// Everything a renderer needs besides the drawing itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Whether the drawing is hovered or being dragged.
    pub hovered: bool,
    /// Decimal places of the series price format.
    pub precision: usize,
    pub pane_width: f64,
    pub pane_height: f64,
    pub settings: &'a Config,
}

impl<'a> RenderContext<'a> {
    pub fn new(settings: &'a Config, pane: (f64, f64), precision: usize) -> Self {
        Self {
            hovered: false,
            precision,
            pane_width: pane.0,
            pane_height: pane.1,
            settings,
        }
    }

    pub fn with_hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    /// Handle circles at `points` when the drawing is hovered.
    pub fn handles(&self, points: &[PixelPoint], color: &str) -> Vec<RenderCommand> {
        if !self.hovered {
            return Vec::new();
        }
        points
            .iter()
            .map(|&center| RenderCommand::Circle {
                center,
                radius: self.settings.interaction.handle_radius,
                color: color.to_string(),
            })
            .collect()
    }
}
