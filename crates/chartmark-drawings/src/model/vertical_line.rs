use chartmark_core::{ChartPoint, PixelPoint, ViewPoint};
use chartmark_settings::Config;
use serde_json::Value;

use super::{AnnotationShape, DrawingKind};
use crate::options::DrawingOptions;
use crate::render::{RenderCommand, RenderContext};

/// Line across the whole pane height at one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalLine {
    pub points: [Option<ChartPoint>; 1],
    pub options: DrawingOptions,
}

impl VerticalLine {
    pub fn new(point: ChartPoint, options: DrawingOptions) -> Self {
        Self::from_points([Some(point)], options)
    }

    pub fn from_points(points: [Option<ChartPoint>; 1], options: DrawingOptions) -> Self {
        Self { points, options }
    }

    fn position(views: &[ViewPoint]) -> Option<f64> {
        views.first().and_then(|v| v.x)
    }
}

impl AnnotationShape for VerticalLine {
    fn kind(&self) -> DrawingKind {
        DrawingKind::VerticalLine
    }

    fn points(&self) -> &[Option<ChartPoint>] {
        &self.points
    }

    fn points_mut(&mut self) -> &mut [Option<ChartPoint>] {
        &mut self.points
    }

    fn line_options(&self) -> &DrawingOptions {
        &self.options
    }

    fn options_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.options)
    }

    fn contains_point(&self, views: &[ViewPoint], p: PixelPoint, settings: &Config) -> bool {
        Self::position(views).is_some_and(|x| (p.x - x).abs() <= settings.interaction.hover_tolerance)
    }

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        let Some(x) = Self::position(views) else {
            return Vec::new();
        };
        vec![RenderCommand::Line {
            from: PixelPoint::new(x, 0.0),
            to: PixelPoint::new(x, ctx.pane_height),
            color: self.options.line_color.clone(),
            width: self.options.width,
            dash: self.options.dash(),
        }]
    }
}
