use chartmark_core::{ChartPoint, PixelPoint, ViewPoint};
use chartmark_settings::Config;
use serde_json::Value;

use super::{view_at, AnnotationShape, DrawingKind};
use crate::options::DrawingOptions;
use crate::render::{RenderCommand, RenderContext};

/// Straight segment between two anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub points: [Option<ChartPoint>; 2],
    pub options: DrawingOptions,
}

impl TrendLine {
    pub fn new(p1: ChartPoint, p2: ChartPoint, options: DrawingOptions) -> Self {
        Self::from_points([Some(p1), Some(p2)], options)
    }

    pub fn from_points(points: [Option<ChartPoint>; 2], options: DrawingOptions) -> Self {
        Self { points, options }
    }
}

/// Distance from `p` to the infinite line through `a` and `b`, or to `a`
/// when the two coincide.
fn distance_to_line(p: PixelPoint, a: PixelPoint, b: PixelPoint) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length = (dx * dx + dy * dy).sqrt();
    if length == 0.0 {
        return p.distance_to(&a);
    }
    ((p.x - a.x) * dy - (p.y - a.y) * dx).abs() / length
}

impl AnnotationShape for TrendLine {
    fn kind(&self) -> DrawingKind {
        DrawingKind::TrendLine
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
        let (Some(a), Some(b)) = (view_at(views, 0), view_at(views, 1)) else {
            return false;
        };
        let tolerance = settings.interaction.hover_tolerance;
        let within_span = p.x >= a.x.min(b.x) - tolerance && p.x <= a.x.max(b.x) + tolerance;
        within_span && distance_to_line(p, a, b) <= tolerance
    }

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        let (Some(a), Some(b)) = (view_at(views, 0), view_at(views, 1)) else {
            return Vec::new();
        };
        let mut commands = vec![RenderCommand::Line {
            from: a,
            to: b,
            color: self.options.line_color.clone(),
            width: self.options.width,
            dash: self.options.dash(),
        }];
        commands.extend(ctx.handles(&[a, b], &self.options.line_color));
        commands
    }
}
