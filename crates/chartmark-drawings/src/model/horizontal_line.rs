//! Price-level lines: a full-width horizontal line and a ray extending right.

use chartmark_core::{ChartPoint, PixelPoint, ViewPoint};
use chartmark_settings::Config;
use serde_json::Value;

use super::{view_at, AnnotationShape, DrawingKind};
use crate::options::{DrawingOptions, LineTextOptions};
use crate::render::{RenderCommand, RenderContext, TextAlign};

/// Label drawn just above the line's left end, if the text is set.
fn text_label(options: &LineTextOptions, left: f64, y: f64, ctx: &RenderContext<'_>) -> Option<RenderCommand> {
    if options.text.is_empty() {
        return None;
    }
    let padding = ctx.settings.measure.label.padding;
    Some(RenderCommand::Text {
        text: options.text.clone(),
        at: PixelPoint::new(left + padding, y - padding),
        font: ctx.settings.measure.label.font.clone(),
        color: options.line.line_color.clone(),
        align: TextAlign::Left,
    })
}

/// Line across the whole pane at one price.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalLine {
    pub points: [Option<ChartPoint>; 1],
    pub options: LineTextOptions,
}

impl HorizontalLine {
    pub fn new(point: ChartPoint, options: LineTextOptions) -> Self {
        Self::from_points([Some(point)], options)
    }

    pub fn from_points(points: [Option<ChartPoint>; 1], options: LineTextOptions) -> Self {
        Self { points, options }
    }

    fn level(views: &[ViewPoint]) -> Option<f64> {
        views.first().and_then(|v| v.y)
    }
}

impl AnnotationShape for HorizontalLine {
    fn kind(&self) -> DrawingKind {
        DrawingKind::HorizontalLine
    }

    fn points(&self) -> &[Option<ChartPoint>] {
        &self.points
    }

    fn points_mut(&mut self) -> &mut [Option<ChartPoint>] {
        &mut self.points
    }

    fn line_options(&self) -> &DrawingOptions {
        &self.options.line
    }

    fn options_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.options)
    }

    fn contains_point(&self, views: &[ViewPoint], p: PixelPoint, settings: &Config) -> bool {
        Self::level(views).is_some_and(|y| (p.y - y).abs() <= settings.interaction.hover_tolerance)
    }

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        let Some(y) = Self::level(views) else {
            return Vec::new();
        };
        let line = &self.options.line;
        let mut commands = vec![RenderCommand::Line {
            from: PixelPoint::new(0.0, y),
            to: PixelPoint::new(ctx.pane_width, y),
            color: line.line_color.clone(),
            width: line.width,
            dash: line.dash(),
        }];
        commands.extend(text_label(&self.options, 0.0, y, ctx));
        commands
    }
}

/// Line from an anchor to the right edge of the pane.
#[derive(Debug, Clone, PartialEq)]
pub struct RayLine {
    pub points: [Option<ChartPoint>; 1],
    pub options: LineTextOptions,
}

impl RayLine {
    pub fn new(point: ChartPoint, options: LineTextOptions) -> Self {
        Self::from_points([Some(point)], options)
    }

    pub fn from_points(points: [Option<ChartPoint>; 1], options: LineTextOptions) -> Self {
        Self { points, options }
    }
}

impl AnnotationShape for RayLine {
    fn kind(&self) -> DrawingKind {
        DrawingKind::RayLine
    }

    fn points(&self) -> &[Option<ChartPoint>] {
        &self.points
    }

    fn points_mut(&mut self) -> &mut [Option<ChartPoint>] {
        &mut self.points
    }

    fn line_options(&self) -> &DrawingOptions {
        &self.options.line
    }

    fn options_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.options)
    }

    fn contains_point(&self, views: &[ViewPoint], p: PixelPoint, settings: &Config) -> bool {
        let tolerance = settings.interaction.hover_tolerance;
        view_at(views, 0)
            .is_some_and(|anchor| (p.y - anchor.y).abs() <= tolerance && p.x >= anchor.x - tolerance)
    }

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        let Some(anchor) = view_at(views, 0) else {
            return Vec::new();
        };
        let line = &self.options.line;
        let mut commands = vec![RenderCommand::Line {
            from: anchor,
            to: PixelPoint::new(ctx.pane_width.max(anchor.x), anchor.y),
            color: line.line_color.clone(),
            width: line.width,
            dash: line.dash(),
        }];
        commands.extend(text_label(&self.options, anchor.x, anchor.y, ctx));
        commands
    }
}
