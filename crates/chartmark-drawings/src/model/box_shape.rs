use chartmark_core::{ChartPoint, PixelPoint, ViewPoint};
use chartmark_settings::Config;
use serde_json::Value;

use super::{view_at, AnnotationShape, DrawingKind};
use crate::options::{BoxOptions, DrawingOptions};
use crate::render::{Rect, RenderCommand, RenderContext};

/// Rectangle spanned by two anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShape {
    pub points: [Option<ChartPoint>; 2],
    pub options: BoxOptions,
}

impl BoxShape {
    pub fn new(p1: ChartPoint, p2: ChartPoint, options: BoxOptions) -> Self {
        Self::from_points([Some(p1), Some(p2)], options)
    }

    pub fn from_points(points: [Option<ChartPoint>; 2], options: BoxOptions) -> Self {
        Self { points, options }
    }

    fn frame(views: &[ViewPoint]) -> Option<Rect> {
        Some(Rect::from_corners(view_at(views, 0)?, view_at(views, 1)?))
    }
}

impl AnnotationShape for BoxShape {
    fn kind(&self) -> DrawingKind {
        DrawingKind::Box
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
        Self::frame(views)
            .is_some_and(|frame| frame.contains(p, settings.interaction.hover_tolerance / 2.0))
    }

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        let Some(frame) = Self::frame(views) else {
            return Vec::new();
        };
        let line = &self.options.line;

        let mut commands = Vec::new();
        if self.options.fill_enabled {
            commands.push(RenderCommand::FillRect {
                rect: frame,
                color: self.options.fill_color.clone(),
            });
        }
        commands.push(RenderCommand::StrokeRect {
            rect: frame,
            color: line.line_color.clone(),
            width: line.width,
            dash: line.dash(),
        });
        commands.extend(ctx.handles(&frame.corners(), &line.line_color));
        commands
    }
}
