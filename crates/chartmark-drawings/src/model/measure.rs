use chartmark_core::{ChartPoint, PixelPoint, ViewPoint};
use chartmark_settings::Config;
use serde_json::Value;

use super::{view_at, AnnotationShape, DrawingKind};
use crate::options::{DrawingOptions, MeasureOptions};
use crate::render::{Rect, RenderCommand, RenderContext, TextAlign};

/// Price and bar distance between two anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureStats {
    /// End price minus start price.
    pub price_change: f64,
    /// Change relative to the start price, in percent. Zero when the start price is zero.
    pub percent: f64,
    /// Bars covered by the measurement, counting both ends.
    pub bars: Option<f64>,
}

impl MeasureStats {
    pub fn between(start: &ChartPoint, end: &ChartPoint) -> Self {
        let price_change = end.price() - start.price();
        let percent = if start.price() == 0.0 {
            0.0
        } else {
            price_change / start.price().abs() * 100.0
        };
        let bars = match (start.logical(), end.logical()) {
            (Some(a), Some(b)) => Some((b - a).abs() + 1.0),
            _ => None,
        };
        Self {
            price_change,
            percent,
            bars,
        }
    }

    pub fn is_down(&self) -> bool {
        self.percent < 0.0
    }

    /// First label line, e.g. `↑ 12.50 (3.20%)`.
    pub fn price_text(&self, precision: usize) -> String {
        let arrow = if self.is_down() { '↓' } else { '↑' };
        format!(
            "{} {:.*} ({:.2}%)",
            arrow,
            precision,
            self.price_change.abs(),
            self.percent
        )
    }

    /// Second label line. Fractional counts from loaded points round to whole bars.
    pub fn bar_text(&self) -> Option<String> {
        self.bars.map(|bars| format!("{} bars", bars.round()))
    }
}

/// Price/bar measurement between two anchors.
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub points: [Option<ChartPoint>; 2],
    pub options: MeasureOptions,
}

impl Measure {
    pub fn new(p1: ChartPoint, p2: ChartPoint, options: MeasureOptions) -> Self {
        Self::from_points([Some(p1), Some(p2)], options)
    }

    pub fn from_points(points: [Option<ChartPoint>; 2], options: MeasureOptions) -> Self {
        Self { points, options }
    }

    /// Statistics, once both anchors are placed.
    pub fn stats(&self) -> Option<MeasureStats> {
        match &self.points {
            [Some(start), Some(end)] => Some(MeasureStats::between(start, end)),
            _ => None,
        }
    }

    fn frame(views: &[ViewPoint]) -> Option<Rect> {
        Some(Rect::from_corners(view_at(views, 0)?, view_at(views, 1)?))
    }
}

impl AnnotationShape for Measure {
    fn kind(&self) -> DrawingKind {
        DrawingKind::Measure
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

    /// Over the measured box or the floating label above it.
    fn contains_point(&self, views: &[ViewPoint], p: PixelPoint, settings: &Config) -> bool {
        let Some(frame) = Self::frame(views) else {
            return false;
        };
        let band = settings.interaction.hover_tolerance / 2.0;
        if frame.contains(p, band) {
            return true;
        }

        let label = &settings.measure.label;
        let label_box = Rect::new(
            frame.center().x - label.hit_width / 2.0,
            frame.y - label.hit_offset,
            label.hit_width,
            label.hit_height,
        );
        label_box.contains(p, band)
    }

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        let (Some(frame), Some(stats)) = (Self::frame(views), self.stats()) else {
            return Vec::new();
        };
        let palette = ctx.settings.measure.palette.for_change(stats.percent);
        let label = &ctx.settings.measure.label;
        let center = frame.center();

        let mut commands = vec![
            RenderCommand::FillRect {
                rect: frame,
                color: palette.fill.clone(),
            },
            RenderCommand::Line {
                from: PixelPoint::new(center.x, frame.y),
                to: PixelPoint::new(center.x, frame.bottom()),
                color: palette.text.clone(),
                width: 1.0,
                dash: Vec::new(),
            },
            RenderCommand::Line {
                from: PixelPoint::new(frame.x, center.y),
                to: PixelPoint::new(frame.right(), center.y),
                color: palette.text.clone(),
                width: 1.0,
                dash: Vec::new(),
            },
        ];

        let mut lines = vec![stats.price_text(ctx.precision)];
        lines.extend(stats.bar_text());

        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let text_width = longest as f64 * label.glyph_width;
        let box_height = label.line_height * lines.len() as f64 + label.padding;
        let box_x = center.x - text_width / 2.0 - label.padding;
        let box_y = frame.y - box_height - label.gap;

        commands.push(RenderCommand::RoundedRect {
            rect: Rect::new(box_x, box_y, text_width + label.padding * 2.0, box_height),
            radius: label.corner_radius,
            color: palette.text.clone(),
        });

        for (row, text) in lines.into_iter().enumerate() {
            let baseline = if row == 0 {
                box_y + label.line_height
            } else {
                box_y + label.line_height * 2.0 - label.padding / 2.0
            };
            commands.push(RenderCommand::Text {
                text,
                at: PixelPoint::new(center.x, baseline),
                font: label.font.clone(),
                color: ctx.settings.measure.palette.label_text.clone(),
                align: TextAlign::Center,
            });
        }

        commands.extend(ctx.handles(&frame.corners(), &self.options.line.line_color));
        commands
    }
}
