//! Annotation kinds and the shape abstraction they share.

use chartmark_core::{ChartPoint, CoordinateMapper, PixelPoint, ViewPoint};
use chartmark_settings::Config;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::interaction::{apply_drag, DragDelta, HandleLayout, InteractionState};
use crate::options::DrawingOptions;
use crate::registry;
use crate::render::{RenderCommand, RenderContext};

mod box_shape;
mod horizontal_line;
mod measure;
mod trend_line;
mod vertical_line;

pub use box_shape::BoxShape;
pub use horizontal_line::{HorizontalLine, RayLine};
pub use measure::{Measure, MeasureStats};
pub use trend_line::TrendLine;
pub use vertical_line::VerticalLine;

/// The closed set of annotation kinds.
///
/// Declaration order matches the registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawingKind {
    Measure,
    Box,
    TrendLine,
    HorizontalLine,
    RayLine,
    VerticalLine,
}

impl DrawingKind {
    pub const ALL: [DrawingKind; 6] = [
        DrawingKind::Measure,
        DrawingKind::Box,
        DrawingKind::TrendLine,
        DrawingKind::HorizontalLine,
        DrawingKind::RayLine,
        DrawingKind::VerticalLine,
    ];

    /// Serialization tag.
    pub fn tag(&self) -> &'static str {
        registry::entry(*self).tag
    }

    /// Number of points a drawing of this kind is built from.
    pub fn arity(&self) -> usize {
        registry::entry(*self).arity
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        registry::lookup(tag).map(|entry| entry.kind)
    }

    pub fn handles(&self) -> HandleLayout {
        match self {
            DrawingKind::Measure | DrawingKind::Box => HandleLayout::Corners,
            DrawingKind::TrendLine => HandleLayout::Endpoints,
            DrawingKind::HorizontalLine | DrawingKind::RayLine | DrawingKind::VerticalLine => {
                HandleLayout::None
            }
        }
    }

    /// Axes a whole-shape drag moves along, as (logical, price).
    pub fn drag_axes(&self) -> (bool, bool) {
        match self {
            DrawingKind::HorizontalLine => (false, true),
            DrawingKind::VerticalLine => (true, false),
            _ => (true, true),
        }
    }

    /// Letter selecting this kind together with Alt.
    pub fn hotkey(&self) -> char {
        match self {
            DrawingKind::Measure => 'm',
            DrawingKind::Box => 'b',
            DrawingKind::TrendLine => 't',
            DrawingKind::HorizontalLine => 'h',
            DrawingKind::RayLine => 'r',
            DrawingKind::VerticalLine => 'v',
        }
    }
}

impl fmt::Display for DrawingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Geometry, hit testing and rendering of one annotation kind.
pub trait AnnotationShape {
    fn kind(&self) -> DrawingKind;
    fn points(&self) -> &[Option<ChartPoint>];
    fn points_mut(&mut self) -> &mut [Option<ChartPoint>];
    fn line_options(&self) -> &DrawingOptions;

    /// Options as persisted JSON.
    fn options_value(&self) -> serde_json::Result<Value>;

    /// Hover hit test against the projected points. Unresolved positions never hit.
    fn contains_point(&self, views: &[ViewPoint], p: PixelPoint, settings: &Config) -> bool;

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand>;

    fn handles(&self) -> HandleLayout {
        self.kind().handles()
    }

    /// Applies one drag step, restricted to the axes this kind moves along.
    fn drag(&mut self, state: InteractionState, delta: DragDelta, mapper: &dyn CoordinateMapper) {
        let (horizontal, vertical) = self.kind().drag_axes();
        apply_drag(
            self.points_mut(),
            state,
            delta.masked(horizontal, vertical),
            mapper,
        );
    }
}

/// Resolved pixel position of the `index`-th view.
pub(crate) fn view_at(views: &[ViewPoint], index: usize) -> Option<PixelPoint> {
    views.get(index).and_then(ViewPoint::resolved)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Measure(Measure),
    Box(BoxShape),
    TrendLine(TrendLine),
    HorizontalLine(HorizontalLine),
    RayLine(RayLine),
    VerticalLine(VerticalLine),
}

impl AnnotationShape for Shape {
    fn kind(&self) -> DrawingKind {
        match self {
            Shape::Measure(s) => s.kind(),
            Shape::Box(s) => s.kind(),
            Shape::TrendLine(s) => s.kind(),
            Shape::HorizontalLine(s) => s.kind(),
            Shape::RayLine(s) => s.kind(),
            Shape::VerticalLine(s) => s.kind(),
        }
    }

    fn points(&self) -> &[Option<ChartPoint>] {
        match self {
            Shape::Measure(s) => s.points(),
            Shape::Box(s) => s.points(),
            Shape::TrendLine(s) => s.points(),
            Shape::HorizontalLine(s) => s.points(),
            Shape::RayLine(s) => s.points(),
            Shape::VerticalLine(s) => s.points(),
        }
    }

    fn points_mut(&mut self) -> &mut [Option<ChartPoint>] {
        match self {
            Shape::Measure(s) => s.points_mut(),
            Shape::Box(s) => s.points_mut(),
            Shape::TrendLine(s) => s.points_mut(),
            Shape::HorizontalLine(s) => s.points_mut(),
            Shape::RayLine(s) => s.points_mut(),
            Shape::VerticalLine(s) => s.points_mut(),
        }
    }

    fn line_options(&self) -> &DrawingOptions {
        match self {
            Shape::Measure(s) => s.line_options(),
            Shape::Box(s) => s.line_options(),
            Shape::TrendLine(s) => s.line_options(),
            Shape::HorizontalLine(s) => s.line_options(),
            Shape::RayLine(s) => s.line_options(),
            Shape::VerticalLine(s) => s.line_options(),
        }
    }

    fn options_value(&self) -> serde_json::Result<Value> {
        match self {
            Shape::Measure(s) => s.options_value(),
            Shape::Box(s) => s.options_value(),
            Shape::TrendLine(s) => s.options_value(),
            Shape::HorizontalLine(s) => s.options_value(),
            Shape::RayLine(s) => s.options_value(),
            Shape::VerticalLine(s) => s.options_value(),
        }
    }

    fn contains_point(&self, views: &[ViewPoint], p: PixelPoint, settings: &Config) -> bool {
        match self {
            Shape::Measure(s) => s.contains_point(views, p, settings),
            Shape::Box(s) => s.contains_point(views, p, settings),
            Shape::TrendLine(s) => s.contains_point(views, p, settings),
            Shape::HorizontalLine(s) => s.contains_point(views, p, settings),
            Shape::RayLine(s) => s.contains_point(views, p, settings),
            Shape::VerticalLine(s) => s.contains_point(views, p, settings),
        }
    }

    fn render(&self, views: &[ViewPoint], ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        match self {
            Shape::Measure(s) => s.render(views, ctx),
            Shape::Box(s) => s.render(views, ctx),
            Shape::TrendLine(s) => s.render(views, ctx),
            Shape::HorizontalLine(s) => s.render(views, ctx),
            Shape::RayLine(s) => s.render(views, ctx),
            Shape::VerticalLine(s) => s.render(views, ctx),
        }
    }
}

impl From<Measure> for Shape {
    fn from(s: Measure) -> Self {
        Shape::Measure(s)
    }
}

impl From<BoxShape> for Shape {
    fn from(s: BoxShape) -> Self {
        Shape::Box(s)
    }
}

impl From<TrendLine> for Shape {
    fn from(s: TrendLine) -> Self {
        Shape::TrendLine(s)
    }
}

impl From<HorizontalLine> for Shape {
    fn from(s: HorizontalLine) -> Self {
        Shape::HorizontalLine(s)
    }
}

impl From<RayLine> for Shape {
    fn from(s: RayLine) -> Self {
        Shape::RayLine(s)
    }
}

impl From<VerticalLine> for Shape {
    fn from(s: VerticalLine) -> Self {
        Shape::VerticalLine(s)
    }
}
