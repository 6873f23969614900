//! Drawing kind registry.
//!
//! A static table mapping each serialization tag to its kind, its point
//! count and a factory. Adding a kind means adding one [`DrawingKind`]
//! variant and one entry here.

use chartmark_core::ChartPoint;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DrawingError, DrawingResult};
use crate::model::{BoxShape, DrawingKind, HorizontalLine, Measure, RayLine, Shape, TrendLine, VerticalLine};

/// Builds a shape from its points and persisted options.
pub type ShapeFactory = fn(&[Option<ChartPoint>], Value) -> DrawingResult<Shape>;

#[derive(Clone, Copy)]
pub struct KindEntry {
    pub tag: &'static str,
    pub kind: DrawingKind,
    pub arity: usize,
    pub factory: ShapeFactory,
}

/// Indexed by `DrawingKind as usize`.
static REGISTRY: [KindEntry; 6] = [
    KindEntry {
        tag: "Measure",
        kind: DrawingKind::Measure,
        arity: 2,
        factory: build_measure,
    },
    KindEntry {
        tag: "Box",
        kind: DrawingKind::Box,
        arity: 2,
        factory: build_box,
    },
    KindEntry {
        tag: "TrendLine",
        kind: DrawingKind::TrendLine,
        arity: 2,
        factory: build_trend_line,
    },
    KindEntry {
        tag: "HorizontalLine",
        kind: DrawingKind::HorizontalLine,
        arity: 1,
        factory: build_horizontal_line,
    },
    KindEntry {
        tag: "RayLine",
        kind: DrawingKind::RayLine,
        arity: 1,
        factory: build_ray_line,
    },
    KindEntry {
        tag: "VerticalLine",
        kind: DrawingKind::VerticalLine,
        arity: 1,
        factory: build_vertical_line,
    },
];

fn build_measure(points: &[Option<ChartPoint>], options: Value) -> DrawingResult<Shape> {
    let kind = DrawingKind::Measure;
    Ok(Measure::from_points(two_points(kind, points)?, parse_options(kind, options)?).into())
}

fn build_box(points: &[Option<ChartPoint>], options: Value) -> DrawingResult<Shape> {
    let kind = DrawingKind::Box;
    Ok(BoxShape::from_points(two_points(kind, points)?, parse_options(kind, options)?).into())
}

fn build_trend_line(points: &[Option<ChartPoint>], options: Value) -> DrawingResult<Shape> {
    let kind = DrawingKind::TrendLine;
    Ok(TrendLine::from_points(two_points(kind, points)?, parse_options(kind, options)?).into())
}

fn build_horizontal_line(points: &[Option<ChartPoint>], options: Value) -> DrawingResult<Shape> {
    let kind = DrawingKind::HorizontalLine;
    Ok(HorizontalLine::from_points(one_point(kind, points)?, parse_options(kind, options)?).into())
}

fn build_ray_line(points: &[Option<ChartPoint>], options: Value) -> DrawingResult<Shape> {
    let kind = DrawingKind::RayLine;
    Ok(RayLine::from_points(one_point(kind, points)?, parse_options(kind, options)?).into())
}

fn build_vertical_line(points: &[Option<ChartPoint>], options: Value) -> DrawingResult<Shape> {
    let kind = DrawingKind::VerticalLine;
    Ok(VerticalLine::from_points(one_point(kind, points)?, parse_options(kind, options)?).into())
}

/// Registry entry of a kind.
pub fn entry(kind: DrawingKind) -> &'static KindEntry {
    &REGISTRY[kind as usize]
}

/// Registry entry for a serialization tag.
pub fn lookup(tag: &str) -> Option<&'static KindEntry> {
    REGISTRY.iter().find(|entry| entry.tag == tag)
}

pub fn entries() -> &'static [KindEntry] {
    &REGISTRY
}

/// Builds a persisted drawing from its tag, points and options.
pub fn build(tag: &str, points: &[Option<ChartPoint>], options: Value) -> DrawingResult<Shape> {
    let entry = lookup(tag).ok_or_else(|| DrawingError::UnknownKind(tag.to_string()))?;
    (entry.factory)(points, options)
}

/// Builds a new drawing with every point collapsed onto `point` and default options.
pub fn instantiate(kind: DrawingKind, point: ChartPoint) -> DrawingResult<Shape> {
    let entry = entry(kind);
    let points = vec![Some(point); entry.arity];
    (entry.factory)(&points, Value::Null)
}

/// Decodes options, treating an absent (`null`) value as all defaults.
pub fn parse_options<T: DeserializeOwned + Default>(kind: DrawingKind, options: Value) -> DrawingResult<T> {
    if options.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(options).map_err(|source| DrawingError::InvalidOptions {
        kind: kind.tag().to_string(),
        source,
    })
}

fn check_count(kind: DrawingKind, points: &[Option<ChartPoint>]) -> DrawingResult<()> {
    let expected = entry(kind).arity;
    if points.len() != expected {
        return Err(DrawingError::PointCount {
            kind: kind.tag().to_string(),
            expected,
            found: points.len(),
        });
    }
    Ok(())
}

fn two_points(kind: DrawingKind, points: &[Option<ChartPoint>]) -> DrawingResult<[Option<ChartPoint>; 2]> {
    check_count(kind, points)?;
    Ok([points[0], points[1]])
}

fn one_point(kind: DrawingKind, points: &[Option<ChartPoint>]) -> DrawingResult<[Option<ChartPoint>; 1]> {
    check_count(kind, points)?;
    Ok([points[0]])
}
