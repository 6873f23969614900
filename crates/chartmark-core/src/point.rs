//! Chart-space and pixel-space points.
//!
//! A [`ChartPoint`] is anchored either to a bar time or to a logical bar
//! index and always carries a price. Pixel positions are derived through a
//! [`CoordinateMapper`] and are never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coords::CoordinateMapper;
use crate::error::PointError;

/// UTC timestamp in seconds, as used by the host's time scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn new(seconds: i64) -> Self {
        Self(seconds)
    }

    pub fn seconds(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The authoritative horizontal coordinate of a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Anchored to the bar with this time.
    Time(Timestamp),
    /// Anchored to a logical bar index (possibly fractional, possibly beyond the data).
    Logical(f64),
}

/// A point in chart space.
///
/// `logical` mirrors the anchor: for a logical anchor it is always the anchor
/// value, for a time anchor it is the bar index last resolved for that time.
/// `x` is a pixel cache refreshed by [`ChartPoint::remap`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PointRecord", into = "PointRecord")]
pub struct ChartPoint {
    anchor: Anchor,
    logical: Option<f64>,
    price: f64,
    x: Option<f64>,
}

impl ChartPoint {
    /// Creates a point anchored to a bar time.
    pub fn at_time(time: Timestamp, logical: Option<f64>, price: f64) -> Self {
        Self {
            anchor: Anchor::Time(time),
            logical,
            price,
            x: None,
        }
    }

    /// Creates a point anchored to a logical index.
    pub fn at_logical(logical: f64, price: f64) -> Self {
        Self {
            anchor: Anchor::Logical(logical),
            logical: Some(logical),
            price,
            x: None,
        }
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Bar time, if the point is time-anchored.
    pub fn time(&self) -> Option<Timestamp> {
        match self.anchor {
            Anchor::Time(t) => Some(t),
            Anchor::Logical(_) => None,
        }
    }

    pub fn logical(&self) -> Option<f64> {
        self.logical
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Cached pixel x from the last remap.
    pub fn x(&self) -> Option<f64> {
        self.x
    }

    /// Resolves the pixel x of this point from its authoritative anchor.
    ///
    /// A time outside the rendered domain falls back to the mirrored logical
    /// index so drawings beyond the last bar keep rendering.
    pub fn horizontal_coordinate<M: CoordinateMapper + ?Sized>(&self, mapper: &M) -> Option<f64> {
        match self.anchor {
            Anchor::Time(time) => mapper
                .time_to_coordinate(time)
                .or_else(|| self.logical.and_then(|l| mapper.logical_to_coordinate(l))),
            Anchor::Logical(logical) => mapper.logical_to_coordinate(logical),
        }
    }

    /// Recomputes the derived pixel x and logical mirror, keeping anchor and price.
    pub fn remap<M: CoordinateMapper + ?Sized>(&self, mapper: &M) -> Self {
        match self.anchor {
            Anchor::Time(time) => {
                let x = mapper.time_to_coordinate(time);
                let logical = x
                    .and_then(|x| mapper.coordinate_to_logical(x))
                    .or(self.logical);
                Self {
                    anchor: self.anchor,
                    logical,
                    price: self.price,
                    x,
                }
            }
            Anchor::Logical(logical) => Self {
                anchor: self.anchor,
                logical: Some(logical),
                price: self.price,
                x: mapper.logical_to_coordinate(logical),
            },
        }
    }

    /// Shifts the point by a logical and price delta.
    ///
    /// After a horizontal shift the logical index is authoritative unless the
    /// host has a bar at exactly that index, in which case the point snaps
    /// back to a time anchor. The pixel cache is cleared.
    pub fn translate<M: CoordinateMapper + ?Sized>(
        &mut self,
        logical_delta: f64,
        price_delta: f64,
        mapper: &M,
    ) {
        self.price += price_delta;
        self.x = None;

        if logical_delta == 0.0 {
            return;
        }

        let current = self.logical.or_else(|| {
            self.time()
                .and_then(|t| mapper.time_to_coordinate(t))
                .and_then(|x| mapper.coordinate_to_logical(x))
        });
        let Some(current) = current else {
            tracing::debug!("Point has no resolvable logical index, horizontal shift skipped");
            return;
        };

        let logical = current + logical_delta;
        self.logical = Some(logical);
        self.anchor = match mapper.time_at_logical(logical) {
            Some(time) => Anchor::Time(time),
            None => Anchor::Logical(logical),
        };
    }
}

/// Persisted form of a [`ChartPoint`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PointRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    logical: Option<f64>,
    price: f64,
}

impl TryFrom<PointRecord> for ChartPoint {
    type Error = PointError;

    fn try_from(record: PointRecord) -> Result<Self, Self::Error> {
        if !record.price.is_finite() {
            return Err(PointError::NonFinitePrice {
                price: record.price,
            });
        }
        if let Some(logical) = record.logical {
            if !logical.is_finite() {
                return Err(PointError::NonFiniteLogical { logical });
            }
        }

        match (record.time, record.logical) {
            (Some(time), logical) => Ok(ChartPoint::at_time(time, logical, record.price)),
            (None, Some(logical)) => Ok(ChartPoint::at_logical(logical, record.price)),
            (None, None) => Err(PointError::MissingHorizontalAnchor),
        }
    }
}

impl From<ChartPoint> for PointRecord {
    fn from(point: ChartPoint) -> Self {
        Self {
            time: point.time(),
            logical: point.logical,
            price: point.price,
        }
    }
}

/// Pane pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both axes are strictly within `tolerance` of `other`.
    pub fn near(&self, other: &PixelPoint, tolerance: f64) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}

/// A projected point whose coordinates may be unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl ViewPoint {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Both coordinates, or `None` if either is unavailable.
    pub fn resolved(&self) -> Option<PixelPoint> {
        match (self.x, self.y) {
            (Some(x), Some(y)) => Some(PixelPoint::new(x, y)),
            _ => None,
        }
    }
}
