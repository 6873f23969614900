//! Coordinate mapping between chart space and pane pixels.
//!
//! The host chart owns the actual time and price scales; annotations only see
//! them through [`CoordinateMapper`]. Every conversion may be unavailable when
//! the requested value falls outside the rendered domain, which callers must
//! treat as "no coordinate" rather than zero.

use serde::{Deserialize, Serialize};

use crate::point::{ChartPoint, Timestamp, ViewPoint};

/// Conversions between time, logical index, price and pane pixels.
pub trait CoordinateMapper {
    fn time_to_coordinate(&self, time: Timestamp) -> Option<f64>;
    fn coordinate_to_time(&self, x: f64) -> Option<Timestamp>;
    fn coordinate_to_logical(&self, x: f64) -> Option<f64>;
    fn logical_to_coordinate(&self, logical: f64) -> Option<f64>;
    fn price_to_coordinate(&self, price: f64) -> Option<f64>;
    fn coordinate_to_price(&self, y: f64) -> Option<f64>;

    /// Pane width and height in pixels.
    fn pane_size(&self) -> (f64, f64);

    /// Time of the bar at an integral logical index, if such a bar exists.
    fn time_at_logical(&self, logical: f64) -> Option<Timestamp> {
        if !logical.is_finite() || logical.fract() != 0.0 {
            return None;
        }
        self.logical_to_coordinate(logical)
            .and_then(|x| self.coordinate_to_time(x))
    }

    /// Projects a chart point to pane pixels.
    fn project(&self, point: &ChartPoint) -> ViewPoint {
        ViewPoint::new(
            point.horizontal_coordinate(self),
            self.price_to_coordinate(point.price()),
        )
    }
}

/// A uniformly spaced time scale over a fixed price range.
///
/// Bars are `interval_secs` apart starting at `first_time`; `scroll_offset`
/// is the logical index shown at x = 0. Prices map linearly from
/// `price_top` at y = 0 to `price_bottom` at y = `height`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearChartScale {
    pub first_time: Timestamp,
    pub interval_secs: i64,
    pub bar_count: usize,
    pub bar_spacing: f64,
    pub scroll_offset: f64,
    pub price_top: f64,
    pub price_bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for LinearChartScale {
    fn default() -> Self {
        Self {
            first_time: Timestamp(1_700_000_000),
            interval_secs: 60,
            bar_count: 500,
            bar_spacing: 10.0,
            scroll_offset: 0.0,
            price_top: 200.0,
            price_bottom: 0.0,
            width: 1200.0,
            height: 600.0,
        }
    }
}

impl LinearChartScale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time of the bar at `index`, if it exists.
    pub fn bar_time(&self, index: usize) -> Option<Timestamp> {
        if index >= self.bar_count {
            return None;
        }
        let offset = i64::try_from(index).ok()?.checked_mul(self.interval_secs)?;
        self.first_time.0.checked_add(offset).map(Timestamp)
    }

    /// Scrolls the view by a number of bars (positive moves content left).
    pub fn scroll_by(&mut self, bars: f64) {
        self.scroll_offset += bars;
    }

    /// Changes the zoom level. Non-positive spacings are ignored.
    pub fn set_bar_spacing(&mut self, spacing: f64) {
        if spacing > 0.0 && spacing.is_finite() {
            self.bar_spacing = spacing;
        }
    }

    /// Changes the visible price range. Empty ranges are ignored.
    pub fn set_price_range(&mut self, top: f64, bottom: f64) {
        if top.is_finite() && bottom.is_finite() && top != bottom {
            self.price_top = top;
            self.price_bottom = bottom;
        }
    }

    fn bar_index_of(&self, time: Timestamp) -> Option<usize> {
        if self.interval_secs <= 0 {
            return None;
        }
        let offset = time.0.checked_sub(self.first_time.0)?;
        if offset < 0 || offset % self.interval_secs != 0 {
            return None;
        }
        let index = (offset / self.interval_secs) as usize;
        (index < self.bar_count).then_some(index)
    }
}

impl CoordinateMapper for LinearChartScale {
    fn time_to_coordinate(&self, time: Timestamp) -> Option<f64> {
        self.bar_index_of(time)
            .and_then(|index| self.logical_to_coordinate(index as f64))
    }

    fn coordinate_to_time(&self, x: f64) -> Option<Timestamp> {
        let logical = self.coordinate_to_logical(x)?.round();
        if logical < 0.0 {
            return None;
        }
        self.bar_time(logical as usize)
    }

    fn coordinate_to_logical(&self, x: f64) -> Option<f64> {
        if !x.is_finite() || self.bar_spacing <= 0.0 {
            return None;
        }
        Some(x / self.bar_spacing + self.scroll_offset)
    }

    fn logical_to_coordinate(&self, logical: f64) -> Option<f64> {
        if !logical.is_finite() {
            return None;
        }
        Some((logical - self.scroll_offset) * self.bar_spacing)
    }

    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        let span = self.price_top - self.price_bottom;
        if !price.is_finite() || span == 0.0 {
            return None;
        }
        Some((self.price_top - price) / span * self.height)
    }

    fn coordinate_to_price(&self, y: f64) -> Option<f64> {
        if !y.is_finite() || y < 0.0 || y > self.height || self.height <= 0.0 {
            return None;
        }
        let span = self.price_top - self.price_bottom;
        Some(self.price_top - y / self.height * span)
    }

    fn pane_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
