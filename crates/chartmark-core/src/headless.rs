//! In-memory chart host.
//!
//! Backs the engine with a [`LinearChartScale`] and records attachments,
//! subscriptions, cursor and scroll state. Used for replaying saved drawings
//! without a rendering surface, and as the host in tests.

use std::collections::HashMap;

use crate::coords::{CoordinateMapper, LinearChartScale};
use crate::host::{ChartHost, CursorStyle, DrawingId, HostEventKind, SubscriptionId};
use crate::point::Timestamp;

#[derive(Debug, Clone)]
pub struct HeadlessHost {
    scale: LinearChartScale,
    attached: Vec<DrawingId>,
    subscriptions: HashMap<SubscriptionId, HostEventKind>,
    cursor: CursorStyle,
    scroll_enabled: bool,
    precision: usize,
    repaints: usize,
}

impl HeadlessHost {
    pub fn new(scale: LinearChartScale) -> Self {
        Self {
            scale,
            attached: Vec::new(),
            subscriptions: HashMap::new(),
            cursor: CursorStyle::Default,
            scroll_enabled: true,
            precision: 2,
            repaints: 0,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn scale(&self) -> &LinearChartScale {
        &self.scale
    }

    /// Mutable access for simulating scroll and zoom.
    pub fn scale_mut(&mut self) -> &mut LinearChartScale {
        &mut self.scale
    }

    /// Attached primitives in attachment order.
    pub fn attached(&self) -> &[DrawingId] {
        &self.attached
    }

    pub fn is_attached(&self, id: DrawingId) -> bool {
        self.attached.contains(&id)
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_subscribed(&self, kind: HostEventKind) -> bool {
        self.subscriptions.values().any(|k| *k == kind)
    }

    pub fn cursor(&self) -> CursorStyle {
        self.cursor
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub fn repaint_count(&self) -> usize {
        self.repaints
    }
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new(LinearChartScale::default())
    }
}

impl CoordinateMapper for HeadlessHost {
    fn time_to_coordinate(&self, time: Timestamp) -> Option<f64> {
        self.scale.time_to_coordinate(time)
    }

    fn coordinate_to_time(&self, x: f64) -> Option<Timestamp> {
        self.scale.coordinate_to_time(x)
    }

    fn coordinate_to_logical(&self, x: f64) -> Option<f64> {
        self.scale.coordinate_to_logical(x)
    }

    fn logical_to_coordinate(&self, logical: f64) -> Option<f64> {
        self.scale.logical_to_coordinate(logical)
    }

    fn price_to_coordinate(&self, price: f64) -> Option<f64> {
        self.scale.price_to_coordinate(price)
    }

    fn coordinate_to_price(&self, y: f64) -> Option<f64> {
        self.scale.coordinate_to_price(y)
    }

    fn pane_size(&self) -> (f64, f64) {
        self.scale.pane_size()
    }
}

impl ChartHost for HeadlessHost {
    fn attach_primitive(&mut self, id: DrawingId) {
        if !self.attached.contains(&id) {
            self.attached.push(id);
        }
    }

    fn detach_primitive(&mut self, id: DrawingId) {
        self.attached.retain(|a| *a != id);
    }

    fn subscribe(&mut self, kind: HostEventKind) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.subscriptions.insert(id, kind);
        tracing::debug!("Subscription {} added for {:?}", id, kind);
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.subscriptions.remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    fn set_cursor(&mut self, cursor: CursorStyle) {
        self.cursor = cursor;
    }

    fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
    }

    fn price_precision(&self) -> usize {
        self.precision
    }

    fn request_repaint(&mut self) {
        self.repaints += 1;
    }
}
