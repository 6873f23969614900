//! # Chartmark Core
//!
//! Core types and traits for chartmark.
//! Provides the chart-space point model, the coordinate mapper and host
//! abstractions the drawing engine is written against, and a headless host
//! for replay and testing.

pub mod coords;
pub mod error;
pub mod headless;
pub mod host;
pub mod point;

pub use coords::{CoordinateMapper, LinearChartScale};
pub use error::PointError;
pub use headless::HeadlessHost;
pub use host::{
    ChartEvent, ChartHost, CursorStyle, DrawingId, HostEventKind, Key, KeyEvent, Modifiers,
    MouseEventParams, SubscriptionId,
};
pub use point::{Anchor, ChartPoint, PixelPoint, Timestamp, ViewPoint};
