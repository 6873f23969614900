//! Host chart interface
//!
//! Defines what the drawing engine needs from the charting surface it is
//! embedded in: coordinate conversion, primitive attachment, cursor and
//! scroll control, and an event source with explicit subscription handles.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::coords::CoordinateMapper;
use crate::point::{PixelPoint, Timestamp};

/// Identity of an annotation, also used as its host primitive handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrawingId(Uuid);

impl DrawingId {
    /// Create a new unique drawing ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DrawingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DrawingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Drawing({})", &self.0.to_string()[..8])
    }
}

/// Subscription handle for unsubscribing from host events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Event streams a host can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    Click,
    CrosshairMove,
    PointerDown,
    PointerUp,
    KeyDown,
}

/// Cursor shapes requested by the interaction state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    #[default]
    Default,
    Pointer,
    Grabbing,
    Crosshair,
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Escape,
    /// A letter or digit key, case-insensitive.
    Char(char),
}

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }
}

/// Click or crosshair-move parameters resolved by the host.
///
/// `point` is absent when the pointer left the pane; `time` is absent when no
/// bar exists under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseEventParams {
    pub time: Option<Timestamp>,
    pub logical: Option<f64>,
    pub point: Option<PixelPoint>,
    pub modifiers: Modifiers,
}

impl MouseEventParams {
    /// Resolves time and bar index for a pane position through `mapper`.
    ///
    /// Like host pointer events, `logical` is the index of the bar under the
    /// pointer, not the fractional position.
    pub fn at_pixel<M: CoordinateMapper + ?Sized>(mapper: &M, x: f64, y: f64) -> Self {
        Self {
            time: mapper.coordinate_to_time(x),
            logical: mapper.coordinate_to_logical(x).map(f64::round),
            point: Some(PixelPoint::new(x, y)),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Events forwarded from the host to the drawing engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartEvent {
    Click(MouseEventParams),
    CrosshairMove(MouseEventParams),
    PointerDown(PixelPoint),
    PointerUp,
    KeyDown(KeyEvent),
}

impl ChartEvent {
    pub fn kind(&self) -> HostEventKind {
        match self {
            ChartEvent::Click(_) => HostEventKind::Click,
            ChartEvent::CrosshairMove(_) => HostEventKind::CrosshairMove,
            ChartEvent::PointerDown(_) => HostEventKind::PointerDown,
            ChartEvent::PointerUp => HostEventKind::PointerUp,
            ChartEvent::KeyDown(_) => HostEventKind::KeyDown,
        }
    }
}

/// The charting surface the engine is embedded in.
pub trait ChartHost: CoordinateMapper {
    /// Adds a primitive to the chart's overlay stack.
    fn attach_primitive(&mut self, id: DrawingId);

    /// Removes a primitive. Unknown ids are ignored.
    fn detach_primitive(&mut self, id: DrawingId);

    /// Registers interest in an event stream.
    fn subscribe(&mut self, kind: HostEventKind) -> SubscriptionId;

    /// Releases a subscription. Returns true if it was registered.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    fn set_cursor(&mut self, cursor: CursorStyle);

    /// Enables or disables the chart's own pan/scroll handling.
    fn set_scroll_enabled(&mut self, enabled: bool);

    /// Decimal places used by the series price format.
    fn price_precision(&self) -> usize {
        2
    }

    fn request_repaint(&mut self) {}
}
