//! Interaction state machine shared by all drawings.
//!
//! A drawing is idle until the pointer passes over it, hovering until the
//! pointer is pressed on it, and dragging (the whole shape or one handle)
//! until the pointer is released.

use chartmark_core::{ChartPoint, CoordinateMapper, CursorStyle, MouseEventParams, PixelPoint, ViewPoint};

/// Per-drawing interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    #[default]
    None,
    Hovering,
    /// Moving the whole shape.
    Dragging,
    /// Moving the first anchor.
    DraggingP1,
    /// Moving the second anchor.
    DraggingP2,
    /// Moving the cross corner `(x1, y2)`.
    DraggingP3,
    /// Moving the cross corner `(x2, y1)`.
    DraggingP4,
}

impl InteractionState {
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            InteractionState::Dragging
                | InteractionState::DraggingP1
                | InteractionState::DraggingP2
                | InteractionState::DraggingP3
                | InteractionState::DraggingP4
        )
    }

    /// Cursor requested when entering this state.
    pub fn cursor(&self) -> CursorStyle {
        match self {
            InteractionState::None => CursorStyle::Default,
            InteractionState::Hovering => CursorStyle::Pointer,
            _ => CursorStyle::Grabbing,
        }
    }
}

/// Result of feeding one pointer move to a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// The pointer is not over the drawing.
    Idle,
    /// The drawing is hovered or held, but did not move.
    Hovering,
    /// The drawing was moved by this event.
    Dragged,
}

/// Which pixel positions can be grabbed to resize a drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleLayout {
    /// All four corners of the box spanned by the two anchors.
    Corners,
    /// The two anchors only.
    Endpoints,
    /// No handles; any grab moves the whole drawing.
    None,
}

/// Movement between two resolved pointer samples, in chart units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragDelta {
    pub logical: f64,
    pub price: f64,
}

impl DragDelta {
    pub fn new(logical: f64, price: f64) -> Self {
        Self { logical, price }
    }

    /// Delta from `from` to `to`. Both samples must carry a logical index.
    pub fn between(from: &ChartPoint, to: &ChartPoint) -> Option<Self> {
        Some(Self {
            logical: to.logical()? - from.logical()?,
            price: to.price() - from.price(),
        })
    }

    /// Restricts the delta to the axes a drawing can move along.
    pub fn masked(self, horizontal: bool, vertical: bool) -> Self {
        Self {
            logical: if horizontal { self.logical } else { 0.0 },
            price: if vertical { self.price } else { 0.0 },
        }
    }
}

/// Resolves a pointer event into a chart point.
///
/// Returns `None` when the pointer is outside the pane, no logical index
/// exists at its x, or no price exists at its y.
pub fn event_to_point<M: CoordinateMapper + ?Sized>(
    params: &MouseEventParams,
    mapper: &M,
) -> Option<ChartPoint> {
    let point = params.point?;
    let logical = params.logical?;
    let price = mapper.coordinate_to_price(point.y)?;
    Some(match params.time {
        Some(time) => ChartPoint::at_time(time, Some(logical), price),
        None => ChartPoint::at_logical(logical, price),
    })
}

/// Decides which drag a pointer press starts.
///
/// # Arguments
///
/// * `layout` - Handles the drawing exposes
/// * `p1`, `p2` - Projected anchors
/// * `pointer` - Press position, if known
/// * `tolerance` - Per-axis grab distance; matches are strict
///
/// # Returns
///
/// The dragging state to enter. Falls back to [`InteractionState::Dragging`]
/// whenever an anchor or the pointer has no pixel position.
pub fn classify_drag(
    layout: HandleLayout,
    p1: ViewPoint,
    p2: ViewPoint,
    pointer: Option<PixelPoint>,
    tolerance: f64,
) -> InteractionState {
    let (Some(a), Some(b), Some(pointer)) = (p1.resolved(), p2.resolved(), pointer) else {
        return InteractionState::Dragging;
    };

    let mut candidates = vec![
        (a, InteractionState::DraggingP1),
        (b, InteractionState::DraggingP2),
    ];
    match layout {
        HandleLayout::None => return InteractionState::Dragging,
        HandleLayout::Endpoints => {}
        HandleLayout::Corners => {
            candidates.push((PixelPoint::new(a.x, b.y), InteractionState::DraggingP3));
            candidates.push((PixelPoint::new(b.x, a.y), InteractionState::DraggingP4));
        }
    }

    candidates
        .into_iter()
        .find(|(corner, _)| pointer.near(corner, tolerance))
        .map(|(_, state)| state)
        .unwrap_or(InteractionState::Dragging)
}

/// Applies one drag step to a drawing's anchors.
///
/// Whole-shape drags move every placed anchor. Handle drags move one anchor,
/// or for the cross corners split the delta so that the grabbed corner
/// follows the pointer and the opposite corner stays put.
pub fn apply_drag<M: CoordinateMapper + ?Sized>(
    points: &mut [Option<ChartPoint>],
    state: InteractionState,
    delta: DragDelta,
    mapper: &M,
) {
    let mut shift = |index: usize, logical: f64, price: f64| {
        if let Some(Some(point)) = points.get_mut(index) {
            point.translate(logical, price, mapper);
        }
    };

    match state {
        InteractionState::Dragging => {
            for index in 0..2 {
                shift(index, delta.logical, delta.price);
            }
        }
        InteractionState::DraggingP1 => shift(0, delta.logical, delta.price),
        InteractionState::DraggingP2 => shift(1, delta.logical, delta.price),
        InteractionState::DraggingP3 => {
            shift(0, delta.logical, 0.0);
            shift(1, 0.0, delta.price);
        }
        InteractionState::DraggingP4 => {
            shift(0, 0.0, delta.price);
            shift(1, delta.logical, 0.0);
        }
        InteractionState::None | InteractionState::Hovering => {}
    }
}
