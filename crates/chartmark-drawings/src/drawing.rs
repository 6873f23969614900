//! A placed annotation and its interaction state.

use chartmark_core::{
    ChartHost, ChartPoint, CoordinateMapper, DrawingId, MouseEventParams, PixelPoint, ViewPoint,
};
use chartmark_settings::Config;

use crate::interaction::{classify_drag, event_to_point, DragDelta, HoverOutcome, InteractionState};
use crate::model::{AnnotationShape, DrawingKind, Shape};
use crate::render::{RenderCommand, RenderContext};

/// An annotation attached to a chart.
///
/// Wraps a [`Shape`] with its identity, its interaction state and the pixel
/// projection of its points from the last refresh.
#[derive(Debug, Clone)]
pub struct Drawing {
    id: DrawingId,
    shape: Shape,
    state: InteractionState,
    latest_hover: Option<PixelPoint>,
    drag_origin: Option<ChartPoint>,
    views: Vec<ViewPoint>,
}

impl Drawing {
    pub fn new(shape: impl Into<Shape>) -> Self {
        let shape = shape.into();
        let views = vec![ViewPoint::default(); shape.points().len()];
        Self {
            id: DrawingId::new(),
            shape,
            state: InteractionState::None,
            latest_hover: None,
            drag_origin: None,
            views,
        }
    }

    pub fn id(&self) -> DrawingId {
        self.id
    }

    pub fn kind(&self) -> DrawingKind {
        self.shape.kind()
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn points(&self) -> &[Option<ChartPoint>] {
        self.shape.points()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Hovered or being dragged.
    pub fn is_hovered(&self) -> bool {
        self.state != InteractionState::None
    }

    /// Pixel projection from the last [`Drawing::refresh_view`].
    pub fn views(&self) -> &[ViewPoint] {
        &self.views
    }

    /// Re-projects every placed point. Unplaced points project to nothing.
    pub fn refresh_view<M: CoordinateMapper + ?Sized>(&mut self, mapper: &M) {
        self.views = self
            .shape
            .points()
            .iter()
            .map(|p| p.map(|p| mapper.project(&p)).unwrap_or_default())
            .collect();
    }

    /// Recomputes derived coordinates of every placed point from its anchor.
    pub fn remap<M: CoordinateMapper + ?Sized>(&mut self, mapper: &M) {
        for point in self.shape.points_mut().iter_mut().flatten() {
            *point = point.remap(mapper);
        }
        self.refresh_view(mapper);
    }

    /// Replaces the last point, used while the second click is pending.
    pub fn set_last_point(&mut self, point: ChartPoint) {
        if let Some(slot) = self.shape.points_mut().last_mut() {
            *slot = Some(point);
        }
    }

    fn move_to_state<H: ChartHost>(&mut self, state: InteractionState, host: &mut H) {
        host.set_cursor(state.cursor());
        match state {
            InteractionState::None => {}
            InteractionState::Hovering => host.set_scroll_enabled(true),
            _ => host.set_scroll_enabled(false),
        }
        tracing::trace!("{} {:?} -> {:?}", self.id, self.state, state);
        self.state = state;
    }

    /// Feeds one pointer move.
    ///
    /// # Arguments
    ///
    /// * `params` - The move event
    /// * `pointer_held` - Whether the pointer button is down
    /// * `hover_available` - False once another drawing claimed this dispatch
    /// * `host` - Chart host for cursor, scroll and coordinate conversion
    /// * `settings` - Hit tolerances and label metrics
    pub fn handle_hover<H: ChartHost>(
        &mut self,
        params: &MouseEventParams,
        pointer_held: bool,
        hover_available: bool,
        host: &mut H,
        settings: &Config,
    ) -> HoverOutcome {
        self.latest_hover = params.point;

        if pointer_held {
            if self.drag_step(params, host) {
                return HoverOutcome::Dragged;
            }
            return self.outcome();
        }

        let over = hover_available
            && params
                .point
                .is_some_and(|p| self.shape.contains_point(&self.views, p, settings));

        if over {
            if self.state == InteractionState::None {
                self.move_to_state(InteractionState::Hovering, host);
            }
        } else if self.state != InteractionState::None {
            self.move_to_state(InteractionState::None, host);
        }
        self.outcome()
    }

    fn outcome(&self) -> HoverOutcome {
        if self.is_hovered() {
            HoverOutcome::Hovering
        } else {
            HoverOutcome::Idle
        }
    }

    fn drag_step<H: ChartHost>(&mut self, params: &MouseEventParams, host: &mut H) -> bool {
        if !self.state.is_dragging() {
            return false;
        }
        let Some(sample) = event_to_point(params, &*host) else {
            return false;
        };
        let origin = self.drag_origin.unwrap_or(sample);
        let Some(delta) = DragDelta::between(&origin, &sample) else {
            return false;
        };

        let mapper: &dyn CoordinateMapper = &*host;
        self.shape.drag(self.state, delta, mapper);
        self.drag_origin = Some(sample);
        self.refresh_view(&*host);
        host.request_repaint();
        true
    }

    /// Starts a drag if the drawing is hovered. Returns whether it did.
    pub fn pointer_down<H: ChartHost>(
        &mut self,
        at: Option<PixelPoint>,
        host: &mut H,
        settings: &Config,
    ) -> bool {
        if self.state != InteractionState::Hovering {
            return false;
        }
        if at.is_some() {
            self.latest_hover = at;
        }
        self.drag_origin = self
            .latest_hover
            .map(|p| MouseEventParams::at_pixel(&*host, p.x, p.y))
            .and_then(|params| event_to_point(&params, &*host));

        let view = |i: usize| self.views.get(i).copied().unwrap_or_default();
        let state = classify_drag(
            self.shape.handles(),
            view(0),
            view(1),
            self.latest_hover,
            settings.interaction.handle_tolerance,
        );
        self.move_to_state(state, host);
        true
    }

    /// Ends a drag, returning to hovering.
    pub fn pointer_up<H: ChartHost>(&mut self, host: &mut H) {
        if self.state.is_dragging() {
            self.drag_origin = None;
            self.move_to_state(InteractionState::Hovering, host);
        }
    }

    /// Drops any hover or drag without touching the host.
    pub fn reset(&mut self) {
        self.state = InteractionState::None;
        self.drag_origin = None;
        self.latest_hover = None;
    }

    pub fn render(&self, ctx: &RenderContext<'_>) -> Vec<RenderCommand> {
        let ctx = ctx.with_hovered(self.is_hovered());
        self.shape.render(&self.views, &ctx)
    }
}
