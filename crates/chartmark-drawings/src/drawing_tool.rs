//! Drawing tool: owns the annotations on one chart pane and routes host
//! events to them.
//!
//! The tool keeps an ordered collection of committed drawings (insertion
//! order is z-order and undo order) plus at most one in-progress drawing that
//! is attached to the host but not yet committed. Clicks build new drawings
//! while a kind is armed; pointer moves drive the hover and drag state of
//! every committed drawing.

use chartmark_core::{
    ChartEvent, ChartHost, CursorStyle, DrawingId, HostEventKind, Key, KeyEvent, MouseEventParams, PixelPoint,
    SubscriptionId,
};
use chartmark_settings::Config;

use crate::drawing::Drawing;
use crate::interaction::{event_to_point, HoverOutcome, InteractionState};
use crate::model::DrawingKind;
use crate::registry;
use crate::render::{RenderCommand, RenderContext};

/// Invoked after every user-visible change to the committed collection.
pub type PersistCallback = Box<dyn FnMut(&[Drawing])>;

const SUBSCRIBED_EVENTS: [HostEventKind; 5] = [
    HostEventKind::Click,
    HostEventKind::CrosshairMove,
    HostEventKind::PointerDown,
    HostEventKind::PointerUp,
    HostEventKind::KeyDown,
];

pub struct DrawingTool<H: ChartHost> {
    host: H,
    settings: Config,
    drawings: Vec<Drawing>,
    active: Option<Drawing>,
    pending_kind: Option<DrawingKind>,
    is_drawing: bool,
    pointer_held: bool,
    on_persist: Option<PersistCallback>,
    subscriptions: Vec<SubscriptionId>,
}

impl<H: ChartHost> DrawingTool<H> {
    /// Creates a tool on `host` and subscribes to its pointer and key events.
    pub fn new(mut host: H, settings: Config) -> Self {
        let subscriptions = SUBSCRIBED_EVENTS
            .iter()
            .map(|kind| host.subscribe(*kind))
            .collect();

        Self {
            host,
            settings,
            drawings: Vec::new(),
            active: None,
            pending_kind: None,
            is_drawing: false,
            pointer_held: false,
            on_persist: None,
            subscriptions,
        }
    }

    pub fn with_persist_callback(mut self, callback: PersistCallback) -> Self {
        self.on_persist = Some(callback);
        self
    }

    pub fn set_persist_callback(&mut self, callback: Option<PersistCallback>) {
        self.on_persist = callback;
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn settings(&self) -> &Config {
        &self.settings
    }

    /// Committed drawings in z-order.
    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    /// The drawing being placed, if any.
    pub fn active(&self) -> Option<&Drawing> {
        self.active.as_ref()
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn pending_kind(&self) -> Option<DrawingKind> {
        self.pending_kind
    }

    /// Whether the tool still holds its host subscriptions.
    pub fn is_live(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Arms drawing mode for `kind`. A later call before the first click replaces the kind.
    pub fn begin_drawing(&mut self, kind: DrawingKind) {
        tracing::debug!("Begin drawing {}", kind);
        self.pending_kind = Some(kind);
        self.is_drawing = true;
    }

    /// Leaves drawing mode and discards the uncommitted drawing.
    pub fn stop_drawing(&mut self) {
        self.is_drawing = false;
        self.pending_kind = None;
        if let Some(active) = self.active.take() {
            self.host.detach_primitive(active.id());
            tracing::debug!("Discarded unfinished {}", active.kind());
        }
    }

    /// Attaches a drawing to the host and appends it to the collection.
    pub fn add_new_drawing(&mut self, mut drawing: Drawing) -> DrawingId {
        let id = drawing.id();
        drawing.remap(&self.host);
        self.host.attach_primitive(id);
        self.drawings.push(drawing);
        self.host.request_repaint();
        id
    }

    /// Detaches and removes a committed drawing.
    ///
    /// # Returns
    ///
    /// `true` if the drawing was a member. Unknown ids are a no-op and do not
    /// trigger the persistence callback.
    pub fn delete(&mut self, id: DrawingId) -> bool {
        let Some(index) = self.drawings.iter().position(|d| d.id() == id) else {
            return false;
        };
        let mut drawing = self.drawings.remove(index);
        if drawing.is_hovered() {
            self.host.set_cursor(CursorStyle::Default);
            self.host.set_scroll_enabled(true);
        }
        drawing.reset();
        self.host.detach_primitive(id);
        self.host.request_repaint();
        tracing::debug!("Deleted {} {}", drawing.kind(), id);

        self.persist();
        true
    }

    /// Detaches and removes every committed drawing without persisting.
    pub fn clear_drawings(&mut self) {
        for drawing in self.drawings.drain(..) {
            self.host.detach_primitive(drawing.id());
        }
        self.host.request_repaint();
    }

    /// Deletes the most recently committed drawing.
    pub fn undo_last(&mut self) -> Option<DrawingId> {
        let id = self.drawings.last()?.id();
        self.delete(id).then_some(id)
    }

    /// The drawing under the pointer, if any. At most one is hovered at a time.
    pub fn hovered(&self) -> Option<DrawingId> {
        self.drawings
            .iter()
            .find(|d| d.is_hovered())
            .map(Drawing::id)
    }

    /// Re-derives pixel and logical positions after the view changed.
    ///
    /// Prices and authoritative anchors are untouched and unplaced points stay
    /// unplaced, so repeated calls without a view change are idempotent.
    pub fn reposition_on_time(&mut self) {
        for drawing in self.drawings.iter_mut().chain(self.active.as_mut()) {
            drawing.remap(&self.host);
        }
        self.host.request_repaint();
    }

    /// Hands the committed collection to the persistence callback.
    pub fn persist(&mut self) {
        if let Some(callback) = self.on_persist.as_mut() {
            callback(&self.drawings);
        }
    }

    /// Routes a host event. Ignored after [`DrawingTool::teardown`].
    pub fn handle_event(&mut self, event: ChartEvent) {
        if !self.is_live() {
            return;
        }
        match event {
            ChartEvent::Click(params) => self.on_click(&params),
            ChartEvent::CrosshairMove(params) => self.on_crosshair_move(&params),
            ChartEvent::PointerDown(at) => self.on_pointer_down(at),
            ChartEvent::PointerUp => self.on_pointer_up(),
            ChartEvent::KeyDown(key) => self.on_key_down(key),
        }
    }

    /// Builds a click from pane pixels and routes it. Only effective while drawing.
    pub fn simulate_click(&mut self, x: f64, y: f64) {
        if !self.is_drawing {
            return;
        }
        let params = MouseEventParams::at_pixel(&self.host, x, y);
        self.on_click(&params);
    }

    fn on_click(&mut self, params: &MouseEventParams) {
        if !self.is_drawing {
            return;
        }
        let Some(point) = event_to_point(params, &self.host) else {
            tracing::trace!("Click outside the plotted range ignored");
            return;
        };

        if let Some(mut active) = self.active.take() {
            active.set_last_point(point);
            self.commit(active);
            return;
        }

        let Some(kind) = self.pending_kind else {
            return;
        };
        let shape = match registry::instantiate(kind, point) {
            Ok(shape) => shape,
            Err(e) => {
                tracing::warn!("Could not create {}: {}", kind, e);
                return;
            }
        };

        let mut drawing = Drawing::new(shape);
        drawing.refresh_view(&self.host);
        self.host.attach_primitive(drawing.id());

        if kind.arity() == 1 {
            self.commit(drawing);
        } else {
            self.active = Some(drawing);
            self.host.request_repaint();
        }
    }

    fn commit(&mut self, mut drawing: Drawing) {
        drawing.refresh_view(&self.host);
        tracing::debug!("Committed {} {}", drawing.kind(), drawing.id());
        self.drawings.push(drawing);
        self.stop_drawing();
        self.host.request_repaint();
        self.persist();
    }

    fn on_crosshair_move(&mut self, params: &MouseEventParams) {
        let mut claimed = false;
        let mut dragged = false;

        for drawing in self.drawings.iter_mut() {
            let outcome = drawing.handle_hover(
                params,
                self.pointer_held,
                !claimed,
                &mut self.host,
                &self.settings,
            );
            match outcome {
                HoverOutcome::Idle => {}
                HoverOutcome::Hovering => claimed = true,
                HoverOutcome::Dragged => {
                    claimed = true;
                    dragged = true;
                }
            }
        }

        if dragged && !self.is_drawing {
            self.persist();
        }

        if !self.is_drawing {
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let Some(point) = event_to_point(params, &self.host) else {
            return;
        };
        active.set_last_point(point);
        active.refresh_view(&self.host);
        self.host.request_repaint();
    }

    fn on_pointer_down(&mut self, at: PixelPoint) {
        self.pointer_held = true;
        if let Some(drawing) = self
            .drawings
            .iter_mut()
            .find(|d| d.state() == InteractionState::Hovering)
        {
            drawing.pointer_down(Some(at), &mut self.host, &self.settings);
        }
    }

    fn on_pointer_up(&mut self) {
        self.pointer_held = false;
        for drawing in self.drawings.iter_mut().filter(|d| d.state().is_dragging()) {
            drawing.pointer_up(&mut self.host);
        }
    }

    fn on_key_down(&mut self, event: KeyEvent) {
        if event.key != Key::Delete {
            return;
        }
        if let Some(id) = self.hovered() {
            self.delete(id);
        }
    }

    /// Projects every drawing and returns its draw commands in z-order,
    /// committed drawings first and the drawing being placed last.
    pub fn render(&mut self) -> Vec<(DrawingId, Vec<RenderCommand>)> {
        for drawing in self.drawings.iter_mut().chain(self.active.as_mut()) {
            drawing.refresh_view(&self.host);
        }

        let ctx = RenderContext::new(
            &self.settings,
            self.host.pane_size(),
            self.host.price_precision(),
        );
        self.drawings
            .iter()
            .chain(self.active.as_ref())
            .map(|d| (d.id(), d.render(&ctx)))
            .collect()
    }

    /// Releases every host subscription and detaches every drawing.
    ///
    /// Idempotent; also run on drop. Does not persist.
    pub fn teardown(&mut self) {
        if !self.is_live() {
            return;
        }
        for id in self.subscriptions.drain(..) {
            self.host.unsubscribe(id);
        }
        self.stop_drawing();
        self.clear_drawings();
        self.pointer_held = false;
        tracing::debug!("Drawing tool torn down");
    }
}

impl<H: ChartHost> Drop for DrawingTool<H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
