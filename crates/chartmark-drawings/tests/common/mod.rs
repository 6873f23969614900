//! Shared fixtures for the drawings integration tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chartmark_core::{ChartEvent, ChartPoint, HeadlessHost, MouseEventParams, PixelPoint};
use chartmark_drawings::{Drawing, DrawingTool, SaveSink, ToolBox};
use chartmark_settings::Config;

/// A tool on a default headless chart that counts persistence callbacks.
pub fn counting_tool() -> (DrawingTool<HeadlessHost>, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let tool = DrawingTool::new(HeadlessHost::default(), Config::default())
        .with_persist_callback(Box::new(move |_: &[Drawing]| counter.set(counter.get() + 1)));
    (tool, calls)
}

/// A toolbox whose save sink records every saved document.
pub fn recording_toolbox() -> (ToolBox<HeadlessHost>, Rc<RefCell<Vec<String>>>) {
    let saved = Rc::new(RefCell::new(Vec::new()));
    let sink_log = Rc::clone(&saved);
    let sink: SaveSink = Box::new(move |json| sink_log.borrow_mut().push(json));
    let toolbox = ToolBox::new(HeadlessHost::default(), Config::default(), sink);
    (toolbox, saved)
}

/// Default scale: x = logical * 10, y = (200 - price) * 3.
pub fn pixel_of(logical: f64, price: f64) -> PixelPoint {
    PixelPoint::new(logical * 10.0, (200.0 - price) * 3.0)
}

pub fn point(logical: f64, price: f64) -> ChartPoint {
    ChartPoint::at_logical(logical, price)
}

pub fn move_event(host: &HeadlessHost, x: f64, y: f64) -> ChartEvent {
    ChartEvent::CrosshairMove(MouseEventParams::at_pixel(host, x, y))
}

pub fn click_event(host: &HeadlessHost, x: f64, y: f64) -> ChartEvent {
    ChartEvent::Click(MouseEventParams::at_pixel(host, x, y))
}

/// Moves the pointer over `at`, presses, moves to `to` and releases.
pub fn drag(tool: &mut DrawingTool<HeadlessHost>, at: PixelPoint, to: PixelPoint) {
    let hover = move_event(tool.host(), at.x, at.y);
    tool.handle_event(hover);
    tool.handle_event(ChartEvent::PointerDown(at));
    let moved = move_event(tool.host(), to.x, to.y);
    tool.handle_event(moved);
    tool.handle_event(ChartEvent::PointerUp);
}
