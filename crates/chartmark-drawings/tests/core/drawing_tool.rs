use chartmark_core::{ChartEvent, CursorStyle, DrawingId, HostEventKind, Key, KeyEvent};
use chartmark_drawings::{BoxShape, Drawing, DrawingKind, Measure, RenderCommand};

use crate::common::{counting_tool, move_event, point};

fn boxed(p1: (f64, f64), p2: (f64, f64)) -> Drawing {
    Drawing::new(BoxShape::new(point(p1.0, p1.1), point(p2.0, p2.1), Default::default()))
}

#[test]
fn test_two_click_creation() {
    let (mut tool, calls) = counting_tool();
    tool.begin_drawing(DrawingKind::Measure);

    tool.simulate_click(100.0, 300.0);
    let active = tool.active().expect("first click starts a drawing");
    assert_eq!(active.points().len(), 2);
    assert_eq!(active.points()[0], active.points()[1]);
    assert!(tool.host().is_attached(active.id()));
    assert!(tool.drawings().is_empty());
    assert_eq!(calls.get(), 0);

    tool.simulate_click(200.0, 150.0);
    assert!(tool.active().is_none());
    assert!(!tool.is_drawing());
    assert_eq!(tool.drawings().len(), 1);
    assert_eq!(calls.get(), 1);

    let drawing = &tool.drawings()[0];
    let start = drawing.points()[0].unwrap();
    let end = drawing.points()[1].unwrap();
    assert_eq!((start.logical(), start.price()), (Some(10.0), 100.0));
    assert_eq!((end.logical(), end.price()), (Some(20.0), 150.0));
    assert!(start.time().is_some());
    assert!(tool.host().is_attached(drawing.id()));
}

#[test]
fn test_move_updates_active_drawing() {
    let (mut tool, calls) = counting_tool();
    tool.begin_drawing(DrawingKind::TrendLine);
    tool.simulate_click(100.0, 300.0);

    let moved = move_event(tool.host(), 150.0, 450.0);
    tool.handle_event(moved);

    let end = tool.active().unwrap().points()[1].unwrap();
    assert_eq!(end.logical(), Some(15.0));
    assert_eq!(end.price(), 50.0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_single_point_kind_commits_on_first_click() {
    let (mut tool, calls) = counting_tool();
    tool.begin_drawing(DrawingKind::HorizontalLine);
    tool.simulate_click(50.0, 150.0);

    assert!(tool.active().is_none());
    assert!(!tool.is_drawing());
    assert_eq!(tool.drawings().len(), 1);
    assert_eq!(tool.drawings()[0].points().len(), 1);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_click_outside_price_range_is_ignored() {
    let (mut tool, calls) = counting_tool();
    tool.begin_drawing(DrawingKind::Box);
    tool.simulate_click(100.0, 700.0);

    assert!(tool.active().is_none());
    assert!(tool.is_drawing());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_click_without_drawing_mode_does_nothing() {
    let (mut tool, calls) = counting_tool();
    tool.simulate_click(100.0, 300.0);
    assert!(tool.active().is_none());
    assert!(tool.drawings().is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_stop_drawing_detaches_unfinished() {
    let (mut tool, calls) = counting_tool();
    tool.begin_drawing(DrawingKind::Box);
    tool.simulate_click(100.0, 300.0);
    let id = tool.active().unwrap().id();

    tool.stop_drawing();
    assert!(!tool.is_drawing());
    assert!(tool.active().is_none());
    assert!(!tool.host().is_attached(id));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_delete_non_member_is_noop() {
    let (mut tool, calls) = counting_tool();
    let id = tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));
    assert_eq!(calls.get(), 0);

    assert!(!tool.delete(DrawingId::new()));
    assert_eq!(tool.drawings().len(), 1);
    assert_eq!(calls.get(), 0);

    assert!(tool.delete(id));
    assert!(tool.drawings().is_empty());
    assert!(!tool.host().is_attached(id));
    assert_eq!(calls.get(), 1);

    assert!(!tool.delete(id));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_clear_drawings() {
    let (mut tool, calls) = counting_tool();
    for i in 0..3 {
        let offset = i as f64 * 5.0;
        tool.add_new_drawing(boxed((10.0 + offset, 100.0), (20.0 + offset, 150.0)));
    }
    assert_eq!(tool.host().attached().len(), 3);

    tool.clear_drawings();
    assert!(tool.drawings().is_empty());
    assert!(tool.host().attached().is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_undo_last_removes_newest() {
    let (mut tool, calls) = counting_tool();
    let first = tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));
    let second = tool.add_new_drawing(boxed((30.0, 100.0), (40.0, 150.0)));

    assert_eq!(tool.undo_last(), Some(second));
    assert_eq!(tool.drawings().len(), 1);
    assert_eq!(tool.drawings()[0].id(), first);
    assert_eq!(calls.get(), 1);

    assert_eq!(tool.undo_last(), Some(first));
    assert_eq!(tool.undo_last(), None);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_hover_on_top_edge() {
    let (mut tool, _) = counting_tool();
    // Box spans x 100..200, y 150..300.
    let id = tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));

    let near = move_event(tool.host(), 150.0, 148.0);
    tool.handle_event(near);
    assert_eq!(tool.hovered(), Some(id));
    assert_eq!(tool.host().cursor(), CursorStyle::Pointer);

    let far = move_event(tool.host(), 150.0, 140.0);
    tool.handle_event(far);
    assert_eq!(tool.hovered(), None);
    assert_eq!(tool.host().cursor(), CursorStyle::Default);
}

#[test]
fn test_measure_label_is_hoverable() {
    let (mut tool, _) = counting_tool();
    let id = tool.add_new_drawing(Drawing::new(Measure::new(
        point(10.0, 100.0),
        point(20.0, 150.0),
        Default::default(),
    )));

    // Label hit box: x 75..225, y 85..135.
    let over_label = move_event(tool.host(), 150.0, 100.0);
    tool.handle_event(over_label);
    assert_eq!(tool.hovered(), Some(id));

    let between = move_event(tool.host(), 150.0, 141.0);
    tool.handle_event(between);
    assert_eq!(tool.hovered(), None);
}

#[test]
fn test_hover_is_exclusive() {
    let (mut tool, _) = counting_tool();
    let first = tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));
    tool.add_new_drawing(boxed((12.0, 110.0), (22.0, 160.0)));

    let inside_both = move_event(tool.host(), 150.0, 200.0);
    tool.handle_event(inside_both);

    assert_eq!(tool.hovered(), Some(first));
    assert!(tool.drawings()[0].is_hovered());
    assert!(!tool.drawings()[1].is_hovered());
}

#[test]
fn test_delete_key_removes_hovered() {
    let (mut tool, calls) = counting_tool();
    tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));

    tool.handle_event(ChartEvent::KeyDown(KeyEvent::plain(Key::Delete)));
    assert_eq!(tool.drawings().len(), 1);

    let over = move_event(tool.host(), 150.0, 200.0);
    tool.handle_event(over);
    tool.handle_event(ChartEvent::KeyDown(KeyEvent::plain(Key::Delete)));

    assert!(tool.drawings().is_empty());
    assert_eq!(tool.hovered(), None);
    assert_eq!(tool.host().cursor(), CursorStyle::Default);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_reposition_follows_scroll() {
    let (mut tool, _) = counting_tool();
    let bar = tool.host().scale().bar_time(20).unwrap();
    let line = chartmark_drawings::VerticalLine::new(
        chartmark_core::ChartPoint::at_time(bar, None, 100.0),
        Default::default(),
    );
    tool.add_new_drawing(Drawing::new(line));
    assert_eq!(tool.drawings()[0].views()[0].x, Some(200.0));
    assert_eq!(tool.drawings()[0].points()[0].unwrap().logical(), Some(20.0));

    tool.host_mut().scale_mut().scroll_by(5.0);
    tool.reposition_on_time();

    let drawing = &tool.drawings()[0];
    assert_eq!(drawing.views()[0].x, Some(150.0));
    assert_eq!(drawing.points()[0].unwrap().time(), Some(bar));
    assert_eq!(drawing.points()[0].unwrap().price(), 100.0);
}

#[test]
fn test_render_measure_labels() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(Drawing::new(Measure::new(
        point(10.0, 100.0),
        point(20.0, 150.0),
        Default::default(),
    )));

    let frames = tool.render();
    assert_eq!(frames.len(), 1);
    let texts: Vec<&str> = frames[0]
        .1
        .iter()
        .filter_map(|command| match command {
            RenderCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["↑ 50.00 (50.00%)", "11 bars"]);

    // Not hovered: no handles.
    assert!(!frames[0]
        .1
        .iter()
        .any(|command| matches!(command, RenderCommand::Circle { .. })));
}

#[test]
fn test_render_orders_active_last() {
    let (mut tool, _) = counting_tool();
    let committed = tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));
    tool.begin_drawing(DrawingKind::TrendLine);
    tool.simulate_click(300.0, 300.0);
    let active = tool.active().unwrap().id();

    let ids: Vec<DrawingId> = tool.render().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec![committed, active]);
}

#[test]
fn test_teardown_releases_subscriptions() {
    let (mut tool, calls) = counting_tool();
    assert_eq!(tool.host().subscription_count(), 5);
    assert!(tool.host().is_subscribed(HostEventKind::CrosshairMove));

    tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));
    tool.begin_drawing(DrawingKind::Box);
    tool.simulate_click(300.0, 300.0);

    tool.teardown();
    assert_eq!(tool.host().subscription_count(), 0);
    assert!(tool.host().attached().is_empty());
    assert!(tool.drawings().is_empty());
    assert_eq!(calls.get(), 0);

    // Events after teardown are ignored, and a second teardown is harmless.
    tool.begin_drawing(DrawingKind::HorizontalLine);
    let click = crate::common::click_event(tool.host(), 50.0, 150.0);
    tool.handle_event(click);
    assert!(tool.drawings().is_empty());
    tool.teardown();
    assert_eq!(tool.host().subscription_count(), 0);
}

#[test]
fn test_scroll_is_disabled_while_dragging() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(boxed((10.0, 100.0), (20.0, 150.0)));

    let over = move_event(tool.host(), 150.0, 200.0);
    tool.handle_event(over);
    assert!(tool.host().scroll_enabled());

    tool.handle_event(ChartEvent::PointerDown(chartmark_core::PixelPoint::new(150.0, 200.0)));
    assert!(!tool.host().scroll_enabled());
    assert_eq!(tool.host().cursor(), CursorStyle::Grabbing);

    tool.handle_event(ChartEvent::PointerUp);
    assert!(tool.host().scroll_enabled());
    assert_eq!(tool.host().cursor(), CursorStyle::Pointer);
}
