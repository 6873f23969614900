use chartmark_core::{ChartEvent, ChartPoint, PixelPoint};
use chartmark_drawings::{BoxShape, Drawing, DrawingKind, HorizontalLine, TrendLine, VerticalLine};

use crate::common::{click_event, counting_tool, drag, move_event, pixel_of, point};

fn logical_price(p: Option<ChartPoint>) -> (Option<f64>, f64) {
    let p = p.expect("placed point");
    (p.logical(), p.price())
}

fn box_drawing() -> Drawing {
    Drawing::new(BoxShape::new(point(10.0, 100.0), point(20.0, 150.0), Default::default()))
}

#[test]
fn test_cross_corner_p3_moves_logical_of_first_anchor() {
    let (mut tool, calls) = counting_tool();
    tool.add_new_drawing(box_drawing());

    // (x1, y2) corner, dragged five bars right.
    drag(&mut tool, pixel_of(10.0, 150.0), pixel_of(15.0, 150.0));

    let points = tool.drawings()[0].points();
    assert_eq!(logical_price(points[0]), (Some(15.0), 100.0));
    assert_eq!(logical_price(points[1]), (Some(20.0), 150.0));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_cross_corner_p3_moves_price_of_second_anchor() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(box_drawing());

    drag(&mut tool, pixel_of(10.0, 150.0), pixel_of(15.0, 175.0));

    let points = tool.drawings()[0].points();
    assert_eq!(logical_price(points[0]), (Some(15.0), 100.0));
    assert_eq!(logical_price(points[1]), (Some(20.0), 175.0));
}

#[test]
fn test_cross_corner_p4_keeps_opposite_corner() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(box_drawing());

    // (x2, y1) corner to (25, 75); the (x1, y2) corner stays at (10, 150).
    drag(&mut tool, pixel_of(20.0, 100.0), pixel_of(25.0, 75.0));

    let points = tool.drawings()[0].points();
    assert_eq!(logical_price(points[0]), (Some(10.0), 75.0));
    assert_eq!(logical_price(points[1]), (Some(25.0), 150.0));
}

#[test]
fn test_anchor_handle_moves_one_point() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(box_drawing());

    drag(&mut tool, pixel_of(20.0, 150.0), pixel_of(22.0, 175.0));

    let points = tool.drawings()[0].points();
    assert_eq!(logical_price(points[0]), (Some(10.0), 100.0));
    assert_eq!(logical_price(points[1]), (Some(22.0), 175.0));
}

#[test]
fn test_whole_shape_drag() {
    let (mut tool, calls) = counting_tool();
    tool.add_new_drawing(box_drawing());

    drag(&mut tool, pixel_of(15.0, 125.0), pixel_of(17.0, 100.0));

    let points = tool.drawings()[0].points();
    assert_eq!(logical_price(points[0]), (Some(12.0), 75.0));
    assert_eq!(logical_price(points[1]), (Some(22.0), 125.0));
    assert_eq!(calls.get(), 1);

    // Dragged anchors land on bars and become time anchored.
    assert!(points[0].unwrap().time().is_some());
}

#[test]
fn test_trend_line_endpoint_drag() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(Drawing::new(TrendLine::new(
        point(10.0, 100.0),
        point(20.0, 150.0),
        Default::default(),
    )));

    drag(&mut tool, pixel_of(10.0, 100.0), pixel_of(13.0, 125.0));

    let points = tool.drawings()[0].points();
    assert_eq!(logical_price(points[0]), (Some(13.0), 125.0));
    assert_eq!(logical_price(points[1]), (Some(20.0), 150.0));
}

#[test]
fn test_horizontal_line_moves_price_only() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(Drawing::new(HorizontalLine::new(point(5.0, 100.0), Default::default())));

    drag(&mut tool, pixel_of(5.0, 100.0), pixel_of(12.0, 125.0));

    assert_eq!(logical_price(tool.drawings()[0].points()[0]), (Some(5.0), 125.0));
}

#[test]
fn test_vertical_line_moves_logical_only() {
    let (mut tool, _) = counting_tool();
    tool.add_new_drawing(Drawing::new(VerticalLine::new(point(5.0, 100.0), Default::default())));

    drag(&mut tool, pixel_of(5.0, 100.0), pixel_of(12.0, 125.0));

    assert_eq!(logical_price(tool.drawings()[0].points()[0]), (Some(12.0), 100.0));
}

#[test]
fn test_held_pointer_does_not_start_hover() {
    let (mut tool, calls) = counting_tool();
    tool.add_new_drawing(box_drawing());

    tool.handle_event(ChartEvent::PointerDown(PixelPoint::new(500.0, 500.0)));
    let over = move_event(tool.host(), 150.0, 225.0);
    tool.handle_event(over);

    assert_eq!(tool.hovered(), None);
    assert_eq!(logical_price(tool.drawings()[0].points()[0]), (Some(10.0), 100.0));
    assert_eq!(calls.get(), 0);

    tool.handle_event(ChartEvent::PointerUp);
    let over = move_event(tool.host(), 150.0, 225.0);
    tool.handle_event(over);
    assert!(tool.hovered().is_some());
}

#[test]
fn test_every_drag_move_persists() {
    let (mut tool, calls) = counting_tool();
    tool.add_new_drawing(Drawing::new(HorizontalLine::new(point(5.0, 100.0), Default::default())));

    let at = pixel_of(5.0, 100.0);
    let hover = move_event(tool.host(), at.x, at.y);
    tool.handle_event(hover);
    tool.handle_event(ChartEvent::PointerDown(at));
    for price in [110.0, 120.0, 125.0] {
        let to = pixel_of(5.0, price);
        let moved = move_event(tool.host(), to.x, to.y);
        tool.handle_event(moved);
    }
    tool.handle_event(ChartEvent::PointerUp);

    assert_eq!(logical_price(tool.drawings()[0].points()[0]), (Some(5.0), 125.0));
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_drag_while_drawing_waits_for_commit() {
    let (mut tool, calls) = counting_tool();
    tool.add_new_drawing(Drawing::new(HorizontalLine::new(point(5.0, 100.0), Default::default())));
    tool.begin_drawing(DrawingKind::TrendLine);

    drag(&mut tool, pixel_of(5.0, 100.0), pixel_of(5.0, 125.0));
    assert_eq!(logical_price(tool.drawings()[0].points()[0]), (Some(5.0), 125.0));
    assert_eq!(calls.get(), 0);

    let first = click_event(tool.host(), pixel_of(30.0, 150.0).x, pixel_of(30.0, 150.0).y);
    tool.handle_event(first);
    assert_eq!(calls.get(), 0);

    let second = click_event(tool.host(), pixel_of(40.0, 160.0).x, pixel_of(40.0, 160.0).y);
    tool.handle_event(second);
    assert!(!tool.is_drawing());
    assert_eq!(tool.drawings().len(), 2);
    assert_eq!(calls.get(), 1);
}
