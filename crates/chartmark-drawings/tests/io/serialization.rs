use chartmark_core::{ChartPoint, Timestamp};
use chartmark_drawings::{
    load_drawings, save_drawings, AnnotationShape, BoxShape, Drawing, DrawingKind, DrawingOptions,
    DrawingsFile, FillOptions, HorizontalLine, LineStyle, LineTextOptions, Measure, TrendLine,
};
use serde_json::Value;
use tempfile::TempDir;

use crate::common::point;

fn sample_drawings() -> Vec<Drawing> {
    let styled = DrawingOptions {
        line_color: "#FF0000".to_string(),
        line_style: LineStyle::Dashed,
        width: 2.0,
    };
    vec![
        Drawing::new(Measure::new(point(10.0, 100.0), point(20.0, 150.0), Default::default())),
        Drawing::new(BoxShape::new(
            ChartPoint::at_time(Timestamp(1_700_000_600), Some(10.0), 90.0),
            point(14.0, 95.5),
            FillOptions {
                line: styled.clone(),
                fill_enabled: false,
                fill_color: "rgba(0, 0, 0, 0.5)".to_string(),
            },
        )),
        Drawing::new(TrendLine::new(point(1.0, 10.0), point(5.0, 20.0), styled.clone())),
        Drawing::new(HorizontalLine::new(
            point(7.0, 42.0),
            LineTextOptions {
                line: styled,
                text: "support".to_string(),
            },
        )),
    ]
}

#[test]
fn test_save_load_round_trip() {
    let drawings = sample_drawings();
    let json = save_drawings(&drawings).unwrap();

    let loaded = load_drawings(&json).unwrap();
    assert_eq!(loaded.len(), drawings.len());
    for (before, restored) in drawings.iter().zip(&loaded) {
        assert_eq!(before.shape(), restored.shape());
        assert_ne!(before.id(), restored.id());
    }
    assert_eq!(save_drawings(&loaded).unwrap(), json);
}

#[test]
fn test_record_order_and_fields() {
    let json = save_drawings(&sample_drawings()).unwrap();
    let records: Vec<Value> = serde_json::from_str(&json).unwrap();

    let kinds: Vec<&str> = records.iter().map(|r| r["type"].as_str().unwrap()).collect();
    assert_eq!(kinds, vec!["Measure", "Box", "TrendLine", "HorizontalLine"]);

    let box_record = &records[1];
    assert_eq!(box_record["points"][0]["time"], 1_700_000_600);
    assert_eq!(box_record["points"][0]["logical"], 10.0);
    assert!(box_record["points"][1].get("time").is_none());
    assert_eq!(box_record["options"]["fillEnabled"], false);
    assert_eq!(box_record["options"]["lineStyle"], 2);
    assert_eq!(records[3]["options"]["text"], "support");
}

#[test]
fn test_bad_records_are_skipped() {
    let json = r#"[
        {"type":"Fibonacci","points":[],"options":{}},
        {"type":"Box","points":[{"logical":1,"price":10},{"logical":2,"price":20}],"options":{}},
        {"type":"Box","points":[{"logical":1,"price":10}],"options":{}},
        {"type":"TrendLine","points":[{"logical":1,"price":10},{"logical":2,"price":20}],"options":{"width":"wide"}},
        {"type":"VerticalLine","points":[{"price":10}],"options":{}},
        {"points":[]},
        {"type":"VerticalLine","points":[{"logical":9,"price":10}]}
    ]"#;

    let loaded = load_drawings(json).unwrap();
    let kinds: Vec<DrawingKind> = loaded.iter().map(Drawing::kind).collect();
    assert_eq!(kinds, vec![DrawingKind::Box, DrawingKind::VerticalLine]);
}

#[test]
fn test_null_points_survive_round_trip() {
    let json = r#"[{"type":"Measure","points":[{"logical":1,"price":10},null],"options":{}}]"#;
    let loaded = load_drawings(json).unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded[0].points()[1].is_none());

    let saved: Value = serde_json::from_str(&save_drawings(&loaded).unwrap()).unwrap();
    assert!(saved[0]["points"][1].is_null());
}

#[test]
fn test_empty_collection() {
    assert_eq!(save_drawings(&[]).unwrap(), "[]");
    assert!(load_drawings("[]").unwrap().is_empty());
}

#[test]
fn test_drawings_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drawings.json");

    let drawings = sample_drawings();
    let file = DrawingsFile::from_drawings(&drawings).unwrap();
    file.save_to_file(&path).unwrap();

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["version"], "1.0");
    assert!(raw["savedAt"].is_string());

    let loaded = DrawingsFile::load_from_file(&path).unwrap();
    assert_eq!(loaded.saved_at, file.saved_at);
    let restored = loaded.drawings();
    assert_eq!(restored.len(), drawings.len());
    for (before, restored) in drawings.iter().zip(&restored) {
        assert_eq!(before.shape().points(), restored.shape().points());
        assert_eq!(before.shape().options_value().unwrap(), restored.shape().options_value().unwrap());
    }
}

#[test]
fn test_drawings_file_errors() {
    let dir = TempDir::new().unwrap();
    assert!(DrawingsFile::load_from_file(dir.path().join("missing.json")).is_err());

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();
    let err = DrawingsFile::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("parse"));
}
