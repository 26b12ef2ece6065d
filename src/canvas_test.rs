#![allow(clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::dimension::DimensionSpec;

fn table(n: u128, x: f64, y: f64) -> LayoutElement {
    let id = Uuid::from_u128(n);
    LayoutElement::with_default_size(id, ElementKind::RoundTable, Position::new(x, y))
}

fn marker(n: u128, x: f64, y: f64) -> LayoutElement {
    let id = Uuid::from_u128(n);
    LayoutElement::with_default_size(id, ElementKind::CornerMarker, Position::new(x, y))
}

fn canvas_with(fill: impl FnOnce(&mut TabCanvasData)) -> TabCanvasData {
    let mut canvas = TabCanvasData::new();
    fill(&mut canvas);
    canvas
}

// --- construction ---

#[test]
fn new_canvas_is_empty_with_zero_view_box() {
    let canvas = TabCanvasData::new();
    assert!(canvas.is_empty());
    assert_eq!(canvas.view_box, ViewBox::zero());
    assert!(canvas.space.is_none());
}

#[test]
fn empty_canvas_serializes_every_collection() {
    let value = serde_json::to_value(TabCanvasData::new()).unwrap();
    for key in ["drawings", "shapes", "textElements", "walls", "doors", "powerPoints"] {
        assert_eq!(value[key], json!([]), "{key}");
    }
    assert_eq!(value["viewBox"], json!({"x": 0.0, "y": 0.0, "width": 0.0, "height": 0.0}));
    assert!(value.get("space").is_none());
}

#[test]
fn missing_collections_deserialize_as_empty() {
    let canvas: TabCanvasData = serde_json::from_value(json!({"walls": []})).unwrap();
    assert!(canvas.is_empty());
}

// --- elements ---

#[test]
fn add_element_appends() {
    let mut canvas = TabCanvasData::new();
    canvas.add_element(table(1, 1.0, 1.0)).unwrap();
    canvas.add_element(table(2, 2.0, 2.0)).unwrap();
    assert_eq!(canvas.shapes.len(), 2);
}

#[test]
fn add_element_same_id_replaces_in_place() {
    let mut canvas = TabCanvasData::new();
    canvas.add_element(table(1, 1.0, 1.0)).unwrap();
    canvas.add_element(table(2, 2.0, 2.0)).unwrap();
    canvas.add_element(table(1, 9.0, 9.0)).unwrap();
    assert_eq!(canvas.shapes.len(), 2);
    assert_eq!(canvas.shapes[0].position, Position::new(9.0, 9.0));
}

#[test]
fn add_element_rejects_bad_dimensions() {
    let mut canvas = TabCanvasData::new();
    let bad = LayoutElement::new(
        Uuid::from_u128(1),
        ElementKind::Stage,
        DimensionSpec::fixed(0.0, 4.0),
        Position::default(),
        0.0,
    );
    assert!(canvas.add_element(bad).is_err());
    assert!(canvas.is_empty());
}

#[test]
fn add_element_rejects_non_finite_position() {
    let mut canvas = TabCanvasData::new();
    let err = canvas.add_element(table(1, f64::NAN, 1.0)).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidCoordinate { .. }));
    assert!(canvas.add_element(table(2, 1.0, f64::NEG_INFINITY)).is_err());
    assert!(canvas.is_empty());
}

#[test]
fn insert_element_refuses_taken_id() {
    let mut canvas = TabCanvasData::new();
    canvas.insert_element(table(1, 1.0, 1.0)).unwrap();
    let err = canvas.insert_element(table(1, 9.0, 9.0)).unwrap_err();
    assert_eq!(err, LayoutError::DuplicateId(Uuid::from_u128(1)));
    assert_eq!(canvas.shapes.len(), 1);
    assert_eq!(canvas.shapes[0].position, Position::new(1.0, 1.0));
}

#[test]
fn insert_element_validates() {
    let mut canvas = TabCanvasData::new();
    assert!(canvas.insert_element(table(1, f64::INFINITY, 0.0)).is_err());
    assert!(canvas.is_empty());
}

#[test]
fn update_element_unknown_returns_false() {
    let mut canvas = TabCanvasData::new();
    let updated = canvas
        .update_element(Uuid::from_u128(7), &PartialLayoutElement::default())
        .unwrap();
    assert!(!updated);
}

#[test]
fn update_element_applies_partial() {
    let mut canvas = TabCanvasData::new();
    canvas.add_element(table(1, 1.0, 1.0)).unwrap();
    let partial = PartialLayoutElement { rotation: Some(30.0), ..Default::default() };
    assert!(canvas.update_element(Uuid::from_u128(1), &partial).unwrap());
    assert_eq!(canvas.element(Uuid::from_u128(1)).unwrap().rotation, 30.0);
}

#[test]
fn remove_element_returns_it() {
    let mut canvas = TabCanvasData::new();
    canvas.add_element(table(1, 1.0, 1.0)).unwrap();
    let removed = canvas.remove_element(Uuid::from_u128(1)).unwrap();
    assert_eq!(removed.id, Uuid::from_u128(1));
    assert!(canvas.remove_element(Uuid::from_u128(1)).is_none());
}

#[test]
fn elements_of_filters_kind() {
    let mut canvas = TabCanvasData::new();
    canvas.add_element(table(1, 1.0, 1.0)).unwrap();
    canvas.add_element(marker(2, 0.0, 0.0)).unwrap();
    assert_eq!(canvas.elements_of(ElementKind::CornerMarker).count(), 1);
}

// --- space ---

#[test]
fn space_from_corner_markers() {
    let mut canvas = TabCanvasData::new();
    canvas.add_element(marker(1, 0.0, 0.0)).unwrap();
    canvas.add_element(marker(2, 20.0, 0.0)).unwrap();
    canvas.add_element(marker(3, 20.0, 15.0)).unwrap();
    canvas.add_element(marker(4, 0.0, 15.0)).unwrap();
    canvas.add_element(table(5, 50.0, 50.0)).unwrap();
    let space = canvas.space_from_corner_markers().unwrap();
    assert_eq!((space.width, space.height), (20.0, 15.0));
}

#[test]
fn space_from_corner_markers_needs_markers() {
    let canvas = TabCanvasData::new();
    assert!(canvas.space_from_corner_markers().is_err());
}

#[test]
fn validate_rejects_bad_space() {
    let mut canvas = TabCanvasData::new();
    canvas.space = Some(SpaceBounds {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 1.0,
        max_y: 1.0,
        width: -1.0,
        height: 1.0,
    });
    assert!(canvas.validate().is_err());
}

#[test]
fn validate_rejects_duplicate_element_ids() {
    let mut canvas = TabCanvasData::new();
    canvas.shapes.push(table(4, 1.0, 1.0));
    canvas.shapes.push(table(4, 2.0, 2.0));
    assert_eq!(canvas.validate(), Err(LayoutError::DuplicateId(Uuid::from_u128(4))));
}

#[test]
fn validate_rejects_non_finite_anywhere() {
    let wall = Wall {
        id: Uuid::from_u128(1),
        start: Position::new(0.0, 0.0),
        end: Position::new(f64::NAN, 4.0),
        thickness: 0.2,
    };
    let door = Door {
        id: Uuid::from_u128(2),
        wall_id: None,
        position: Position::new(1.0, 0.0),
        width: f64::INFINITY,
        rotation: 0.0,
    };
    let drawing = Drawing {
        id: Uuid::from_u128(3),
        points: vec![Point::new(0.0, f64::NAN)],
        stroke: "#000".into(),
        stroke_width: 1.0,
    };
    let text = TextElement {
        id: Uuid::from_u128(4),
        text: "Bar".into(),
        position: Point::new(1.0, 1.0),
        font_size: f64::NAN,
        color: "#000".into(),
    };
    let point = PowerPoint {
        id: Uuid::from_u128(5),
        position: Position::new(f64::NEG_INFINITY, 0.0),
        label: String::new(),
    };

    let cases = [
        canvas_with(|c| c.walls.push(wall)),
        canvas_with(|c| c.doors.push(door)),
        canvas_with(|c| c.drawings.push(drawing)),
        canvas_with(|c| c.text_elements.push(text)),
        canvas_with(|c| c.power_points.push(point)),
        canvas_with(|c| c.view_box.width = f64::NAN),
    ];
    for (i, canvas) in cases.iter().enumerate() {
        assert!(
            matches!(canvas.validate(), Err(LayoutError::InvalidCoordinate { .. })),
            "case {i}"
        );
    }
}

// --- other collections ---

#[test]
fn len_counts_every_collection() {
    let mut canvas = TabCanvasData::new();
    canvas.walls.push(Wall {
        id: Uuid::from_u128(1),
        start: Position::new(0.0, 0.0),
        end: Position::new(3.0, 4.0),
        thickness: 0.2,
    });
    canvas.power_points.push(PowerPoint {
        id: Uuid::from_u128(2),
        position: Position::new(1.0, 1.0),
        label: String::new(),
    });
    canvas.drawings.push(Drawing {
        id: Uuid::from_u128(3),
        points: vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
        stroke: "#000".into(),
        stroke_width: 2.0,
    });
    assert_eq!(canvas.len(), 3);
    assert_eq!(canvas.walls[0].length(), 5.0);
}

#[test]
fn door_without_wall_omits_field() {
    let door = Door {
        id: Uuid::nil(),
        wall_id: None,
        position: Position::new(1.0, 0.0),
        width: 0.9,
        rotation: 0.0,
    };
    let value = serde_json::to_value(&door).unwrap();
    assert!(value.get("wallId").is_none());
}
