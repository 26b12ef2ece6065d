#![allow(clippy::float_cmp)]

use super::*;
use crate::canvas::TabCanvasData;
use crate::ids::FixedClock;
use crate::render::render_tab;

#[test]
fn reference_viewport_is_forty_pixels_per_meter() {
    let vp = reference_viewport().unwrap();
    assert_eq!(vp.pixels_per_meter, 40.0);
    assert_eq!((vp.offset.x, vp.offset.y), (0.0, 0.0));
}

#[test]
fn corner_markers_span_the_space() {
    let mut ids = SequentialIds::new();
    let space = reference_space().unwrap();
    let mut canvas = TabCanvasData::new();
    for marker in corner_markers(&mut ids, &space) {
        canvas.add_element(marker).unwrap();
    }
    assert_eq!(canvas.space_from_corner_markers().unwrap(), space);
}

#[test]
fn center_marker_sits_mid_room() {
    let mut ids = SequentialIds::new();
    let marker = center_marker(&mut ids, &reference_space().unwrap());
    assert_eq!(marker.kind, ElementKind::CenterMarker);
    assert_eq!((marker.position.x, marker.position.y), (10.0, 7.5));
}

#[test]
fn table_grid_is_row_major_with_unique_ids() {
    let mut ids = SequentialIds::new();
    let grid = table_grid(&mut ids, 2, 3, 2.0, Position::new(1.0, 1.0));
    assert_eq!(grid.len(), 6);
    assert_eq!((grid[2].position.x, grid[2].position.y), (5.0, 1.0));
    assert_eq!((grid[3].position.x, grid[3].position.y), (1.0, 3.0));
    let mut seen: Vec<_> = grid.iter().map(|e| e.id).collect();
    seen.dedup();
    assert_eq!(seen.len(), 6);
}

#[test]
fn document_with_tabs_names_in_order() {
    let doc = document_with_tabs(3, &FixedClock::at(0)).unwrap();
    let names: Vec<&str> = doc.tabs().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Layout 1", "Layout 2", "Layout 3"]);
    assert_eq!(doc.active_tab_id(), doc.tabs()[0].id);
}

#[test]
fn document_with_zero_tabs_still_has_one() {
    let doc = document_with_tabs(0, &FixedClock::at(0)).unwrap();
    assert_eq!(doc.tabs().len(), 1);
}

#[test]
fn furnished_room_renders_inside_canvas() {
    let mut ids = SequentialIds::new();
    let mut canvas = TabCanvasData::new();
    for element in furnished_room(&mut ids).unwrap() {
        canvas.add_element(element).unwrap();
    }
    let vp = reference_viewport().unwrap();
    for (_, rd) in render_tab(&canvas, &vp).unwrap() {
        assert!(rd.center_x >= 0.0 && rd.center_x <= 800.0);
        assert!(rd.center_y >= 0.0 && rd.center_y <= 600.0);
    }
}

#[test]
fn dance_floor_resolves_from_panels() {
    let mut ids = SequentialIds::new();
    let floor = dance_floor(&mut ids, 0.6, 5, 4, Position::new(10.0, 7.5));
    let origin = crate::scale::Point::default();
    let rd = crate::render::get_element_render_data(&floor, 40.0, origin).unwrap();
    assert_eq!((rd.width, rd.height), (120.0, 96.0));
}
