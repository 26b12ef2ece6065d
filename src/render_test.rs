#![allow(clippy::float_cmp)]

use float_cmp::approx_eq;
use proptest::prelude::*;
use uuid::Uuid;

use super::*;
use crate::dimension::DimensionSpec;
use crate::element::{ElementKind, Position};

fn element(dimensions: DimensionSpec, x: f64, y: f64, rotation: f64) -> LayoutElement {
    let position = Position::new(x, y);
    LayoutElement::new(Uuid::nil(), ElementKind::RectTable, dimensions, position, rotation)
}

// =============================================================
// get_element_render_data
// =============================================================

#[test]
fn round_table_in_reference_room() {
    let table = element(DimensionSpec::round(1.8), 5.0, 5.0, 0.0);
    let rd = get_element_render_data(&table, 40.0, Point::default()).unwrap();
    let expected = RenderData {
        x: 164.0,
        y: 164.0,
        width: 72.0,
        height: 72.0,
        center_x: 200.0,
        center_y: 200.0,
        rotation: 0.0,
    };
    assert_eq!(rd, expected);
}

#[test]
fn offset_shifts_center_not_size() {
    let table = element(DimensionSpec::fixed(2.0, 1.0), 1.0, 1.0, 0.0);
    let rd = get_element_render_data(&table, 10.0, Point::new(30.0, -5.0)).unwrap();
    assert_eq!(rd.center_x, 40.0);
    assert_eq!(rd.center_y, 5.0);
    assert_eq!(rd.width, 20.0);
    assert_eq!(rd.height, 10.0);
    assert_eq!(rd.x, 30.0);
    assert_eq!(rd.y, 0.0);
}

#[test]
fn rotation_passes_through() {
    let table = element(DimensionSpec::fixed(1.83, 0.76), 3.3, 7.1, 45.0);
    for ppm in [1.0, 12.5, 40.0, 333.3] {
        let rd = get_element_render_data(&table, ppm, Point::new(17.0, 4.0)).unwrap();
        assert_eq!(rd.rotation, 45.0);
    }
}

#[test]
fn parametric_element_renders() {
    let floor = element(DimensionSpec::parametric(0.6, 5, 4), 10.0, 7.5, 0.0);
    let rd = get_element_render_data(&floor, 40.0, Point::default()).unwrap();
    assert_eq!(rd.width, 120.0);
    assert_eq!(rd.height, 96.0);
}

#[test]
fn invalid_dimensions_error() {
    let broken = element(DimensionSpec::fixed(-1.0, 1.0), 0.0, 0.0, 0.0);
    let err = get_element_render_data(&broken, 40.0, Point::default()).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidDimensionSpec { .. }));
}

// =============================================================
// render_tab
// =============================================================

#[test]
fn render_tab_keeps_insertion_order() {
    let mut canvas = TabCanvasData::new();
    let a = LayoutElement::with_default_size(
        Uuid::from_u128(1),
        ElementKind::Stage,
        Position::new(3.0, 2.0),
    );
    let b = LayoutElement::with_default_size(
        Uuid::from_u128(2),
        ElementKind::RoundTable,
        Position::new(8.0, 8.0),
    );
    canvas.add_element(a).unwrap();
    canvas.add_element(b).unwrap();
    let vp = Viewport::new(40.0, Point::default());
    let rendered = render_tab(&canvas, &vp).unwrap();
    let ids: Vec<_> = rendered.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
    assert_eq!(rendered[1].1.center_x, 320.0);
}

#[test]
fn render_tab_fails_on_bad_element() {
    let mut canvas = TabCanvasData::new();
    canvas
        .shapes
        .push(element(DimensionSpec::parametric(0.6, 0, 2), 1.0, 1.0, 0.0));
    let vp = Viewport::new(40.0, Point::default());
    assert!(render_tab(&canvas, &vp).is_err());
}

// =============================================================
// Display rounding
// =============================================================

#[test]
fn display_exact_is_identity() {
    let table = element(DimensionSpec::fixed(1.83, 0.76), 2.0, 2.0, 10.0);
    let rd = get_element_render_data(&table, 40.0, Point::default()).unwrap();
    assert_eq!(rd.display(RoundingPolicy::Exact), rd);
}

#[test]
fn display_whole_pixel_rounds_edges() {
    // 1.83 m * 40 = 73.2 px wide, centered at 80 -> left 43.4, right 116.6.
    let table = element(DimensionSpec::fixed(1.83, 0.76), 2.0, 2.0, 10.0);
    let rd = get_element_render_data(&table, 40.0, Point::default()).unwrap();
    let shown = rd.display(RoundingPolicy::WholePixel);
    assert_eq!(shown.x, 43.0);
    assert_eq!(shown.width, 74.0);
    assert_eq!(shown.rotation, 10.0);
    // Exact data is untouched.
    assert!(approx_eq!(f64, rd.width, 73.2, ulps = 2));
}

#[test]
fn display_half_pixel_snaps_to_halves() {
    let rd = RenderData {
        x: 10.3,
        y: 4.8,
        width: 5.0,
        height: 5.0,
        center_x: 12.8,
        center_y: 7.3,
        rotation: 0.0,
    };
    let shown = rd.display(RoundingPolicy::HalfPixel);
    assert_eq!(shown.x, 10.5);
    assert_eq!(shown.y, 5.0);
}

#[test]
fn default_policy_is_whole_pixel() {
    assert_eq!(RoundingPolicy::default(), RoundingPolicy::WholePixel);
}

// =============================================================
// Corners
// =============================================================

fn bar_4x2(rotation: f64) -> RenderData {
    RenderData {
        x: 0.0,
        y: 0.0,
        width: 4.0,
        height: 2.0,
        center_x: 2.0,
        center_y: 1.0,
        rotation,
    }
}

#[test]
fn corners_unrotated_match_rect() {
    let rd = bar_4x2(0.0);
    let c = rd.corners();
    assert!(approx_eq!(f64, c[0].x, 0.0) && approx_eq!(f64, c[0].y, 0.0));
    assert!(approx_eq!(f64, c[2].x, 4.0) && approx_eq!(f64, c[2].y, 2.0));
}

#[test]
fn corners_quarter_turn_swaps_extent() {
    let rd = bar_4x2(90.0);
    let c = rd.corners();
    // Top-left (-2, -1) rotated 90 degrees clockwise lands at (1, -2) from center.
    assert!(approx_eq!(f64, c[0].x, 3.0, epsilon = 1e-12));
    assert!(approx_eq!(f64, c[0].y, -1.0, epsilon = 1e-12));
}

// =============================================================
// Properties
// =============================================================

proptest! {
    #[test]
    fn width_is_exact_product(w in 0.01f64..50.0, h in 0.01f64..50.0, s in 0.1f64..500.0) {
        let el = element(DimensionSpec::fixed(w, h), 1.0, 1.0, 0.0);
        let rd = get_element_render_data(&el, s, Point::default()).unwrap();
        prop_assert_eq!(rd.width, w * s);
        prop_assert_eq!(rd.height, h * s);
    }

    #[test]
    fn corner_is_center_minus_half_size(
        w in 0.01f64..50.0,
        h in 0.01f64..50.0,
        x in -50.0f64..50.0,
        y in -50.0f64..50.0,
        s in 0.1f64..500.0,
        ox in -1000.0f64..1000.0,
        oy in -1000.0f64..1000.0,
    ) {
        let el = element(DimensionSpec::fixed(w, h), x, y, 0.0);
        let rd = get_element_render_data(&el, s, Point::new(ox, oy)).unwrap();
        prop_assert_eq!(rd.x, rd.center_x - rd.width / 2.0);
        prop_assert_eq!(rd.y, rd.center_y - rd.height / 2.0);
    }

    #[test]
    fn rotation_is_unchanged(r in 0.0f64..360.0, s in 0.1f64..500.0) {
        let el = element(DimensionSpec::square(1.0), 2.0, 2.0, r);
        let rd = get_element_render_data(&el, s, Point::default()).unwrap();
        prop_assert_eq!(rd.rotation, r);
    }
}
