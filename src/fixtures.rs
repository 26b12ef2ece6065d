//! Canonical fixtures for checking render proportions and tab invariants.
//!
//! Everything here is deterministic: ids come from [`SequentialIds`] unless
//! the caller supplies a source, and sizes are the catalogue defaults or
//! exact literals, so tests can compare render output with `==`.

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures_test;

use crate::dimension::DimensionSpec;
use crate::doc::LayoutFileData;
use crate::element::{ElementKind, LayoutElement, Position};
use crate::error::LayoutError;
use crate::ids::{Clock, IdSource, SequentialIds};
use crate::scale::{SpaceBounds, Viewport};

/// Width of the reference room in meters.
pub const REFERENCE_SPACE_WIDTH_M: f64 = 20.0;
/// Depth of the reference room in meters.
pub const REFERENCE_SPACE_HEIGHT_M: f64 = 15.0;
/// Canvas width that gives the reference room exactly 40 px/m.
pub const REFERENCE_CANVAS_WIDTH_PX: f64 = 800.0;

/// A 20 m x 15 m room anchored at the origin.
///
/// # Errors
///
/// Never fails for the built-in constants; the `Result` mirrors
/// [`SpaceBounds::from_size`].
pub fn reference_space() -> Result<SpaceBounds, LayoutError> {
    SpaceBounds::from_size(REFERENCE_SPACE_WIDTH_M, REFERENCE_SPACE_HEIGHT_M)
}

/// The reference room on an 800 px canvas: 40 px/m, zero offset.
///
/// # Errors
///
/// See [`reference_space`].
pub fn reference_viewport() -> Result<Viewport, LayoutError> {
    Viewport::for_canvas_width(REFERENCE_CANVAS_WIDTH_PX, &reference_space()?)
}

pub fn round_table_at(ids: &mut dyn IdSource, x: f64, y: f64) -> LayoutElement {
    LayoutElement::with_default_size(ids.next_id(), ElementKind::RoundTable, Position::new(x, y))
}

pub fn rect_table_at(ids: &mut dyn IdSource, x: f64, y: f64, rotation: f64) -> LayoutElement {
    LayoutElement::new(
        ids.next_id(),
        ElementKind::RectTable,
        ElementKind::RectTable.default_dimensions(),
        Position::new(x, y),
        rotation,
    )
}

/// A parametric dance floor of `count_x` by `count_y` panels.
pub fn dance_floor(
    ids: &mut dyn IdSource,
    unit_size: f64,
    count_x: u32,
    count_y: u32,
    center: Position,
) -> LayoutElement {
    LayoutElement::new(
        ids.next_id(),
        ElementKind::DanceFloor,
        DimensionSpec::parametric(unit_size, count_x, count_y),
        center,
        0.0,
    )
}

/// One corner marker per corner of `bounds`, clockwise from the top-left.
pub fn corner_markers(ids: &mut dyn IdSource, bounds: &SpaceBounds) -> Vec<LayoutElement> {
    bounds
        .corners()
        .into_iter()
        .map(|corner| {
            LayoutElement::with_default_size(ids.next_id(), ElementKind::CornerMarker, corner)
        })
        .collect()
}

pub fn center_marker(ids: &mut dyn IdSource, bounds: &SpaceBounds) -> LayoutElement {
    LayoutElement::with_default_size(ids.next_id(), ElementKind::CenterMarker, bounds.center())
}

/// A 1 m scale reference square at `position`.
pub fn scale_reference(ids: &mut dyn IdSource, position: Position) -> LayoutElement {
    LayoutElement::with_default_size(ids.next_id(), ElementKind::ScaleReference, position)
}

/// `rows` x `cols` round tables, `spacing` meters apart, the first centered at
/// `origin`. Row-major order.
pub fn table_grid(
    ids: &mut dyn IdSource,
    rows: u32,
    cols: u32,
    spacing: f64,
    origin: Position,
) -> Vec<LayoutElement> {
    (0..rows)
        .flat_map(|r| (0..cols).map(move |c| (r, c)))
        .map(|(r, c)| {
            round_table_at(
                ids,
                origin.x + f64::from(c) * spacing,
                origin.y + f64::from(r) * spacing,
            )
        })
        .collect()
}

/// A document with `n` tabs (at least one), named `"Layout 1"` to
/// `"Layout n"`, built with sequential ids. The first tab is active.
///
/// # Errors
///
/// Propagates [`LayoutFileData::add_tab`] errors.
pub fn document_with_tabs(n: usize, clock: &dyn Clock) -> Result<LayoutFileData, LayoutError> {
    let mut ids = SequentialIds::new();
    let mut doc = LayoutFileData::create_empty(&mut ids, clock);
    for _ in 1..n {
        doc.add_tab("", &mut ids, clock)?;
    }
    Ok(doc)
}

/// A fully furnished reference room: markers, a head stage, a dance floor,
/// and a 3 x 4 grid of round tables, all inside the room.
///
/// # Errors
///
/// See [`reference_space`].
pub fn furnished_room(ids: &mut dyn IdSource) -> Result<Vec<LayoutElement>, LayoutError> {
    let space = reference_space()?;
    let mut elements = corner_markers(ids, &space);
    elements.push(center_marker(ids, &space));
    elements.push(scale_reference(ids, Position::new(1.0, 14.0)));
    let stage_at = Position::new(10.0, 2.5);
    elements.push(LayoutElement::with_default_size(ids.next_id(), ElementKind::Stage, stage_at));
    elements.push(dance_floor(ids, 0.6, 5, 4, Position::new(10.0, 7.5)));
    elements.extend(table_grid(ids, 3, 4, 2.0, Position::new(2.5, 10.0)));
    Ok(elements)
}
