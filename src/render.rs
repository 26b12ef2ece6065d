//! Pixel-space render geometry for layout elements.
//!
//! [`get_element_render_data`] is exact: it multiplies and offsets without any
//! rounding, so proportion checks can compare with `==`. Rounding for display
//! happens only in [`RenderData::display`], on a copy, under an explicit
//! [`RoundingPolicy`].

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::{Deserialize, Serialize};

use crate::canvas::TabCanvasData;
use crate::dimension::resolve_dimensions;
use crate::element::{ElementId, LayoutElement};
use crate::error::LayoutError;
use crate::scale::{Point, Viewport};

/// Derived pixel-space geometry of one element. Never persisted.
///
/// `x`/`y` is the unrotated top-left corner; rotation applies about
/// `center_x`/`center_y` at paint time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub rotation: f64,
}

/// Display-time rounding applied to render geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Leave values untouched.
    Exact,
    /// Snap to whole pixels.
    #[default]
    WholePixel,
    /// Snap to half pixels.
    HalfPixel,
}

impl RoundingPolicy {
    fn apply(self, value: f64) -> f64 {
        match self {
            Self::Exact => value,
            Self::WholePixel => value.round(),
            Self::HalfPixel => (value * 2.0).round() / 2.0,
        }
    }
}

impl RenderData {
    /// A rounded copy for painting. Edges are rounded and the size is derived
    /// from the rounded edges so neighbouring elements never gain a gap.
    /// The center is recomputed from the rounded rectangle and rotation is
    /// left alone.
    #[must_use]
    pub fn display(&self, policy: RoundingPolicy) -> RenderData {
        let left = policy.apply(self.x);
        let top = policy.apply(self.y);
        let right = policy.apply(self.x + self.width);
        let bottom = policy.apply(self.y + self.height);
        let width = right - left;
        let height = bottom - top;
        RenderData {
            x: left,
            y: top,
            width,
            height,
            center_x: left + width / 2.0,
            center_y: top + height / 2.0,
            rotation: self.rotation,
        }
    }

    /// The four corners after rotating about the center, clockwise from the
    /// (unrotated) top-left. Screen space has y pointing down, so a positive
    /// angle turns clockwise on screen.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)].map(|(dx, dy)| Point {
            x: self.center_x + dx * cos - dy * sin,
            y: self.center_y + dx * sin + dy * cos,
        })
    }
}

/// Compute pixel-space geometry for one element.
///
/// `offset` is added after scaling. Rotation passes through unchanged.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDimensionSpec`] if the element's size does
/// not resolve.
pub fn get_element_render_data(
    element: &LayoutElement,
    pixels_per_meter: f64,
    offset: Point,
) -> Result<RenderData, LayoutError> {
    let dims = resolve_dimensions(&element.dimensions)?;
    let width = dims.width * pixels_per_meter;
    let height = dims.height * pixels_per_meter;
    let center_x = element.position.x * pixels_per_meter + offset.x;
    let center_y = element.position.y * pixels_per_meter + offset.y;
    Ok(RenderData {
        x: center_x - width / 2.0,
        y: center_y - height / 2.0,
        width,
        height,
        center_x,
        center_y,
        rotation: element.rotation,
    })
}

/// Render geometry for every layout element of a tab, in insertion order.
///
/// # Errors
///
/// Returns the first [`LayoutError::InvalidDimensionSpec`] encountered.
pub fn render_tab(
    canvas: &TabCanvasData,
    viewport: &Viewport,
) -> Result<Vec<(ElementId, RenderData)>, LayoutError> {
    canvas
        .shapes
        .iter()
        .map(|el| {
            get_element_render_data(el, viewport.pixels_per_meter, viewport.offset)
                .map(|rd| (el.id, rd))
        })
        .collect()
}
