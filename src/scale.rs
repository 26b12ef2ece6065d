//! Physical space bounds and the meters-to-pixels conversion.
//!
//! The scale is always uniform: one pixels-per-meter factor for both axes, so
//! a round table stays round on screen. [`compute_scale`] derives the factor
//! from a canvas width; [`Viewport::fit`] is the letterboxing helper for hosts
//! whose canvas aspect ratio differs from the space's.

#[cfg(test)]
#[path = "scale_test.rs"]
mod scale_test;

use serde::{Deserialize, Serialize};

use crate::element::Position;
use crate::error::LayoutError;

/// Relative tolerance when checking a deserialized `width == max_x - min_x`.
const EXTENT_TOLERANCE: f64 = 1e-9;

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The rectangular physical area a layout tab represents, in meters.
///
/// `width == max_x - min_x` and `height == max_y - min_y`, both positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
}

impl SpaceBounds {
    /// Build bounds from their extents, deriving width and height.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] if an extent is not finite
    /// or the derived width or height is not strictly positive.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, LayoutError> {
        let bounds = Self {
            min_x,
            min_y,
            max_x,
            max_y,
            width: max_x - min_x,
            height: max_y - min_y,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Bounds anchored at the origin.
    ///
    /// # Errors
    ///
    /// Same as [`SpaceBounds::new`].
    pub fn from_size(width: f64, height: f64) -> Result<Self, LayoutError> {
        Self::new(0.0, 0.0, width, height)
    }

    /// Smallest bounds enclosing every point, e.g. the corner markers of a
    /// room.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] when the points do not span
    /// a positive area (fewer than two distinct corners, or collinear along an
    /// axis).
    pub fn from_points(points: &[Position]) -> Result<Self, LayoutError> {
        let Some(first) = points.first() else {
            return Err(LayoutError::invalid_bounds("no points to derive bounds from"));
        };
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Self::new(min_x, min_y, max_x, max_y)
    }

    /// Check the extent invariants; used after deserialization.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] describing the first
    /// violated invariant.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let all = [self.min_x, self.min_y, self.max_x, self.max_y, self.width, self.height];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(LayoutError::invalid_bounds("extents must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(LayoutError::invalid_bounds(format!(
                "width and height must be positive (got {} x {})",
                self.width, self.height
            )));
        }
        if !extent_matches(self.width, self.max_x - self.min_x)
            || !extent_matches(self.height, self.max_y - self.min_y)
        {
            return Err(LayoutError::invalid_bounds("width/height disagree with min/max extents"));
        }
        Ok(())
    }

    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(self.min_x + self.width / 2.0, self.min_y + self.height / 2.0)
    }

    /// The four corners, clockwise from the top-left.
    #[must_use]
    pub fn corners(&self) -> [Position; 4] {
        [
            Position::new(self.min_x, self.min_y),
            Position::new(self.max_x, self.min_y),
            Position::new(self.max_x, self.max_y),
            Position::new(self.min_x, self.max_y),
        ]
    }
}

fn extent_matches(stored: f64, derived: f64) -> bool {
    (stored - derived).abs() <= EXTENT_TOLERANCE * stored.abs().max(1.0)
}

/// Derive the uniform pixels-per-meter factor for a canvas of the given width
/// showing a space of the given physical width.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidSpaceBounds`] if `space_width_meters` is not
/// strictly positive and finite.
pub fn compute_scale(canvas_pixel_width: f64, space_width_meters: f64) -> Result<f64, LayoutError> {
    if !space_width_meters.is_finite() || space_width_meters <= 0.0 {
        return Err(LayoutError::invalid_bounds(format!(
            "space width must be positive and finite (got {space_width_meters})"
        )));
    }
    Ok(canvas_pixel_width / space_width_meters)
}

/// Scale plus pixel offset mapping physical space onto the canvas.
///
/// `pixels_per_meter` applies to both axes. `offset` is added after scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub pixels_per_meter: f64,
    pub offset: Point,
}

impl Viewport {
    #[must_use]
    pub fn new(pixels_per_meter: f64, offset: Point) -> Self {
        Self { pixels_per_meter, offset }
    }

    /// Scale the space to the canvas width, with `min_x/min_y` landing on the
    /// canvas origin.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] for malformed bounds.
    pub fn for_canvas_width(
        canvas_pixel_width: f64,
        bounds: &SpaceBounds,
    ) -> Result<Self, LayoutError> {
        bounds.validate()?;
        let ppm = compute_scale(canvas_pixel_width, bounds.width)?;
        Ok(Self::new(ppm, Point::new(-bounds.min_x * ppm, -bounds.min_y * ppm)))
    }

    /// Letterbox the space into a canvas: the smaller per-axis factor wins and
    /// the space is centered along the other axis.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] for malformed bounds.
    pub fn fit(
        canvas_pixel_width: f64,
        canvas_pixel_height: f64,
        bounds: &SpaceBounds,
    ) -> Result<Self, LayoutError> {
        bounds.validate()?;
        let ppm_x = compute_scale(canvas_pixel_width, bounds.width)?;
        let ppm_y = compute_scale(canvas_pixel_height, bounds.height)?;
        let ppm = ppm_x.min(ppm_y);
        let pad_x = (canvas_pixel_width - bounds.width * ppm) / 2.0;
        let pad_y = (canvas_pixel_height - bounds.height * ppm) / 2.0;
        Ok(Self::new(ppm, Point::new(pad_x - bounds.min_x * ppm, pad_y - bounds.min_y * ppm)))
    }

    /// Convert a physical position (meters) to pixel space.
    #[must_use]
    pub fn to_pixels(&self, meters: Position) -> Point {
        Point {
            x: meters.x * self.pixels_per_meter + self.offset.x,
            y: meters.y * self.pixels_per_meter + self.offset.y,
        }
    }

    /// Convert a pixel-space point back to physical meters.
    #[must_use]
    pub fn to_meters(&self, pixels: Point) -> Position {
        Position {
            x: (pixels.x - self.offset.x) / self.pixels_per_meter,
            y: (pixels.y - self.offset.y) / self.pixels_per_meter,
        }
    }

    /// Convert a physical length to a pixel length.
    #[must_use]
    pub fn length_to_pixels(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter
    }
}
