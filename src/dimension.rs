//! Size specifications for floor-plan elements.
//!
//! An element's footprint is either given directly in meters (`Fixed`) or
//! built from a repeated unit such as a modular dance-floor panel
//! (`Parametric`). Both resolve through [`resolve_dimensions`], the only place
//! that inspects the variant.

#[cfg(test)]
#[path = "dimension_test.rs"]
mod dimension_test;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// How an element's real-world size is specified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DimensionSpec {
    /// Width and height given directly, in meters.
    Fixed { width: f64, height: f64 },
    /// `unit_size` meters repeated `count_x` times across and `count_y` down.
    #[serde(rename_all = "camelCase")]
    Parametric { unit_size: f64, count_x: u32, count_y: u32 },
}

impl DimensionSpec {
    #[must_use]
    pub fn fixed(width: f64, height: f64) -> Self {
        Self::Fixed { width, height }
    }

    #[must_use]
    pub fn square(edge: f64) -> Self {
        Self::Fixed { width: edge, height: edge }
    }

    /// Footprint of a round object: its bounding square.
    #[must_use]
    pub fn round(diameter: f64) -> Self {
        Self::square(diameter)
    }

    #[must_use]
    pub fn parametric(unit_size: f64, count_x: u32, count_y: u32) -> Self {
        Self::Parametric { unit_size, count_x, count_y }
    }
}

/// Resolved real-world size in meters. Both fields are strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Resolve a size specification into a real-world width and height.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidDimensionSpec`] if a fixed size is not
/// strictly positive and finite, or if a parametric unit size or count is
/// not strictly positive.
pub fn resolve_dimensions(spec: &DimensionSpec) -> Result<Dimensions, LayoutError> {
    match *spec {
        DimensionSpec::Fixed { width, height } => {
            ensure_positive("width", width)?;
            ensure_positive("height", height)?;
            Ok(Dimensions { width, height })
        }
        DimensionSpec::Parametric { unit_size, count_x, count_y } => {
            ensure_positive("unit size", unit_size)?;
            if count_x == 0 || count_y == 0 {
                return Err(LayoutError::invalid_dimension(format!(
                    "unit counts must be positive (got {count_x} x {count_y})"
                )));
            }
            Ok(Dimensions {
                width: unit_size * f64::from(count_x),
                height: unit_size * f64::from(count_y),
            })
        }
    }
}

fn ensure_positive(field: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid_dimension(format!(
            "{field} must be positive and finite (got {value})"
        )))
    }
}
