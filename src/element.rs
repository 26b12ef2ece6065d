//! Layout elements: placeable floor-plan objects and their sparse updates.
//!
//! This module defines what can be put on a venue floor plan
//! (`LayoutElement`, `ElementKind`), a sparse-update type for incremental edits
//! (`PartialLayoutElement`), and a typed accessor for the open-ended
//! `metadata` JSON bag (`Metadata`).
//!
//! Positions are in meters and always name the element's **center**. The
//! render layer converts them to pixel-space corners.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DANCE_FLOOR_PANEL_M, DANCE_FLOOR_PANELS, FULL_TURN_DEG, IMPERIAL_TABLE_DEPTH_M,
    IMPERIAL_TABLE_WIDTH_M, MARKER_SIZE_M, RECT_TABLE_DEPTH_M, RECT_TABLE_WIDTH_M,
    ROUND_TABLE_DIAMETER_M, SCALE_REFERENCE_M, STAGE_DEPTH_M, STAGE_WIDTH_M,
};
use crate::dimension::{DimensionSpec, resolve_dimensions};
use crate::error::{LayoutError, ensure_finite};

/// Unique identifier for a layout element.
pub type ElementId = Uuid;

/// The catalogue of placeable floor-plan objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Round banquet table; its footprint is the bounding square.
    RoundTable,
    /// Rectangular trestle table.
    RectTable,
    /// Long imperial / banquet table.
    ImperialTable,
    /// Modular dance floor, usually sized parametrically in panels.
    DanceFloor,
    Stage,
    /// Marker placed at a corner of the physical space.
    CornerMarker,
    /// Marker placed at the center of the physical space.
    CenterMarker,
    /// Square of known size used to eyeball the scale on screen.
    ScaleReference,
}

impl ElementKind {
    /// Catalogue default footprint for a newly placed element of this kind.
    #[must_use]
    pub fn default_dimensions(self) -> DimensionSpec {
        match self {
            Self::RoundTable => DimensionSpec::round(ROUND_TABLE_DIAMETER_M),
            Self::RectTable => DimensionSpec::fixed(RECT_TABLE_WIDTH_M, RECT_TABLE_DEPTH_M),
            Self::ImperialTable => {
                DimensionSpec::fixed(IMPERIAL_TABLE_WIDTH_M, IMPERIAL_TABLE_DEPTH_M)
            }
            Self::DanceFloor => DimensionSpec::parametric(
                DANCE_FLOOR_PANEL_M,
                DANCE_FLOOR_PANELS,
                DANCE_FLOOR_PANELS,
            ),
            Self::Stage => DimensionSpec::fixed(STAGE_WIDTH_M, STAGE_DEPTH_M),
            Self::CornerMarker | Self::CenterMarker => DimensionSpec::square(MARKER_SIZE_M),
            Self::ScaleReference => DimensionSpec::square(SCALE_REFERENCE_M),
        }
    }

    /// Markers describe the space itself rather than furniture placed in it.
    #[must_use]
    pub fn is_marker(self) -> bool {
        matches!(self, Self::CornerMarker | Self::CenterMarker | Self::ScaleReference)
    }
}

/// A point in physical space, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fold any finite angle into `[0, 360)`. Non-finite input becomes `0`.
#[must_use]
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let folded = degrees.rem_euclid(FULL_TURN_DEG);
    // rem_euclid rounds tiny negatives up to exactly 360.
    if folded >= FULL_TURN_DEG { 0.0 } else { folded }
}

/// A floor-plan element as stored in a tab and in the persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub dimensions: DimensionSpec,
    /// Center of the element in meters.
    pub position: Position,
    /// Clockwise rotation in degrees about the center, in `[0, 360)`.
    pub rotation: f64,
    /// Open-ended per-element properties (label, seats, color, ...).
    #[serde(default = "empty_metadata")]
    pub metadata: serde_json::Value,
}

fn empty_metadata() -> serde_json::Value {
    serde_json::json!({})
}

impl LayoutElement {
    /// Build an element with empty metadata. `rotation` is normalised.
    #[must_use]
    pub fn new(
        id: ElementId,
        kind: ElementKind,
        dimensions: DimensionSpec,
        position: Position,
        rotation: f64,
    ) -> Self {
        Self {
            id,
            kind,
            dimensions,
            position,
            rotation: normalize_rotation(rotation),
            metadata: empty_metadata(),
        }
    }

    /// Build an element of `kind` with its catalogue default footprint.
    #[must_use]
    pub fn with_default_size(id: ElementId, kind: ElementKind, position: Position) -> Self {
        Self::new(id, kind, kind.default_dimensions(), position, 0.0)
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Typed view over `metadata`.
    #[must_use]
    pub fn meta(&self) -> Metadata<'_> {
        Metadata::new(&self.metadata)
    }

    /// Check that the size resolves and that position and rotation are
    /// finite.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimensionSpec`] for an unresolvable size
    /// and [`LayoutError::InvalidCoordinate`] for a NaN or infinite position
    /// or rotation.
    pub fn validate(&self) -> Result<(), LayoutError> {
        resolve_dimensions(&self.dimensions)?;
        ensure_finite("position", &[self.position.x, self.position.y])?;
        ensure_finite("rotation", &[self.rotation])
    }

    /// Apply a sparse update. Everything is validated before anything is
    /// written, so a failed update leaves the element untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDimensionSpec`] for an unresolvable new
    /// size, [`LayoutError::InvalidCoordinate`] for a non-finite position, and
    /// [`LayoutError::SerializationError`] when the metadata patch is not a
    /// JSON object.
    pub fn apply_partial(&mut self, partial: &PartialLayoutElement) -> Result<(), LayoutError> {
        if let Some(dimensions) = &partial.dimensions {
            resolve_dimensions(dimensions)?;
        }
        if let Some(position) = partial.position {
            ensure_finite("position", &[position.x, position.y])?;
        }
        let incoming = match &partial.metadata {
            Some(patch) => Some(patch.as_object().ok_or_else(|| {
                LayoutError::SerializationError("metadata patch must be a JSON object".into())
            })?),
            None => None,
        };

        if let Some(dimensions) = partial.dimensions {
            self.dimensions = dimensions;
        }
        if let Some(position) = partial.position {
            self.position = position;
        }
        if let Some(rotation) = partial.rotation {
            self.rotation = normalize_rotation(rotation);
        }
        if let Some(incoming) = incoming {
            if !self.metadata.is_object() {
                self.metadata = empty_metadata();
            }
            if let Some(existing) = self.metadata.as_object_mut() {
                for (k, v) in incoming {
                    if v.is_null() {
                        existing.remove(k);
                    } else {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        Ok(())
    }
}

/// Sparse update for a layout element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialLayoutElement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<DimensionSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// New rotation in degrees; normalised into `[0, 360)` when applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// Metadata keys to merge or remove (null values delete keys).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Typed access to common metadata fields of a `LayoutElement`.
pub struct Metadata<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Metadata<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Display label, e.g. `"Table 4"`. Empty string when absent.
    #[must_use]
    pub fn label(&self) -> &str {
        self.value.get("label").and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Number of seats at a table, if recorded.
    #[must_use]
    pub fn seats(&self) -> Option<u32> {
        self.value
            .get("seats")
            .and_then(serde_json::Value::as_u64)
            .and_then(|n| match u32::try_from(n) {
                Ok(seats) => Some(seats),
                Err(_) => None,
            })
    }

    /// Fill color as a CSS color string. Defaults to `"#FFFFFF"` when absent.
    #[must_use]
    pub fn color(&self) -> &str {
        self.value.get("color").and_then(|v| v.as_str()).unwrap_or("#FFFFFF")
    }
}
