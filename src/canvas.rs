//! Per-tab canvas data.
//!
//! Every collection here is owned by exactly one tab; nothing refers across
//! tabs. Floor-plan furniture lives in `shapes` and is positioned in meters,
//! as are walls, doors, and power points. Freehand drawings, free text, and
//! the `view_box` are in canvas pixel space.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::{ElementId, ElementKind, LayoutElement, PartialLayoutElement, Position};
use crate::error::{LayoutError, ensure_finite};
use crate::scale::{Point, SpaceBounds};

/// The pan/zoom window over the canvas, in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// A freehand stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub id: Uuid,
    pub points: Vec<Point>,
    pub stroke: String,
    pub stroke_width: f64,
}

/// Free text placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub id: Uuid,
    pub text: String,
    pub position: Point,
    pub font_size: f64,
    pub color: String,
}

/// A straight wall segment between two physical points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: Uuid,
    pub start: Position,
    pub end: Position,
    /// Wall thickness in meters.
    pub thickness: f64,
}

impl Wall {
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// A door opening, optionally attached to a wall of the same tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_id: Option<Uuid>,
    /// Center of the opening in meters.
    pub position: Position,
    /// Opening width in meters.
    pub width: f64,
    pub rotation: f64,
}

/// A power outlet marked on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerPoint {
    pub id: Uuid,
    pub position: Position,
    #[serde(default)]
    pub label: String,
}

/// Everything drawn on one tab.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabCanvasData {
    pub drawings: Vec<Drawing>,
    /// Floor-plan elements (tables, stages, markers, ...).
    pub shapes: Vec<LayoutElement>,
    pub text_elements: Vec<TextElement>,
    pub walls: Vec<Wall>,
    pub doors: Vec<Door>,
    pub power_points: Vec<PowerPoint>,
    pub view_box: ViewBox,
    /// Physical area this tab represents, once known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceBounds>,
}

impl TabCanvasData {
    /// Empty collections and a zero view box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a layout element. An element with the same id is
    /// replaced in place, keeping its draw position.
    ///
    /// # Errors
    ///
    /// Returns the element's validation error; the canvas is left unchanged.
    pub fn add_element(&mut self, element: LayoutElement) -> Result<(), LayoutError> {
        element.validate()?;
        if let Some(existing) = self.shapes.iter_mut().find(|e| e.id == element.id) {
            *existing = element;
        } else {
            self.shapes.push(element);
        }
        Ok(())
    }

    /// Append a new layout element, refusing an id that is already on this
    /// canvas.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateId`] for a taken id and the element's
    /// validation error otherwise; the canvas is left unchanged.
    pub fn insert_element(&mut self, element: LayoutElement) -> Result<(), LayoutError> {
        if self.element(element.id).is_some() {
            return Err(LayoutError::DuplicateId(element.id));
        }
        element.validate()?;
        self.shapes.push(element);
        Ok(())
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&LayoutElement> {
        self.shapes.iter().find(|e| e.id == id)
    }

    /// Apply a sparse update. Returns `Ok(false)` if no element has `id`.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`LayoutElement::apply_partial`].
    pub fn update_element(
        &mut self,
        id: ElementId,
        partial: &PartialLayoutElement,
    ) -> Result<bool, LayoutError> {
        let Some(element) = self.shapes.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        element.apply_partial(partial)?;
        Ok(true)
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove_element(&mut self, id: ElementId) -> Option<LayoutElement> {
        let index = self.shapes.iter().position(|e| e.id == id)?;
        Some(self.shapes.remove(index))
    }

    /// Elements of one kind, in draw order.
    pub fn elements_of(&self, kind: ElementKind) -> impl Iterator<Item = &LayoutElement> {
        self.shapes.iter().filter(move |e| e.kind == kind)
    }

    /// Bounds spanned by the corner markers on this tab.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] when the corner markers do
    /// not span a positive area.
    pub fn space_from_corner_markers(&self) -> Result<SpaceBounds, LayoutError> {
        let corners: Vec<Position> =
            self.elements_of(ElementKind::CornerMarker).map(|e| e.position).collect();
        SpaceBounds::from_points(&corners)
    }

    /// Number of items across every collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drawings.len()
            + self.shapes.len()
            + self.text_elements.len()
            + self.walls.len()
            + self.doors.len()
            + self.power_points.len()
    }

    /// Returns `true` if every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check invariants that deserialization alone cannot guarantee: every
    /// element is valid and unique by id, every coordinate and length is
    /// finite, and the space bounds are well formed.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen = HashSet::with_capacity(self.shapes.len());
        for element in &self.shapes {
            if !seen.insert(element.id) {
                return Err(LayoutError::DuplicateId(element.id));
            }
            element.validate()?;
        }
        for drawing in &self.drawings {
            ensure_finite("drawing stroke width", &[drawing.stroke_width])?;
            for p in &drawing.points {
                ensure_finite("drawing point", &[p.x, p.y])?;
            }
        }
        for text in &self.text_elements {
            ensure_finite("text", &[text.position.x, text.position.y, text.font_size])?;
        }
        for wall in &self.walls {
            ensure_finite(
                "wall",
                &[wall.start.x, wall.start.y, wall.end.x, wall.end.y, wall.thickness],
            )?;
        }
        for door in &self.doors {
            ensure_finite(
                "door",
                &[door.position.x, door.position.y, door.width, door.rotation],
            )?;
        }
        for point in &self.power_points {
            ensure_finite("power point", &[point.position.x, point.position.y])?;
        }
        let vb = &self.view_box;
        ensure_finite("view box", &[vb.x, vb.y, vb.width, vb.height])?;
        if let Some(space) = &self.space {
            space.validate()?;
        }
        Ok(())
    }
}
