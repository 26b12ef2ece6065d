//! Editing session over one project's layout document.
//!
//! [`LayoutEngine`] is what the interactive surface talks to: it owns the
//! document, the id and clock capabilities, the measured canvas size, and a
//! dirty flag that tells the host a save is due. All geometry goes through
//! [`crate::render`]; all mutations go through [`LayoutFileData`].

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::doc::{LayoutFileData, TabId};
use crate::element::{ElementId, ElementKind, LayoutElement, PartialLayoutElement, Position};
use crate::error::LayoutError;
use crate::ids::{Clock, IdSource};
use crate::persistence::{self, PersistenceGateway, ProjectId};
use crate::render::{RenderData, render_tab};
use crate::scale::{SpaceBounds, Viewport};

pub struct LayoutEngine<I: IdSource, C: Clock> {
    project: ProjectId,
    doc: LayoutFileData,
    config: LayoutConfig,
    ids: I,
    clock: C,
    canvas_width: f64,
    canvas_height: Option<f64>,
    dirty: bool,
}

impl<I: IdSource, C: Clock> LayoutEngine<I, C> {
    /// Open the project's document through the gateway, creating it on first
    /// use.
    ///
    /// # Errors
    ///
    /// See [`persistence::load_or_create`].
    pub fn open(
        gateway: &dyn PersistenceGateway,
        project: ProjectId,
        config: LayoutConfig,
        mut ids: I,
        clock: C,
    ) -> Result<Self, LayoutError> {
        let doc = persistence::load_or_create(gateway, project, &config, &mut ids, &clock)?;
        Ok(Self::with_document(project, doc, config, ids, clock))
    }

    /// Wrap an already loaded document.
    #[must_use]
    pub fn with_document(
        project: ProjectId,
        doc: LayoutFileData,
        config: LayoutConfig,
        ids: I,
        clock: C,
    ) -> Self {
        let canvas_width = config.canvas_width_px;
        Self {
            project,
            doc,
            config,
            ids,
            clock,
            canvas_width,
            canvas_height: None,
            dirty: false,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn document(&self) -> &LayoutFileData {
        &self.doc
    }

    #[must_use]
    pub fn project(&self) -> ProjectId {
        self.project
    }

    /// Whether the document changed since the last successful save.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // --- Canvas size ---

    /// Record the measured canvas size. With a height the space is
    /// letterboxed; without one it is scaled to the width.
    pub fn set_canvas_size(&mut self, width_px: f64, height_px: Option<f64>) {
        self.canvas_width = width_px;
        self.canvas_height = height_px;
    }

    /// Viewport for the active tab's physical space.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] if the active tab has no
    /// space yet or its space is malformed.
    pub fn viewport(&self) -> Result<Viewport, LayoutError> {
        let Some(space) = self.doc.active_tab()?.canvas.space else {
            return Err(LayoutError::invalid_bounds("active tab has no space bounds"));
        };
        match self.canvas_height {
            Some(height) => Viewport::fit(self.canvas_width, height, &space),
            None => Viewport::for_canvas_width(self.canvas_width, &space),
        }
    }

    /// Exact render geometry for the active tab.
    ///
    /// # Errors
    ///
    /// Viewport errors and element dimension errors.
    pub fn render_active(&self) -> Result<Vec<(ElementId, RenderData)>, LayoutError> {
        render_tab(&self.doc.active_tab()?.canvas, &self.viewport()?)
    }

    /// Render geometry for the active tab, rounded per the configured policy.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutEngine::render_active`].
    pub fn display_active(&self) -> Result<Vec<(ElementId, RenderData)>, LayoutError> {
        let rounding = self.config.rounding;
        Ok(self
            .render_active()?
            .into_iter()
            .map(|(id, rd)| (id, rd.display(rounding)))
            .collect())
    }

    // --- Tabs ---

    /// # Errors
    ///
    /// See [`LayoutFileData::add_tab`].
    pub fn add_tab(&mut self, name: &str) -> Result<TabId, LayoutError> {
        let id = self.doc.add_tab(name, &mut self.ids, &self.clock)?;
        self.dirty = true;
        Ok(id)
    }

    /// # Errors
    ///
    /// See [`LayoutFileData::remove_tab`].
    pub fn remove_tab(&mut self, id: TabId) -> Result<(), LayoutError> {
        self.doc.remove_tab(id)?;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`LayoutFileData::rename_tab`].
    pub fn rename_tab(&mut self, id: TabId, name: &str) -> Result<(), LayoutError> {
        self.doc.rename_tab(id, name, &self.clock)?;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`LayoutFileData::reorder_tabs`].
    pub fn reorder_tabs(&mut self, order: &[TabId]) -> Result<(), LayoutError> {
        self.doc.reorder_tabs(order)?;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`LayoutFileData::set_active_tab`].
    pub fn set_active_tab(&mut self, id: TabId) -> Result<(), LayoutError> {
        self.doc.set_active_tab(id)?;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`LayoutFileData::duplicate_tab`].
    pub fn duplicate_tab(&mut self, id: TabId) -> Result<TabId, LayoutError> {
        let new_id = self.doc.duplicate_tab(id, &mut self.ids, &self.clock)?;
        self.dirty = true;
        Ok(new_id)
    }

    /// Set the physical space of the active tab.
    ///
    /// # Errors
    ///
    /// See [`LayoutFileData::set_tab_space`].
    pub fn set_space(&mut self, space: SpaceBounds) -> Result<(), LayoutError> {
        self.doc.set_tab_space(self.doc.active_tab_id(), space, &self.clock)?;
        self.dirty = true;
        Ok(())
    }

    // --- Elements on the active tab ---

    /// Place a catalogue element with its default size on the active tab,
    /// under an id the tab does not hold yet.
    ///
    /// # Errors
    ///
    /// See [`LayoutFileData::fresh_element_id`] and
    /// [`LayoutFileData::insert_element`].
    pub fn place(
        &mut self,
        kind: ElementKind,
        position: Position,
    ) -> Result<ElementId, LayoutError> {
        let id = self.doc.fresh_element_id(self.doc.active_tab_id(), &mut self.ids)?;
        self.place_element(LayoutElement::with_default_size(id, kind, position))
    }

    /// Place a fully specified element on the active tab. An element already
    /// on the tab is never replaced.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateId`] if the tab already holds the id;
    /// see [`LayoutFileData::insert_element`].
    pub fn place_element(&mut self, element: LayoutElement) -> Result<ElementId, LayoutError> {
        let id = element.id;
        self.doc.insert_element(self.doc.active_tab_id(), element, &self.clock)?;
        self.dirty = true;
        debug!(element_id = %id, "element placed");
        Ok(id)
    }

    /// # Errors
    ///
    /// See [`LayoutFileData::update_element`].
    pub fn update_element(
        &mut self,
        id: ElementId,
        partial: &PartialLayoutElement,
    ) -> Result<(), LayoutError> {
        self.doc.update_element(self.doc.active_tab_id(), id, partial, &self.clock)?;
        self.dirty = true;
        Ok(())
    }

    /// # Errors
    ///
    /// See [`LayoutFileData::remove_element`].
    pub fn remove_element(&mut self, id: ElementId) -> Result<LayoutElement, LayoutError> {
        let removed = self.doc.remove_element(self.doc.active_tab_id(), id, &self.clock)?;
        self.dirty = true;
        Ok(removed)
    }

    // --- Persistence ---

    /// Save through the gateway and clear the dirty flag. The flag stays set
    /// if the gateway fails, so the host can retry.
    ///
    /// # Errors
    ///
    /// See [`persistence::save`].
    pub fn save(&mut self, gateway: &dyn PersistenceGateway) -> Result<(), LayoutError> {
        persistence::save(gateway, self.project, &self.doc)?;
        self.dirty = false;
        Ok(())
    }
}
