//! Layout document: an ordered list of tabs plus an active-tab pointer.
//!
//! `LayoutFileData` is the single payload exchanged with the persistence
//! gateway, one per project. Its fields are private so that every change goes
//! through a validated operation: at any point in time the document has at
//! least one tab, tab ids are unique, and `active_tab_id` names one of them.
//! Deserialization runs the same validation, so a malformed payload never
//! becomes a `LayoutFileData`.
//!
//! Every operation validates before it writes. A returned error means the
//! document is exactly as it was.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::canvas::{TabCanvasData, ViewBox};
use crate::consts::{DEFAULT_NEW_TAB_PREFIX, DEFAULT_TAB_NAME, DUPLICATE_TAB_SUFFIX};
use crate::element::{ElementId, LayoutElement, PartialLayoutElement};
use crate::error::LayoutError;
use crate::ids::{Clock, IdSource, next_unused_id};
use crate::scale::SpaceBounds;

/// Unique identifier for a tab.
pub type TabId = Uuid;

/// One independent canvas page within a layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTab {
    pub id: TabId,
    pub name: String,
    pub canvas: TabCanvasData,
    /// Print/export page settings, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a4_dimensions: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    pub updated_at: i64,
}

impl LayoutTab {
    fn new(id: TabId, name: String, now_ms: i64) -> Self {
        Self {
            id,
            name,
            canvas: TabCanvasData::new(),
            a4_dimensions: None,
            category: None,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

/// Wire shape of the document, before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutFileDataRepr {
    tabs: Vec<LayoutTab>,
    active_tab_id: TabId,
    #[serde(default)]
    workflow_positions: BTreeMap<String, serde_json::Value>,
}

/// A project's layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "LayoutFileDataRepr")]
pub struct LayoutFileData {
    tabs: Vec<LayoutTab>,
    active_tab_id: TabId,
    /// Opaque positions owned by the host's workflow view.
    workflow_positions: BTreeMap<String, serde_json::Value>,
}

impl TryFrom<LayoutFileDataRepr> for LayoutFileData {
    type Error = LayoutError;

    fn try_from(repr: LayoutFileDataRepr) -> Result<Self, Self::Error> {
        let doc = Self {
            tabs: repr.tabs,
            active_tab_id: repr.active_tab_id,
            workflow_positions: repr.workflow_positions,
        };
        doc.validate()?;
        Ok(doc)
    }
}

fn reject(err: LayoutError) -> LayoutError {
    warn!(error = %err, "layout document operation rejected");
    err
}

impl LayoutFileData {
    /// A document with exactly one empty tab, which is active.
    pub fn create_empty(ids: &mut dyn IdSource, clock: &dyn Clock) -> Self {
        Self::create_empty_named(DEFAULT_TAB_NAME, ids, clock)
    }

    /// Like [`LayoutFileData::create_empty`] with a caller-chosen first tab
    /// name. A blank name falls back to the default.
    pub fn create_empty_named(name: &str, ids: &mut dyn IdSource, clock: &dyn Clock) -> Self {
        let name = match name.trim() {
            "" => DEFAULT_TAB_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };
        let tab = LayoutTab::new(ids.next_id(), name, clock.now_ms());
        info!(tab_id = %tab.id, "created empty layout document");
        Self {
            active_tab_id: tab.id,
            tabs: vec![tab],
            workflow_positions: BTreeMap::new(),
        }
    }

    // --- Accessors ---

    #[must_use]
    pub fn tabs(&self) -> &[LayoutTab] {
        &self.tabs
    }

    #[must_use]
    pub fn active_tab_id(&self) -> TabId {
        self.active_tab_id
    }

    /// The active tab.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] if the active id is dangling. Every
    /// constructor and mutation keeps it valid, so this does not happen for a
    /// `LayoutFileData` built through this API.
    pub fn active_tab(&self) -> Result<&LayoutTab, LayoutError> {
        self.tab(self.active_tab_id)
            .ok_or(LayoutError::UnknownTab(self.active_tab_id))
    }

    #[must_use]
    pub fn tab(&self, id: TabId) -> Option<&LayoutTab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn workflow_positions(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.workflow_positions
    }

    fn index_of(&self, id: TabId) -> Result<usize, LayoutError> {
        self.tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| reject(LayoutError::UnknownTab(id)))
    }

    fn fresh_tab_id(&self, ids: &mut dyn IdSource) -> Result<TabId, LayoutError> {
        next_unused_id(ids, self.tabs.len(), |id| self.tab(id).is_some()).map_err(reject)
    }

    fn tab_mut(&mut self, id: TabId) -> Result<&mut LayoutTab, LayoutError> {
        let index = self.index_of(id)?;
        Ok(&mut self.tabs[index])
    }

    // --- Tab lifecycle ---

    /// Append a new empty tab and return its id. A blank name becomes
    /// `"Layout <n>"` where `n` is the tab's position. The active tab does not
    /// change. Ids already used by a tab are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::DuplicateId`] if `ids` only yields ids that are
    /// already taken.
    pub fn add_tab(
        &mut self,
        name: &str,
        ids: &mut dyn IdSource,
        clock: &dyn Clock,
    ) -> Result<TabId, LayoutError> {
        let id = self.fresh_tab_id(ids)?;
        let name = match name.trim() {
            "" => format!("{DEFAULT_NEW_TAB_PREFIX} {}", self.tabs.len() + 1),
            trimmed => trimmed.to_string(),
        };
        self.tabs.push(LayoutTab::new(id, name, clock.now_ms()));
        debug!(tab_id = %id, tabs = self.tabs.len(), "tab added");
        Ok(id)
    }

    /// Remove a tab. If it was active, the previous tab becomes active (or the
    /// new first tab when the removed one was first).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::CannotRemoveLastTab`] for a one-tab document and
    /// [`LayoutError::UnknownTab`] for an absent id.
    pub fn remove_tab(&mut self, id: TabId) -> Result<LayoutTab, LayoutError> {
        if self.tabs.len() == 1 {
            return Err(reject(LayoutError::CannotRemoveLastTab));
        }
        let index = self.index_of(id)?;
        let removed = self.tabs.remove(index);
        if removed.id == self.active_tab_id {
            self.active_tab_id = self.tabs[index.saturating_sub(1)].id;
            debug!(tab_id = %self.active_tab_id, "active tab reassigned");
        }
        debug!(tab_id = %id, tabs = self.tabs.len(), "tab removed");
        Ok(removed)
    }

    /// Rename a tab. The name is trimmed; a blank name becomes `"Layout <n>"`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id.
    pub fn rename_tab(
        &mut self,
        id: TabId,
        name: &str,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        let index = self.index_of(id)?;
        let name = match name.trim() {
            "" => format!("{DEFAULT_NEW_TAB_PREFIX} {}", index + 1),
            trimmed => trimmed.to_string(),
        };
        let tab = &mut self.tabs[index];
        tab.name = name;
        tab.updated_at = clock.now_ms();
        debug!(tab_id = %id, name = %tab.name, "tab renamed");
        Ok(())
    }

    /// Put the tabs in the given order. `order` must list every tab exactly
    /// once.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an id not in the document and
    /// [`LayoutError::InvalidTabOrder`] when `order` omits or repeats a tab.
    pub fn reorder_tabs(&mut self, order: &[TabId]) -> Result<(), LayoutError> {
        let mut rank: HashMap<TabId, usize> = HashMap::with_capacity(order.len());
        for (i, id) in order.iter().enumerate() {
            self.index_of(*id)?;
            if rank.insert(*id, i).is_some() {
                return Err(reject(LayoutError::InvalidTabOrder(format!("tab {id} listed twice"))));
            }
        }
        if rank.len() != self.tabs.len() {
            return Err(reject(LayoutError::InvalidTabOrder(format!(
                "expected {} tabs, got {}",
                self.tabs.len(),
                rank.len()
            ))));
        }
        self.tabs.sort_by_key(|t| rank.get(&t.id).copied().unwrap_or(usize::MAX));
        debug!(tabs = self.tabs.len(), "tabs reordered");
        Ok(())
    }

    /// Make `id` the active tab.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id.
    pub fn set_active_tab(&mut self, id: TabId) -> Result<(), LayoutError> {
        self.index_of(id)?;
        self.active_tab_id = id;
        debug!(tab_id = %id, "active tab set");
        Ok(())
    }

    /// Deep-copy a tab right after itself, under a fresh id.
    ///
    /// Element ids inside the copy are kept: they are scoped to their tab, and
    /// keeping them preserves door-to-wall links.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id and
    /// [`LayoutError::DuplicateId`] if `ids` only yields taken ids.
    pub fn duplicate_tab(
        &mut self,
        id: TabId,
        ids: &mut dyn IdSource,
        clock: &dyn Clock,
    ) -> Result<TabId, LayoutError> {
        let index = self.index_of(id)?;
        let new_id = self.fresh_tab_id(ids)?;
        let now = clock.now_ms();
        let mut copy = self.tabs[index].clone();
        copy.id = new_id;
        copy.name = format!("{}{DUPLICATE_TAB_SUFFIX}", copy.name);
        copy.created_at = now;
        copy.updated_at = now;
        self.tabs.insert(index + 1, copy);
        debug!(source = %id, tab_id = %new_id, "tab duplicated");
        Ok(new_id)
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id.
    pub fn set_tab_category(
        &mut self,
        id: TabId,
        category: Option<String>,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        let tab = self.tab_mut(id)?;
        tab.category = category;
        tab.updated_at = clock.now_ms();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id.
    pub fn set_tab_a4_dimensions(
        &mut self,
        id: TabId,
        a4_dimensions: Option<serde_json::Value>,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        let tab = self.tab_mut(id)?;
        tab.a4_dimensions = a4_dimensions;
        tab.updated_at = clock.now_ms();
        Ok(())
    }

    pub fn set_workflow_position(&mut self, key: impl Into<String>, position: serde_json::Value) {
        self.workflow_positions.insert(key.into(), position);
    }

    // --- Canvas mutation ---

    /// Apply `mutator` to one tab's canvas and refresh that tab's
    /// `updated_at`.
    ///
    /// The mutator works on a copy. The copy replaces the tab's canvas only if
    /// the mutator succeeds and the result validates, so a failure leaves the
    /// tab untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id, the mutator's own
    /// error, or the validation error of the mutated canvas.
    pub fn mutate_canvas<R>(
        &mut self,
        id: TabId,
        clock: &dyn Clock,
        mutator: impl FnOnce(&mut TabCanvasData) -> Result<R, LayoutError>,
    ) -> Result<R, LayoutError> {
        let index = self.index_of(id)?;
        let mut draft = self.tabs[index].canvas.clone();
        let out = mutator(&mut draft).map_err(reject)?;
        draft.validate().map_err(reject)?;
        let tab = &mut self.tabs[index];
        tab.canvas = draft;
        tab.updated_at = clock.now_ms();
        debug!(tab_id = %id, items = tab.canvas.len(), "canvas mutated");
        Ok(out)
    }

    /// Insert or replace a layout element on a tab.
    ///
    /// # Errors
    ///
    /// See [`LayoutFileData::mutate_canvas`] and
    /// [`TabCanvasData::add_element`].
    pub fn add_element(
        &mut self,
        tab_id: TabId,
        element: LayoutElement,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        self.mutate_canvas(tab_id, clock, |canvas| canvas.add_element(element))
    }

    /// Add a new layout element to a tab, refusing an id the tab already
    /// holds.
    ///
    /// # Errors
    ///
    /// See [`LayoutFileData::mutate_canvas`] and
    /// [`TabCanvasData::insert_element`].
    pub fn insert_element(
        &mut self,
        tab_id: TabId,
        element: LayoutElement,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        self.mutate_canvas(tab_id, clock, |canvas| canvas.insert_element(element))
    }

    /// A fresh element id for `tab_id`, skipping ids the tab already holds.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id and
    /// [`LayoutError::DuplicateId`] if `ids` only yields taken ids.
    pub fn fresh_element_id(
        &self,
        tab_id: TabId,
        ids: &mut dyn IdSource,
    ) -> Result<ElementId, LayoutError> {
        let index = self.index_of(tab_id)?;
        let canvas = &self.tabs[index].canvas;
        next_unused_id(ids, canvas.shapes.len(), |id| canvas.element(id).is_some())
            .map_err(reject)
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownElement`] if the tab has no such element,
    /// plus the errors of [`LayoutFileData::mutate_canvas`].
    pub fn update_element(
        &mut self,
        tab_id: TabId,
        element_id: ElementId,
        partial: &PartialLayoutElement,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        self.mutate_canvas(tab_id, clock, |canvas| {
            if canvas.update_element(element_id, partial)? {
                Ok(())
            } else {
                Err(LayoutError::UnknownElement { tab_id, element_id })
            }
        })
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownElement`] if the tab has no such element,
    /// plus the errors of [`LayoutFileData::mutate_canvas`].
    pub fn remove_element(
        &mut self,
        tab_id: TabId,
        element_id: ElementId,
        clock: &dyn Clock,
    ) -> Result<LayoutElement, LayoutError> {
        self.mutate_canvas(tab_id, clock, |canvas| {
            canvas
                .remove_element(element_id)
                .ok_or(LayoutError::UnknownElement { tab_id, element_id })
        })
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::UnknownTab`] for an absent id and
    /// [`LayoutError::InvalidCoordinate`] for a non-finite view box.
    pub fn set_view_box(
        &mut self,
        tab_id: TabId,
        view_box: ViewBox,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        self.mutate_canvas(tab_id, clock, |canvas| {
            canvas.view_box = view_box;
            Ok(())
        })
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpaceBounds`] for malformed bounds and
    /// [`LayoutError::UnknownTab`] for an absent id.
    pub fn set_tab_space(
        &mut self,
        tab_id: TabId,
        space: SpaceBounds,
        clock: &dyn Clock,
    ) -> Result<(), LayoutError> {
        self.mutate_canvas(tab_id, clock, |canvas| {
            canvas.space = Some(space);
            Ok(())
        })
    }

    // --- Validation ---

    /// Check every document invariant.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::SerializationError`] for structural violations
    /// (no tabs, duplicate tab ids), [`LayoutError::UnknownTab`] when the
    /// active id is dangling, and element or bounds errors from any tab.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.tabs.is_empty() {
            return Err(LayoutError::SerializationError("layout document has no tabs".into()));
        }
        let mut seen = HashSet::with_capacity(self.tabs.len());
        for tab in &self.tabs {
            if !seen.insert(tab.id) {
                return Err(LayoutError::SerializationError(format!("duplicate tab id {}", tab.id)));
            }
            tab.canvas.validate()?;
        }
        if !seen.contains(&self.active_tab_id) {
            return Err(LayoutError::UnknownTab(self.active_tab_id));
        }
        Ok(())
    }
}
