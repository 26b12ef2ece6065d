//! Persistence boundary: immutable snapshots and the gateway seam.
//!
//! DESIGN
//! ======
//! The engine never stores bytes itself. A save takes an immutable
//! [`Snapshot`] of a validated document and hands it to a
//! [`PersistenceGateway`], keyed by the owning project. The same snapshot can
//! be handed over again, so saves are idempotent and safe to retry at the
//! gateway. Serializing concurrent saves of one project is the gateway's job.
//!
//! ERROR HANDLING
//! ==============
//! Anything that fails to deserialize or validate on load is reported as
//! [`LayoutError::SerializationError`]. Gateway failures are reported as
//! [`LayoutError::Gateway`], the only retryable error.

#[cfg(test)]
#[path = "persistence_test.rs"]
mod persistence_test;

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::info;
use uuid::Uuid;

use crate::config::LayoutConfig;
use crate::doc::LayoutFileData;
use crate::error::LayoutError;
use crate::ids::{Clock, IdSource};

/// Identifier of the project (event) that owns a layout document.
pub type ProjectId = Uuid;

/// Stores and loads one layout document per project.
pub trait PersistenceGateway {
    /// Load the project's document payload, or `None` if it has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Gateway`] when the backing store fails.
    fn load(&self, project: ProjectId) -> Result<Option<serde_json::Value>, LayoutError>;

    /// Store the project's document payload, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Gateway`] when the backing store fails.
    fn store(&self, project: ProjectId, payload: &serde_json::Value) -> Result<(), LayoutError>;
}

/// Immutable, plain JSON image of a validated document.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot(serde_json::Value);

impl Snapshot {
    #[must_use]
    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> serde_json::Value {
        self.0
    }
}

impl LayoutFileData {
    /// Validate and capture the document as plain JSON.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, or
    /// [`LayoutError::SerializationError`] if serialization fails.
    pub fn snapshot(&self) -> Result<Snapshot, LayoutError> {
        self.validate()?;
        Ok(Snapshot(serde_json::to_value(self)?))
    }

    /// Rebuild a document from a persisted payload.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::SerializationError`] when the payload is not a
    /// well-formed, valid document.
    pub fn from_snapshot(payload: &serde_json::Value) -> Result<Self, LayoutError> {
        Ok(serde_json::from_value(payload.clone())?)
    }
}

/// Snapshot `doc` and store it for `project`.
///
/// # Errors
///
/// Returns snapshot errors or the gateway's error.
pub fn save(
    gateway: &dyn PersistenceGateway,
    project: ProjectId,
    doc: &LayoutFileData,
) -> Result<Snapshot, LayoutError> {
    let snapshot = doc.snapshot()?;
    gateway.store(project, snapshot.as_value())?;
    info!(project = %project, tabs = doc.tabs().len(), "layout document saved");
    Ok(snapshot)
}

/// Load the project's document, creating and storing an empty one if the
/// project has none yet.
///
/// # Errors
///
/// Returns [`LayoutError::SerializationError`] for a corrupt stored payload
/// and the gateway's error if loading or the initial store fails.
pub fn load_or_create(
    gateway: &dyn PersistenceGateway,
    project: ProjectId,
    config: &LayoutConfig,
    ids: &mut dyn IdSource,
    clock: &dyn Clock,
) -> Result<LayoutFileData, LayoutError> {
    if let Some(payload) = gateway.load(project)? {
        let doc = LayoutFileData::from_snapshot(&payload)?;
        info!(project = %project, tabs = doc.tabs().len(), "layout document loaded");
        return Ok(doc);
    }
    let doc = LayoutFileData::create_empty_named(&config.default_tab_name, ids, clock);
    save(gateway, project, &doc)?;
    info!(project = %project, "layout document created");
    Ok(doc)
}

/// In-process gateway keeping each project's payload as JSON text.
#[derive(Debug, Default)]
pub struct MemoryGateway {
    documents: Mutex<HashMap<ProjectId, String>>,
}

impl MemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of projects with a stored document.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Gateway`] if the store lock is poisoned.
    pub fn len(&self) -> Result<usize, LayoutError> {
        Ok(self.lock()?.len())
    }

    /// # Errors
    ///
    /// Returns [`LayoutError::Gateway`] if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, LayoutError> {
        Ok(self.lock()?.is_empty())
    }

    /// Replace a project's raw stored text, bypassing validation.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::Gateway`] if the store lock is poisoned.
    pub fn put_raw(&self, project: ProjectId, text: impl Into<String>) -> Result<(), LayoutError> {
        self.lock()?.insert(project, text.into());
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<ProjectId, String>>, LayoutError> {
        self.documents
            .lock()
            .map_err(|_| LayoutError::Gateway("memory gateway lock poisoned".into()))
    }
}

impl PersistenceGateway for MemoryGateway {
    fn load(&self, project: ProjectId) -> Result<Option<serde_json::Value>, LayoutError> {
        let guard = self.lock()?;
        let Some(text) = guard.get(&project) else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(text)?))
    }

    fn store(&self, project: ProjectId, payload: &serde_json::Value) -> Result<(), LayoutError> {
        let text = serde_json::to_string(payload)?;
        self.lock()?.insert(project, text);
        Ok(())
    }
}
