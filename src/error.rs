//! Error taxonomy for the layout engine.
//!
//! Every variant is a synchronous, local validation failure. Operations that
//! return one of these have not mutated the document.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use uuid::Uuid;

use crate::doc::TabId;
use crate::element::ElementId;

/// Grepable error code and retryable flag for structured error reporting.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// Non-positive or non-finite size, unit size, or count.
    #[error("invalid dimension spec: {reason}")]
    InvalidDimensionSpec { reason: String },
    /// Non-positive or non-finite physical space extents.
    #[error("invalid space bounds: {reason}")]
    InvalidSpaceBounds { reason: String },
    /// A coordinate, angle, or length that is NaN or infinite.
    #[error("invalid coordinate: {reason}")]
    InvalidCoordinate { reason: String },
    #[error("unknown tab: {0}")]
    UnknownTab(TabId),
    #[error("unknown element {element_id} in tab {tab_id}")]
    UnknownElement { tab_id: TabId, element_id: ElementId },
    /// An id already taken within its scope (tabs of a document, elements
    /// of a tab).
    #[error("duplicate id: {0}")]
    DuplicateId(Uuid),
    #[error("cannot remove the last tab of a layout document")]
    CannotRemoveLastTab,
    /// A reorder request that is not a permutation of the current tabs.
    #[error("invalid tab order: {0}")]
    InvalidTabOrder(String),
    #[error("serialization error: {0}")]
    SerializationError(String),
    /// Failure reported by a persistence gateway.
    #[error("gateway error: {0}")]
    Gateway(String),
}

impl LayoutError {
    pub(crate) fn invalid_dimension(reason: impl Into<String>) -> Self {
        Self::InvalidDimensionSpec { reason: reason.into() }
    }

    pub(crate) fn invalid_bounds(reason: impl Into<String>) -> Self {
        Self::InvalidSpaceBounds { reason: reason.into() }
    }

    pub(crate) fn invalid_coordinate(reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate { reason: reason.into() }
    }
}

/// Reject NaN and infinities. JSON has no spelling for them, so a document
/// holding one would save but never load.
pub(crate) fn ensure_finite(field: &str, values: &[f64]) -> Result<(), LayoutError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(bad) => {
            Err(LayoutError::invalid_coordinate(format!("{field} must be finite (got {bad})")))
        }
        None => Ok(()),
    }
}

impl From<serde_json::Error> for LayoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimensionSpec { .. } => "E_INVALID_DIMENSION_SPEC",
            Self::InvalidSpaceBounds { .. } => "E_INVALID_SPACE_BOUNDS",
            Self::InvalidCoordinate { .. } => "E_INVALID_COORDINATE",
            Self::UnknownTab(_) => "E_UNKNOWN_TAB",
            Self::UnknownElement { .. } => "E_UNKNOWN_ELEMENT",
            Self::DuplicateId(_) => "E_DUPLICATE_ID",
            Self::CannotRemoveLastTab => "E_CANNOT_REMOVE_LAST_TAB",
            Self::InvalidTabOrder(_) => "E_INVALID_TAB_ORDER",
            Self::SerializationError(_) => "E_SERIALIZATION",
            Self::Gateway(_) => "E_GATEWAY",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Gateway(_))
    }
}
