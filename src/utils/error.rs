//! Error Handling
//!
//! Unified error taxonomy for the sync engine.
//! Uses thiserror for ergonomic error definitions.
//!
//! Every store action failure is normalized to one of these variants, recorded
//! in the owning store's error field, and returned to the caller; the stored
//! message and the returned error always agree.

use thiserror::Error;

use crate::api::ApiError;

/// The operation that produced a mutation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for MutationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// Engine-wide error type.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Authoritative fetch failures; surfaced as the store's `error` field
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Create/update/delete failures, tagged by operation kind; the cache
    /// stays usable (stale-but-available) after rollback
    #[error("{kind} failed: {message}")]
    Mutation { kind: MutationKind, message: String },

    /// Background reconciliation failures; stored in `polling_error`, never
    /// in the blocking `error` field
    #[error("Polling error: {0}")]
    Polling(String),

    /// Rejected before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Persisted-state failures
    #[error("Storage error: {0}")]
    Storage(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Transport errors before normalization at the action boundary
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

/// Result type alias for engine errors
pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Create a fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a mutation error tagged with the failed operation
    pub fn mutation(kind: MutationKind, msg: impl Into<String>) -> Self {
        Self::Mutation {
            kind,
            message: msg.into(),
        }
    }

    /// Create a polling error
    pub fn polling(msg: impl Into<String>) -> Self {
        Self::Polling(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// The mutation kind, if this is a mutation error
    pub fn mutation_kind(&self) -> Option<MutationKind> {
        match self {
            Self::Mutation { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
