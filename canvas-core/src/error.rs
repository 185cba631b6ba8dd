//! Error types for canvas operations.

use thiserror::Error;

use crate::ElementId;

/// Result type for canvas operations.
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur in canvas operations.
#[derive(Debug, Error)]
pub enum CanvasError {
    /// Element not found in the store.
    #[error("Element not found: {0}")]
    ElementNotFound(ElementId),

    /// Invalid element operation.
    #[error("Invalid operation on element: {0}")]
    InvalidOperation(String),

    /// Snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local snapshot store failure.
    #[error("Persistence error: {0}")]
    Persistence(#[from] crate::snapshot::PersistenceError),

    /// Remote project collaborator failure.
    #[error("Remote project error: {0}")]
    Remote(#[from] crate::remote::RemoteError),
}
