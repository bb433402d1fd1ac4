//! Service-level error taxonomy.
//!
//! Validation and not-found conditions are deterministic and caller-visible.
//! Storage failures during uploads are handled per file inside the batch;
//! storage failures during deletes are re-raised because they leave a
//! known-inconsistent state that must be surfaced, not swallowed.

use dossier_core::ValidationError;
use dossier_metadata::MetadataError;
use dossier_storage::StorageError;
use thiserror::Error;

/// Errors surfaced by the service layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("metadata error: {0}")]
    Metadata(MetadataError),
}

impl From<MetadataError> for ServiceError {
    fn from(e: MetadataError) -> Self {
        match e {
            MetadataError::NotFound(what) => ServiceError::NotFound(what),
            MetadataError::AlreadyExists(what) => ServiceError::AlreadyExists(what),
            other => ServiceError::Metadata(other),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
