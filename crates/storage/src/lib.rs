//! Physical file storage for the dossier case backend.
//!
//! This crate owns one half of the dual-store consistency problem: the
//! on-disk copies of case files, addressed by their allocated stored names.
//! The metadata half lives in `dossier-metadata`; nothing here is
//! transactional across the two (see the coordinator in `dossier-service`).

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::filesystem::FilesystemBackend;
pub use error::{StorageError, StorageResult};
pub use traits::FileStore;

use dossier_core::config::StorageConfig;
use std::sync::Arc;

/// Create a file store from configuration.
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn FileStore>> {
    match config {
        StorageConfig::Filesystem { path } => {
            let backend = FilesystemBackend::new(path).await?;
            Ok(Arc::new(backend))
        }
    }
}
