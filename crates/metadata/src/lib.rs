//! Metadata store abstraction and implementations for dossier.
//!
//! This crate provides the relational half of the dual-store model:
//! - Case records keyed by their stable number
//! - File records (stored name, original name, size, type, upload audit)
//! - Repository traits the service layer programs against

pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use error::{MetadataError, MetadataResult};
pub use repos::{CaseFileRepo, CaseRepo};
pub use store::{MetadataStore, SqliteStore};

use dossier_core::config::MetadataConfig;
use std::sync::Arc;

/// Create a metadata store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn MetadataStore>> {
    match config {
        MetadataConfig::Sqlite { path } => {
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn MetadataStore>)
        }
    }
}
