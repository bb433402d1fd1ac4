//! Common test fixtures for the service layer.
#![allow(dead_code)]

pub mod mocks;

use bytes::Bytes;
use dossier_core::config::TrackerConfig;
use dossier_core::{UploadedFile, ValidationPolicy};
use dossier_metadata::models::{CaseRow, NewCase};
use dossier_metadata::{CaseRepo, MetadataStore, SqliteStore};
use dossier_service::{CaseService, FileStorageCoordinator};
use dossier_storage::{FileStore, FilesystemBackend};
use dossier_tracker::AccessTracker;
use std::path::PathBuf;
use std::sync::Arc;
use time::OffsetDateTime;

/// A full service stack over temp-dir stores.
pub struct TestContext {
    pub metadata: Arc<dyn MetadataStore>,
    pub storage: Arc<dyn FileStore>,
    pub coordinator: FileStorageCoordinator,
    pub tracker: Arc<AccessTracker>,
    pub service: CaseService,
    storage_root: PathBuf,
    _dir: tempfile::TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_policy(ValidationPolicy::default()).await
    }

    pub async fn with_policy(policy: ValidationPolicy) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage_root = dir.path().join("files");

        let metadata: Arc<dyn MetadataStore> = Arc::new(
            SqliteStore::new(dir.path().join("metadata.db"))
                .await
                .expect("open metadata store"),
        );
        let storage: Arc<dyn FileStore> = Arc::new(
            FilesystemBackend::new(&storage_root)
                .await
                .expect("open storage backend"),
        );
        let tracker = Arc::new(
            AccessTracker::start(&TrackerConfig {
                snapshot_path: Some(dir.path().join("accessed_cases.json")),
                save_interval_secs: 3600,
                shutdown_flush_timeout_secs: 5,
            })
            .await,
        );

        let coordinator =
            FileStorageCoordinator::new(metadata.clone(), storage.clone(), policy);
        let service = CaseService::new(metadata.clone(), tracker.clone());

        Self {
            metadata,
            storage,
            coordinator,
            tracker,
            service,
            storage_root,
            _dir: dir,
        }
    }

    /// Create a bare case directly in the metadata store.
    pub async fn create_case(&self, number: &str) -> CaseRow {
        self.metadata
            .create_case(&NewCase {
                number: number.to_string(),
                author: Some("tester".to_string()),
                investigator: None,
                policeman: None,
                object: None,
                upload_date: OffsetDateTime::now_utc().date(),
            })
            .await
            .expect("create case")
    }

    /// Path of a stored name inside the storage root.
    pub fn disk_path(&self, stored_name: &str) -> PathBuf {
        self.storage_root.join(stored_name)
    }

    /// Whether a stored name has a physical file.
    pub fn on_disk(&self, stored_name: &str) -> bool {
        self.disk_path(stored_name).exists()
    }
}

/// An uploaded file with the given name and payload.
pub fn upload(name: &str, data: &'static [u8]) -> UploadedFile {
    UploadedFile::new(name, Bytes::from_static(data))
}
