//! File storage coordination across disk and metadata.
//!
//! Writes to the two stores are deliberately not transactional: there is no
//! two-phase commit and no compensating rollback on partial failure. Uploads
//! write disk before metadata and deletes remove disk before metadata, so a
//! crash in between leaves a detectable orphaned record rather than an
//! invisible orphaned disk file.

use crate::error::{ServiceError, ServiceResult};
use crate::naming::FileNameAllocator;
use crate::page::Page;
use bytes::Bytes;
use dossier_core::{CaseNumber, UploadedFile, ValidationPolicy, file_extension};
use dossier_metadata::models::{CaseFileRow, CaseRow, NewCase, NewCaseFile};
use dossier_metadata::{CaseFileRepo, CaseRepo, MetadataStore};
use dossier_storage::FileStore;
use std::sync::Arc;
use time::OffsetDateTime;

/// Outcome of a batch upload.
///
/// Each file's path through the pipeline is independent: failures are logged
/// and counted, never re-raised, and never abort sibling files.
#[derive(Debug)]
pub struct BatchOutcome {
    /// File records that reached the metadata store.
    pub saved: Vec<CaseFileRow>,
    /// Number of files submitted in the batch.
    pub submitted: usize,
}

impl BatchOutcome {
    /// Files that made it all the way through.
    pub fn saved_count(&self) -> usize {
        self.saved.len()
    }

    /// Files that failed at some stage.
    pub fn failed_count(&self) -> usize {
        self.submitted - self.saved.len()
    }
}

/// Fields for creating a case through the coordinator.
#[derive(Debug, Clone)]
pub struct CaseDraft {
    pub number: CaseNumber,
    pub author: Option<String>,
    pub investigator: Option<String>,
    pub policeman: Option<String>,
    pub object: Option<String>,
}

/// Stage of the per-file pipeline, for failure logs.
#[derive(Clone, Copy, Debug)]
enum Stage {
    Validate,
    AllocateName,
    WriteDisk,
    PersistRecord,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::Validate => "validate",
            Stage::AllocateName => "allocate-name",
            Stage::WriteDisk => "disk-write",
            Stage::PersistRecord => "record-persist",
        }
    }
}

/// Orchestrates per-file validate → allocate → write → persist across a
/// batch, and the symmetric delete path.
pub struct FileStorageCoordinator {
    metadata: Arc<dyn MetadataStore>,
    storage: Arc<dyn FileStore>,
    allocator: FileNameAllocator,
    policy: ValidationPolicy,
}

impl FileStorageCoordinator {
    /// Create a coordinator over the given stores.
    pub fn new(
        metadata: Arc<dyn MetadataStore>,
        storage: Arc<dyn FileStore>,
        policy: ValidationPolicy,
    ) -> Self {
        let allocator = FileNameAllocator::new(metadata.clone(), storage.clone());
        Self {
            metadata,
            storage,
            allocator,
            policy,
        }
    }

    /// Add files to an existing case.
    ///
    /// Case-not-found is the only batch-level hard failure; everything else
    /// is per-file.
    pub async fn add_files(
        &self,
        case_number: &CaseNumber,
        files: Vec<UploadedFile>,
        uploaded_by: Option<&str>,
    ) -> ServiceResult<BatchOutcome> {
        let case = self.require_case(case_number).await?;
        let outcome = self.store_batch(&case, files, uploaded_by).await;
        if outcome.saved_count() > 0 {
            self.bump_update_date(&case).await;
        }
        Ok(outcome)
    }

    /// Create a new case and store its initial files in one call.
    ///
    /// A taken case number fails with `AlreadyExists` before anything is
    /// written.
    pub async fn create_case_with_files(
        &self,
        draft: CaseDraft,
        files: Vec<UploadedFile>,
        uploaded_by: Option<&str>,
    ) -> ServiceResult<(CaseRow, BatchOutcome)> {
        let case = self
            .metadata
            .create_case(&NewCase {
                number: draft.number.as_str().to_string(),
                author: draft.author,
                investigator: draft.investigator,
                policeman: draft.policeman,
                object: draft.object,
                upload_date: OffsetDateTime::now_utc().date(),
            })
            .await?;
        tracing::info!(case = %case.number, "created case");

        let outcome = self.store_batch(&case, files, uploaded_by).await;
        Ok((case, outcome))
    }

    /// Delete one file from a case.
    ///
    /// Disk deletion runs first and is idempotent: a physically missing file
    /// still gets its metadata record removed. A disk I/O error is re-raised
    /// and leaves the record in place. A successful delete bumps the case's
    /// update date, like any other file mutation.
    pub async fn delete_file(&self, case_number: &CaseNumber, file_id: i64) -> ServiceResult<()> {
        let case = self.require_case(case_number).await?;
        let file = self.require_owned_file(&case, file_id).await?;

        let removed = self.storage.delete_if_exists(&file.file_name).await?;
        if !removed {
            tracing::warn!(
                case = %case.number,
                file = %file.file_name,
                "physical file already absent, removing record anyway"
            );
        }

        self.metadata.delete_case_file(file.file_id).await?;
        self.bump_update_date(&case).await;
        tracing::info!(
            case = %case.number,
            file_id,
            file = %file.file_name,
            "deleted case file"
        );
        Ok(())
    }

    /// Read one file's contents, checking ownership first.
    pub async fn download_file(
        &self,
        case_number: &CaseNumber,
        file_id: i64,
    ) -> ServiceResult<(CaseFileRow, Bytes)> {
        let case = self.require_case(case_number).await?;
        let file = self.require_owned_file(&case, file_id).await?;

        let data = self.storage.get(&file.file_name).await.map_err(|e| {
            if e.is_not_found() {
                ServiceError::NotFound(format!(
                    "file {} missing on disk for case {}",
                    file.file_name, case.number
                ))
            } else {
                ServiceError::Storage(e)
            }
        })?;
        Ok((file, data))
    }

    /// List a case's file records, newest upload first.
    pub async fn list_files(
        &self,
        case_number: &CaseNumber,
        page: u32,
        size: u32,
    ) -> ServiceResult<Page<CaseFileRow>> {
        if size == 0 {
            return Err(ServiceError::InvalidRequest(
                "page size must be positive".to_string(),
            ));
        }
        let case = self.require_case(case_number).await?;
        let items = self.metadata.list_case_files(case.case_id, page, size).await?;
        let total = self.metadata.count_case_files(case.case_id).await? as u64;
        Ok(Page {
            items,
            total,
            page,
            size,
        })
    }

    async fn store_batch(
        &self,
        case: &CaseRow,
        files: Vec<UploadedFile>,
        uploaded_by: Option<&str>,
    ) -> BatchOutcome {
        let submitted = files.len();
        // One timestamp for the whole batch; listing order stays stable via
        // the insertion-id tiebreak.
        let uploaded_at = OffsetDateTime::now_utc();
        let mut saved = Vec::new();

        for (index, file) in files.into_iter().enumerate() {
            match self.store_one(case, &file, uploaded_by, uploaded_at).await {
                Ok(record) => {
                    tracing::info!(
                        case = %case.number,
                        original = %file.name,
                        stored = %record.file_name,
                        size = file.size(),
                        "stored case file"
                    );
                    saved.push(record);
                }
                Err((stage, e)) => {
                    tracing::warn!(
                        case = %case.number,
                        index,
                        name = %file.name,
                        stage = stage.as_str(),
                        error = %e,
                        "failed to store file, continuing batch"
                    );
                }
            }
        }

        tracing::info!(
            case = %case.number,
            saved = saved.len(),
            submitted,
            "batch upload finished"
        );
        BatchOutcome { saved, submitted }
    }

    async fn store_one(
        &self,
        case: &CaseRow,
        file: &UploadedFile,
        uploaded_by: Option<&str>,
        uploaded_at: OffsetDateTime,
    ) -> Result<CaseFileRow, (Stage, ServiceError)> {
        self.policy
            .validate(file)
            .map_err(|e| (Stage::Validate, e.into()))?;

        let stored_name = self
            .allocator
            .allocate(&file.name)
            .await
            .map_err(|e| (Stage::AllocateName, e))?;

        self.storage
            .put(&stored_name, file.data.clone())
            .await
            .map_err(|e| (Stage::WriteDisk, e.into()))?;

        let record = self
            .metadata
            .insert_case_file(&NewCaseFile {
                case_id: case.case_id,
                file_name: stored_name,
                original_file_name: file.name.clone(),
                file_size: file.size() as i64,
                file_type: file_extension(&file.name).unwrap_or_default(),
                uploaded_at,
                uploaded_by: uploaded_by.map(str::to_string),
            })
            .await
            .map_err(|e| (Stage::PersistRecord, e.into()))?;

        Ok(record)
    }

    async fn require_case(&self, case_number: &CaseNumber) -> ServiceResult<CaseRow> {
        self.metadata
            .get_case_by_number(case_number.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("case {case_number}")))
    }

    async fn require_owned_file(
        &self,
        case: &CaseRow,
        file_id: i64,
    ) -> ServiceResult<CaseFileRow> {
        self.metadata
            .get_case_file(file_id)
            .await?
            .filter(|f| f.case_id == case.case_id)
            .ok_or_else(|| {
                ServiceError::NotFound(format!("file {file_id} in case {}", case.number))
            })
    }

    /// Best-effort update-date bump after a successful file mutation; a
    /// failure here never fails the mutation itself.
    async fn bump_update_date(&self, case: &CaseRow) {
        let today = OffsetDateTime::now_utc().date();
        if let Err(e) = self.metadata.touch_case(case.case_id, today).await {
            tracing::warn!(case = %case.number, error = %e, "failed to bump case update date");
        }
    }
}
