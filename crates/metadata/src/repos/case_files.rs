//! File record repository trait.

use crate::error::MetadataResult;
use crate::models::{CaseFileRow, NewCaseFile};
use async_trait::async_trait;

/// Repository for file records.
#[async_trait]
pub trait CaseFileRepo: Send + Sync {
    /// Insert a file record. The stored name must be unique; a collision is
    /// `AlreadyExists` (the allocator should have prevented it).
    async fn insert_case_file(&self, new: &NewCaseFile) -> MetadataResult<CaseFileRow>;

    /// Look up a file record by id.
    async fn get_case_file(&self, file_id: i64) -> MetadataResult<Option<CaseFileRow>>;

    /// Check whether any file record uses this stored name.
    ///
    /// One of the allocator's two uniqueness authorities (the other is the
    /// physical store).
    async fn file_name_exists(&self, file_name: &str) -> MetadataResult<bool>;

    /// Delete a file record. Fails with `NotFound` if no such record exists.
    async fn delete_case_file(&self, file_id: i64) -> MetadataResult<()>;

    /// List a case's file records, newest upload first.
    async fn list_case_files(
        &self,
        case_id: i64,
        page: u32,
        size: u32,
    ) -> MetadataResult<Vec<CaseFileRow>>;

    /// Count a case's file records.
    async fn count_case_files(&self, case_id: i64) -> MetadataResult<i64>;
}
