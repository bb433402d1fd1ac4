//! Minimal store doubles for exercising paths the real backends cannot
//! reach, like a name space where every candidate is taken.

use async_trait::async_trait;
use bytes::Bytes;
use dossier_metadata::models::{CaseFileRow, CaseRow, NewCase, NewCaseFile};
use dossier_metadata::{CaseFileRepo, CaseRepo, MetadataResult, MetadataStore};
use dossier_storage::{FileStore, StorageResult};
use time::Date;

/// Metadata store where every stored name is already taken.
pub struct SaturatedMetadata;

#[async_trait]
impl CaseRepo for SaturatedMetadata {
    async fn create_case(&self, _new: &NewCase) -> MetadataResult<CaseRow> {
        unimplemented!("not used by name allocation")
    }

    async fn get_case_by_number(&self, _number: &str) -> MetadataResult<Option<CaseRow>> {
        unimplemented!("not used by name allocation")
    }

    async fn find_cases_by_numbers(&self, _numbers: &[String]) -> MetadataResult<Vec<CaseRow>> {
        unimplemented!("not used by name allocation")
    }

    async fn touch_case(&self, _case_id: i64, _update_date: Date) -> MetadataResult<()> {
        unimplemented!("not used by name allocation")
    }
}

#[async_trait]
impl CaseFileRepo for SaturatedMetadata {
    async fn insert_case_file(&self, _new: &NewCaseFile) -> MetadataResult<CaseFileRow> {
        unimplemented!("not used by name allocation")
    }

    async fn get_case_file(&self, _file_id: i64) -> MetadataResult<Option<CaseFileRow>> {
        unimplemented!("not used by name allocation")
    }

    async fn file_name_exists(&self, _file_name: &str) -> MetadataResult<bool> {
        Ok(true)
    }

    async fn delete_case_file(&self, _file_id: i64) -> MetadataResult<()> {
        unimplemented!("not used by name allocation")
    }

    async fn list_case_files(
        &self,
        _case_id: i64,
        _page: u32,
        _size: u32,
    ) -> MetadataResult<Vec<CaseFileRow>> {
        unimplemented!("not used by name allocation")
    }

    async fn count_case_files(&self, _case_id: i64) -> MetadataResult<i64> {
        unimplemented!("not used by name allocation")
    }
}

#[async_trait]
impl MetadataStore for SaturatedMetadata {
    async fn migrate(&self) -> MetadataResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        Ok(())
    }
}

/// File store where every key already has a file.
pub struct SaturatedStorage;

#[async_trait]
impl FileStore for SaturatedStorage {
    async fn exists(&self, _key: &str) -> StorageResult<bool> {
        Ok(true)
    }

    async fn get(&self, _key: &str) -> StorageResult<Bytes> {
        unimplemented!("not used by name allocation")
    }

    async fn put(&self, _key: &str, _data: Bytes) -> StorageResult<()> {
        unimplemented!("not used by name allocation")
    }

    async fn delete(&self, _key: &str) -> StorageResult<()> {
        unimplemented!("not used by name allocation")
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "saturated"
    }
}
