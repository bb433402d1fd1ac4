//! Database models mapping to the metadata schema.

use sqlx::FromRow;
use time::{Date, OffsetDateTime};

/// A case record: the aggregate root that owns file records.
#[derive(Debug, Clone, FromRow)]
pub struct CaseRow {
    pub case_id: i64,
    /// Stable identifier, unique across all cases.
    pub number: String,
    pub author: Option<String>,
    pub investigator: Option<String>,
    pub policeman: Option<String>,
    pub object: Option<String>,
    pub upload_date: Date,
    pub update_date: Option<Date>,
}

/// Fields for creating a new case.
#[derive(Debug, Clone)]
pub struct NewCase {
    pub number: String,
    pub author: Option<String>,
    pub investigator: Option<String>,
    pub policeman: Option<String>,
    pub object: Option<String>,
    pub upload_date: Date,
}

/// A stored file belonging to one case.
///
/// `file_name` is the allocated stored name: unique within the storage root
/// and the disk key of the physical file. `original_file_name` is the
/// user-supplied name and carries no uniqueness guarantee.
#[derive(Debug, Clone, FromRow)]
pub struct CaseFileRow {
    pub file_id: i64,
    pub case_id: i64,
    pub file_name: String,
    pub original_file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub uploaded_at: OffsetDateTime,
    pub uploaded_by: Option<String>,
}

/// Fields for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewCaseFile {
    pub case_id: i64,
    pub file_name: String,
    pub original_file_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub uploaded_at: OffsetDateTime,
    pub uploaded_by: Option<String>,
}
