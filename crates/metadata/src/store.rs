//! Metadata store trait and the SQLite implementation.

use crate::error::{MetadataError, MetadataResult};
use crate::models::{CaseFileRow, CaseRow, NewCase, NewCaseFile};
use crate::repos::{CaseFileRepo, CaseRepo};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, QueryBuilder, Sqlite};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use time::Date;

/// Combined metadata store trait.
#[async_trait]
pub trait MetadataStore: CaseRepo + CaseFileRepo + Send + Sync {
    /// Run database migrations.
    async fn migrate(&self) -> MetadataResult<()>;

    /// Check database connectivity and health.
    async fn health_check(&self) -> MetadataResult<()>;
}

/// SQLite-based metadata store.
pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    /// Open (or create) the store at `path` and run migrations.
    pub async fn new(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}?mode=rwc", path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .foreign_keys(true)
            // Prevent transient "database is locked" errors under concurrent access.
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            // SQLite permits limited write concurrency; a single connection avoids
            // persistent "database is locked" failures under concurrent batches.
            .max_connections(1)
            .connect_with(opts)
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::Database(db) if db.kind() == sqlx::error::ErrorKind::UniqueViolation
    )
}

#[async_trait]
impl MetadataStore for SqliteStore {
    async fn migrate(&self) -> MetadataResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS cases (
                case_id INTEGER PRIMARY KEY AUTOINCREMENT,
                number TEXT NOT NULL,
                author TEXT,
                investigator TEXT,
                policeman TEXT,
                object TEXT,
                upload_date TEXT NOT NULL,
                update_date TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_cases_number ON cases(number)")
            .execute(&self.pool)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS case_files (
                file_id INTEGER PRIMARY KEY AUTOINCREMENT,
                case_id INTEGER NOT NULL REFERENCES cases(case_id) ON DELETE CASCADE,
                file_name TEXT NOT NULL,
                original_file_name TEXT NOT NULL,
                file_size INTEGER NOT NULL,
                file_type TEXT NOT NULL,
                uploaded_at TEXT NOT NULL,
                uploaded_by TEXT
            )",
        )
        .execute(&self.pool)
        .await?;

        // Stored names are globally unique within the storage root, so the
        // index is global, not per-case.
        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_case_files_name ON case_files(file_name)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_case_files_case_uploaded
             ON case_files(case_id, uploaded_at DESC)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn health_check(&self) -> MetadataResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl CaseRepo for SqliteStore {
    async fn create_case(&self, new: &NewCase) -> MetadataResult<CaseRow> {
        let row = sqlx::query_as::<_, CaseRow>(
            "INSERT INTO cases (number, author, investigator, policeman, object, upload_date)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING case_id, number, author, investigator, policeman, object,
                       upload_date, update_date",
        )
        .bind(&new.number)
        .bind(&new.author)
        .bind(&new.investigator)
        .bind(&new.policeman)
        .bind(&new.object)
        .bind(new.upload_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                MetadataError::AlreadyExists(format!("case number {}", new.number))
            } else {
                MetadataError::Database(e)
            }
        })?;
        Ok(row)
    }

    async fn get_case_by_number(&self, number: &str) -> MetadataResult<Option<CaseRow>> {
        let row = sqlx::query_as::<_, CaseRow>(
            "SELECT case_id, number, author, investigator, policeman, object,
                    upload_date, update_date
             FROM cases WHERE number = ?",
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_cases_by_numbers(&self, numbers: &[String]) -> MetadataResult<Vec<CaseRow>> {
        if numbers.is_empty() {
            return Ok(Vec::new());
        }

        // SQLite has no array binds; build the IN list dynamically.
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT case_id, number, author, investigator, policeman, object,
                    upload_date, update_date
             FROM cases WHERE number IN (",
        );
        let mut separated = builder.separated(", ");
        for number in numbers {
            separated.push_bind(number);
        }
        builder.push(")");

        let rows = builder
            .build_query_as::<CaseRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn touch_case(&self, case_id: i64, update_date: Date) -> MetadataResult<()> {
        let result = sqlx::query("UPDATE cases SET update_date = ? WHERE case_id = ?")
            .bind(update_date)
            .bind(case_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(MetadataError::NotFound(format!("case id {case_id}")));
        }
        Ok(())
    }
}

#[async_trait]
impl CaseFileRepo for SqliteStore {
    async fn insert_case_file(&self, new: &NewCaseFile) -> MetadataResult<CaseFileRow> {
        let row = sqlx::query_as::<_, CaseFileRow>(
            "INSERT INTO case_files
                 (case_id, file_name, original_file_name, file_size, file_type,
                  uploaded_at, uploaded_by)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING file_id, case_id, file_name, original_file_name, file_size,
                       file_type, uploaded_at, uploaded_by",
        )
        .bind(new.case_id)
        .bind(&new.file_name)
        .bind(&new.original_file_name)
        .bind(new.file_size)
        .bind(&new.file_type)
        .bind(new.uploaded_at)
        .bind(&new.uploaded_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                MetadataError::AlreadyExists(format!("stored file name {}", new.file_name))
            } else {
                MetadataError::Database(e)
            }
        })?;
        Ok(row)
    }

    async fn get_case_file(&self, file_id: i64) -> MetadataResult<Option<CaseFileRow>> {
        let row = sqlx::query_as::<_, CaseFileRow>(
            "SELECT file_id, case_id, file_name, original_file_name, file_size,
                    file_type, uploaded_at, uploaded_by
             FROM case_files WHERE file_id = ?",
        )
        .bind(file_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn file_name_exists(&self, file_name: &str) -> MetadataResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM case_files WHERE file_name = ?)",
        )
        .bind(file_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn delete_case_file(&self, file_id: i64) -> MetadataResult<()> {
        let result = sqlx::query("DELETE FROM case_files WHERE file_id = ?")
            .bind(file_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(MetadataError::NotFound(format!("file id {file_id}")));
        }
        Ok(())
    }

    async fn list_case_files(
        &self,
        case_id: i64,
        page: u32,
        size: u32,
    ) -> MetadataResult<Vec<CaseFileRow>> {
        let offset = i64::from(page) * i64::from(size);
        let rows = sqlx::query_as::<_, CaseFileRow>(
            "SELECT file_id, case_id, file_name, original_file_name, file_size,
                    file_type, uploaded_at, uploaded_by
             FROM case_files WHERE case_id = ?
             ORDER BY uploaded_at DESC, file_id DESC
             LIMIT ? OFFSET ?",
        )
        .bind(case_id)
        .bind(i64::from(size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn count_case_files(&self, case_id: i64) -> MetadataResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM case_files WHERE case_id = ?")
                .bind(case_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }
}
