//! Case repository trait.

use crate::error::MetadataResult;
use crate::models::{CaseRow, NewCase};
use async_trait::async_trait;
use time::Date;

/// Repository for case records.
#[async_trait]
pub trait CaseRepo: Send + Sync {
    /// Create a new case. Fails with `AlreadyExists` if the number is taken.
    async fn create_case(&self, new: &NewCase) -> MetadataResult<CaseRow>;

    /// Look up a case by its number.
    async fn get_case_by_number(&self, number: &str) -> MetadataResult<Option<CaseRow>>;

    /// Bulk-fetch all cases whose number appears in `numbers`.
    ///
    /// The result order is unspecified; callers that care about order
    /// (the recency paginator does) re-impose it themselves.
    async fn find_cases_by_numbers(&self, numbers: &[String]) -> MetadataResult<Vec<CaseRow>>;

    /// Set a case's update date after a successful file mutation.
    async fn touch_case(&self, case_id: i64, update_date: Date) -> MetadataResult<()>;
}
