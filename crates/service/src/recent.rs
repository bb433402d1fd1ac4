//! Case lookup and recency-ordered listing.

use crate::error::{ServiceError, ServiceResult};
use crate::page::Page;
use dossier_core::CaseNumber;
use dossier_metadata::models::CaseRow;
use dossier_metadata::{CaseFileRepo, CaseRepo, MetadataStore};
use dossier_tracker::AccessTracker;
use std::collections::HashMap;
use std::sync::Arc;

/// Case queries that feed and read the access tracker.
pub struct CaseService {
    metadata: Arc<dyn MetadataStore>,
    tracker: Arc<AccessTracker>,
}

impl CaseService {
    /// Create a case service over the given store and tracker.
    pub fn new(metadata: Arc<dyn MetadataStore>, tracker: Arc<AccessTracker>) -> Self {
        Self { metadata, tracker }
    }

    /// Look up a case by number, recording the access on success.
    pub async fn get_case_by_number(&self, number: &CaseNumber) -> ServiceResult<CaseRow> {
        let case = self
            .metadata
            .get_case_by_number(number.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("case {number}")))?;
        self.tracker.record_access(number.as_str());
        Ok(case)
    }

    /// Number of files attached to a case.
    pub async fn case_file_count(&self, number: &CaseNumber) -> ServiceResult<i64> {
        let case = self
            .metadata
            .get_case_by_number(number.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("case {number}")))?;
        Ok(self.metadata.count_case_files(case.case_id).await?)
    }

    /// Recently requested cases, most-recent-first, as a stable page.
    ///
    /// The bulk fetch by number set is unordered; the access order is
    /// re-imposed afterwards. Numbers with no surviving record are silently
    /// skipped (stale or deleted cases) and do not count toward the total.
    /// No snapshot isolation is taken across the two steps: a concurrent
    /// access between them may make an item appear or vanish, which is
    /// accepted.
    pub async fn recent_by_request(&self, page: u32, size: u32) -> ServiceResult<Page<CaseRow>> {
        if size == 0 {
            return Err(ServiceError::InvalidRequest(
                "page size must be positive".to_string(),
            ));
        }

        let numbers = self.tracker.list();
        let cases = self.metadata.find_cases_by_numbers(&numbers).await?;
        tracing::debug!(
            tracked = numbers.len(),
            resolved = cases.len(),
            "resolving recent cases"
        );

        let mut by_number: HashMap<String, CaseRow> = cases
            .into_iter()
            .map(|case| (case.number.clone(), case))
            .collect();
        let ordered: Vec<CaseRow> = numbers
            .iter()
            .filter_map(|number| by_number.remove(number))
            .collect();

        Ok(Page::slice(ordered, page, size))
    }

    /// The tracker behind this service.
    pub fn tracker(&self) -> &Arc<AccessTracker> {
        &self.tracker
    }
}
