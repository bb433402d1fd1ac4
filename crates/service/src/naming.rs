//! Collision-free stored-name allocation.

use crate::error::ServiceResult;
use dossier_core::split_file_name;
use dossier_metadata::{CaseFileRepo, MetadataStore};
use dossier_storage::FileStore;
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::format_description;

/// Attempts before giving up on checked candidates.
const MAX_ATTEMPTS: u32 = 1000;

/// Allocates stored file names that are free in both stores.
///
/// Disk and the metadata table are written separately and can diverge
/// (record without file, file without record); checking both authorities at
/// allocation time closes that gap for new names.
#[derive(Clone)]
pub struct FileNameAllocator {
    metadata: Arc<dyn MetadataStore>,
    storage: Arc<dyn FileStore>,
}

impl FileNameAllocator {
    /// Create an allocator probing the given stores.
    pub fn new(metadata: Arc<dyn MetadataStore>, storage: Arc<dyn FileStore>) -> Self {
        Self { metadata, storage }
    }

    /// Allocate a stored name for the desired (user-supplied) file name.
    ///
    /// Returns the desired name unchanged when it is free in both stores.
    /// Otherwise appends `_<timestamp>_<counter>` before the extension and
    /// re-checks both stores per attempt. After [`MAX_ATTEMPTS`] the
    /// allocator falls back to `<stem>_<unix-millis><ext>` without a further
    /// check; the residual collision risk there is accepted as practically
    /// impossible.
    pub async fn allocate(&self, desired: &str) -> ServiceResult<String> {
        let desired = desired.trim();
        if desired.is_empty() {
            return Ok(format!("unnamed_file_{}", unix_millis()));
        }

        if self.is_free(desired).await? {
            return Ok(desired.to_string());
        }

        let (stem, extension) = split_file_name(desired);
        let suffix = extension.map(|e| format!(".{e}")).unwrap_or_default();

        for counter in 1..=MAX_ATTEMPTS {
            let candidate = format!("{stem}_{}_{counter}{suffix}", second_timestamp());
            if self.is_free(&candidate).await? {
                tracing::info!(desired, stored = %candidate, "allocated unique stored name");
                return Ok(candidate);
            }
        }

        let fallback = format!("{stem}_{}{suffix}", unix_millis());
        tracing::warn!(
            desired,
            stored = %fallback,
            "name allocation hit attempt cap, using unchecked fallback"
        );
        Ok(fallback)
    }

    /// A name is free only when neither store knows it.
    async fn is_free(&self, name: &str) -> ServiceResult<bool> {
        if self.metadata.file_name_exists(name).await? {
            return Ok(false);
        }
        Ok(!self.storage.exists(name).await?)
    }
}

fn second_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    let format = format_description!("[year][month][day]_[hour][minute][second]");
    now.format(&format)
        .unwrap_or_else(|_| now.unix_timestamp().to_string())
}

fn unix_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}
