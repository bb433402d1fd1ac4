//! Physical file store abstraction.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// A store of whole case files addressed by their stored name.
///
/// Keys are the stored (allocated) file names, flat within one storage root.
/// Implementations must reject keys that would escape the root.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Check whether a file exists under this key.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Read the full file contents.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Write the full file contents. The write is atomic: readers never
    /// observe a partially written file.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Delete a file. Returns `NotFound` if no file exists under the key.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Delete a file if it exists. Returns `true` when a file was removed,
    /// `false` when there was nothing to remove.
    async fn delete_if_exists(&self, key: &str) -> StorageResult<bool> {
        match self.delete(key).await {
            Ok(()) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Verify the backend is reachable and usable.
    async fn health_check(&self) -> StorageResult<()>;

    /// Name of the backend, for logs.
    fn backend_name(&self) -> &'static str;
}
