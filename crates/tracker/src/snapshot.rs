//! Durable snapshot of the recency order.
//!
//! The snapshot is a JSON array of case-number strings, most-recent-first.
//! It is written with a temp-file-plus-rename so readers never observe a
//! partial file, and read leniently so a missing or corrupt snapshot never
//! prevents startup.

use crate::error::TrackerResult;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Serializes the recency order to a snapshot file and loads it back.
pub struct RecencySnapshotter {
    path: PathBuf,
}

impl RecencySnapshotter {
    /// Create a snapshotter writing to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the snapshot path once, at initialization.
    ///
    /// An explicitly configured path wins. Otherwise the snapshot lives next
    /// to the running executable; if that location cannot be determined, it
    /// falls back to the current working directory.
    pub fn resolve_path(configured: Option<&Path>) -> PathBuf {
        if let Some(path) = configured {
            return path.to_path_buf();
        }

        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                tracing::warn!(path = %cwd.display(), "using working directory for recency snapshot");
                cwd
            });
        dir.join(dossier_core::SNAPSHOT_FILE_NAME)
    }

    /// Snapshot file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot.
    ///
    /// A missing or empty file is "no prior state" and yields an empty list.
    /// A parse or read failure is returned to the caller, which is expected
    /// to log it and likewise proceed empty.
    pub async fn load(&self) -> TrackerResult<Vec<String>> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if data.is_empty() {
            return Ok(Vec::new());
        }
        let numbers: Vec<String> = serde_json::from_slice(&data)?;
        Ok(numbers)
    }

    /// Write the given order to the snapshot file, atomically.
    pub async fn save(&self, numbers: &[String]) -> TrackerResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec(numbers)?;
        let temp_path = self.path.with_extension(format!("tmp.{}", Uuid::new_v4()));
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(&data).await?;
            file.sync_all().await?;
        }
        if let Err(e) = fs::rename(&temp_path, &self.path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            count = numbers.len(),
            path = %self.path.display(),
            "saved recency snapshot"
        );
        Ok(())
    }
}
