//! Configuration types shared across crates.

use crate::validate::ValidationStrictness;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Physical file storage.
    pub storage: StorageConfig,
    /// Metadata store.
    pub metadata: MetadataConfig,
    /// Access-recency tracker.
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Upload validation.
    #[serde(default)]
    pub files: FilesConfig,
}

/// Storage backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local filesystem storage.
    Filesystem {
        /// Root directory under which all case files are written.
        path: PathBuf,
    },
}

impl StorageConfig {
    /// Root directory of the configured backend.
    pub fn root(&self) -> &PathBuf {
        match self {
            StorageConfig::Filesystem { path } => path,
        }
    }
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// SQLite-backed metadata store.
    Sqlite {
        /// Path to the database file. Created if missing.
        path: PathBuf,
    },
}

/// Access-recency tracker configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Snapshot file path. When unset, the path is resolved once at startup
    /// from the running executable's directory, falling back to the current
    /// working directory.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
    /// Interval between periodic snapshot saves, in seconds.
    #[serde(default = "default_save_interval_secs")]
    pub save_interval_secs: u64,
    /// Upper bound on the final flush at shutdown, in seconds.
    #[serde(default = "default_shutdown_flush_timeout_secs")]
    pub shutdown_flush_timeout_secs: u64,
}

impl TrackerConfig {
    /// Periodic save interval as a `Duration`.
    pub fn save_interval(&self) -> Duration {
        Duration::from_secs(self.save_interval_secs.max(1))
    }

    /// Shutdown flush timeout as a `Duration`.
    pub fn shutdown_flush_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_flush_timeout_secs.max(1))
    }
}

fn default_save_interval_secs() -> u64 {
    30
}

fn default_shutdown_flush_timeout_secs() -> u64 {
    5
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            save_interval_secs: default_save_interval_secs(),
            shutdown_flush_timeout_secs: default_shutdown_flush_timeout_secs(),
        }
    }
}

/// Upload validation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Maximum accepted file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Allowed file extensions (lowercase, without the dot).
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    /// Content-type strictness level.
    #[serde(default)]
    pub strictness: ValidationStrictness,
}

fn default_max_file_size() -> u64 {
    crate::DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_extensions() -> Vec<String> {
    crate::DEFAULT_ALLOWED_EXTENSIONS
        .iter()
        .map(|e| e.to_string())
        .collect()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_extensions: default_allowed_extensions(),
            strictness: ValidationStrictness::default(),
        }
    }
}

impl FilesConfig {
    /// Build the validation policy described by this configuration.
    pub fn policy(&self) -> crate::ValidationPolicy {
        crate::ValidationPolicy::new(
            self.max_file_size,
            self.allowed_extensions.iter().cloned(),
            self.strictness,
        )
    }
}
