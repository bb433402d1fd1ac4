//! Tracker error types.

use thiserror::Error;

/// Snapshot persistence errors.
///
/// These are logged and swallowed everywhere except explicit foreground
/// flushes; the in-memory order stays authoritative regardless.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for tracker operations.
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;
