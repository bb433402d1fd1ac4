//! Access-recency tracking for the dossier case backend.
//!
//! Records which case numbers were recently looked up, most-recent-first,
//! and persists that order across restarts:
//! - [`RecencyStore`] — the in-memory ordered set with move-to-front semantics
//! - [`RecencySnapshotter`] — atomic JSON snapshot save/load
//! - [`AccessTracker`] — the two wired together with a background flush task
//!
//! The tracker is scoped to a single running instance; separate processes
//! keep independent orders and snapshot files.

pub mod error;
pub mod snapshot;
pub mod store;
pub mod tracker;

pub use error::{TrackerError, TrackerResult};
pub use snapshot::RecencySnapshotter;
pub use store::RecencyStore;
pub use tracker::AccessTracker;
