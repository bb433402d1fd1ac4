//! The access tracker: recency store plus durable snapshotting.

use crate::snapshot::RecencySnapshotter;
use crate::store::RecencyStore;
use dossier_core::config::TrackerConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;

/// Access-recency tracker with background persistence.
///
/// Mutations update the in-memory [`RecencyStore`] synchronously and signal a
/// background task that writes the snapshot, so request threads never block
/// on disk latency. The task also saves on a fixed interval. `clear` and
/// `shutdown` flush in the foreground: a clean shutdown always persists the
/// final order, bounded by a short timeout.
///
/// Snapshot I/O failures are logged and swallowed; the in-memory order stays
/// authoritative for the process lifetime.
pub struct AccessTracker {
    store: Arc<RecencyStore>,
    snapshotter: Arc<RecencySnapshotter>,
    flush: Arc<Notify>,
    shutdown_tx: watch::Sender<bool>,
    task: tokio::sync::Mutex<Option<JoinHandle<()>>>,
    flush_timeout: Duration,
}

impl AccessTracker {
    /// Load any prior snapshot and start the background flush task.
    pub async fn start(config: &TrackerConfig) -> Self {
        let path = RecencySnapshotter::resolve_path(config.snapshot_path.as_deref());
        let snapshotter = Arc::new(RecencySnapshotter::new(path));
        let store = Arc::new(RecencyStore::new());

        match snapshotter.load().await {
            Ok(numbers) => {
                if !numbers.is_empty() {
                    tracing::info!(
                        count = numbers.len(),
                        path = %snapshotter.path().display(),
                        "loaded recency snapshot"
                    );
                }
                store.replace(numbers);
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %snapshotter.path().display(),
                    "failed to load recency snapshot, starting empty"
                );
            }
        }

        let flush = Arc::new(Notify::new());
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let task = {
            let store = store.clone();
            let snapshotter = snapshotter.clone();
            let flush = flush.clone();
            let interval = config.save_interval();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                // The first tick fires immediately; the load above already
                // reflects disk state, so skip it.
                ticker.tick().await;
                loop {
                    tokio::select! {
                        _ = ticker.tick() => save_once(&snapshotter, &store).await,
                        _ = flush.notified() => save_once(&snapshotter, &store).await,
                        _ = shutdown_rx.changed() => break,
                    }
                }
            })
        };

        tracing::info!(
            path = %snapshotter.path().display(),
            interval_secs = config.save_interval_secs,
            "access tracker started"
        );

        Self {
            store,
            snapshotter,
            flush,
            shutdown_tx,
            task: tokio::sync::Mutex::new(Some(task)),
            flush_timeout: config.shutdown_flush_timeout(),
        }
    }

    /// Record an access, moving the number to the front and scheduling a
    /// best-effort snapshot save. Non-blocking.
    pub fn record_access(&self, number: &str) {
        if self.store.record_access(number) {
            tracing::debug!(case = number, count = self.store.len(), "recorded case access");
            self.flush.notify_one();
        }
    }

    /// Current order, most-recent-first.
    pub fn list(&self) -> Vec<String> {
        self.store.list()
    }

    /// Remove a number, scheduling a save when something was removed.
    pub fn remove(&self, number: &str) -> bool {
        let removed = self.store.remove(number);
        if removed {
            self.flush.notify_one();
        }
        removed
    }

    /// Check whether a number is tracked.
    pub fn contains(&self, number: &str) -> bool {
        self.store.contains(number)
    }

    /// Number of tracked case numbers.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// True when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Most recently accessed number, if any.
    pub fn front(&self) -> Option<String> {
        self.store.front()
    }

    /// Clear all entries and flush the (now empty) snapshot in the foreground.
    pub async fn clear(&self) {
        self.store.clear();
        self.flush_now().await;
    }

    /// Write the snapshot now, logging (not raising) any failure.
    pub async fn flush_now(&self) {
        save_once(&self.snapshotter, &self.store).await;
    }

    /// Snapshot file path in use.
    pub fn snapshot_path(&self) -> &std::path::Path {
        self.snapshotter.path()
    }

    /// Stop the background task and perform a final foreground flush.
    ///
    /// Both steps are bounded by the configured shutdown timeout; a flush
    /// that cannot complete in time is logged and abandoned.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);

        if let Some(task) = self.task.lock().await.take() {
            if tokio::time::timeout(self.flush_timeout, task).await.is_err() {
                tracing::warn!("recency flush task did not stop in time, aborting");
            }
        }

        if tokio::time::timeout(self.flush_timeout, self.flush_now())
            .await
            .is_err()
        {
            tracing::warn!(
                path = %self.snapshotter.path().display(),
                "final recency snapshot flush timed out"
            );
        } else {
            tracing::info!("access tracker shut down");
        }
    }
}

async fn save_once(snapshotter: &RecencySnapshotter, store: &RecencyStore) {
    if let Err(e) = snapshotter.save(&store.list()).await {
        tracing::warn!(
            error = %e,
            path = %snapshotter.path().display(),
            "failed to save recency snapshot, will retry on next cycle"
        );
    }
}
