//! In-memory recency-ordered set of case numbers.

use std::collections::VecDeque;
use std::sync::Mutex;

/// Process-wide, thread-safe record of which case numbers were recently
/// looked up, most-recent-first.
///
/// Every mutating operation runs as a single critical section under one
/// mutex, so a concurrent `record_access` for the same number can never
/// produce a duplicate entry or an inconsistent order.
///
/// The structure is an access log, not a bounded cache: nothing evicts
/// entries except explicit `remove`/`clear`, so it grows with the number of
/// distinct cases ever accessed. That is a deliberate policy choice.
#[derive(Debug, Default)]
pub struct RecencyStore {
    // Invariant: contains at most one entry per case number.
    order: Mutex<VecDeque<String>>,
}

impl RecencyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an access: move the number to the front, inserting it if absent.
    ///
    /// Empty or whitespace-only numbers are ignored. Returns `true` when the
    /// store was mutated.
    pub fn record_access(&self, number: &str) -> bool {
        if number.trim().is_empty() {
            return false;
        }
        let mut order = self.order.lock().expect("recency lock poisoned");
        order.retain(|n| n != number);
        order.push_front(number.to_string());
        true
    }

    /// Current order, most-recent-first, as an owned snapshot copy.
    pub fn list(&self) -> Vec<String> {
        let order = self.order.lock().expect("recency lock poisoned");
        order.iter().cloned().collect()
    }

    /// Remove a number. Returns `true` when it was present.
    pub fn remove(&self, number: &str) -> bool {
        let mut order = self.order.lock().expect("recency lock poisoned");
        let before = order.len();
        order.retain(|n| n != number);
        order.len() != before
    }

    /// Check whether a number is present.
    pub fn contains(&self, number: &str) -> bool {
        let order = self.order.lock().expect("recency lock poisoned");
        order.iter().any(|n| n == number)
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.order.lock().expect("recency lock poisoned").clear();
    }

    /// Number of tracked case numbers.
    pub fn len(&self) -> usize {
        self.order.lock().expect("recency lock poisoned").len()
    }

    /// True when nothing has been tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Most recently accessed number, if any.
    pub fn front(&self) -> Option<String> {
        let order = self.order.lock().expect("recency lock poisoned");
        order.front().cloned()
    }

    /// Replace the whole order with a loaded snapshot, dropping duplicates
    /// while keeping each number's first (most recent) position.
    pub fn replace(&self, numbers: Vec<String>) {
        let mut deduped = VecDeque::with_capacity(numbers.len());
        for number in numbers {
            if !number.trim().is_empty() && !deduped.contains(&number) {
                deduped.push_back(number);
            }
        }
        let mut order = self.order.lock().expect("recency lock poisoned");
        *order = deduped;
    }
}
