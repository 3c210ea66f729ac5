//! Visit cache shared by all crawl tasks
//!
//! Each map sits behind its own mutex and every lock is held for a single
//! read or write. No operation spans more than one map.

use crate::state::VisitState;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Dedup set plus result map for one crawl invocation
///
/// Invariant: every key of `found` and every member of `failed` is also in
/// `visited`.
#[derive(Debug, Default)]
pub struct VisitCache {
    visited: Mutex<HashSet<String>>,
    found: Mutex<HashMap<String, String>>,
    failed: Mutex<HashSet<String>>,
}

// Every critical section is a single insert or read, so a poisoned lock
// still guards consistent data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl VisitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a fetch of `id` has been claimed
    ///
    /// This is a point-in-time answer. Pairing it with a later
    /// [`claim_visit`](Self::claim_visit) is not atomic: two tasks can both
    /// see `false` before either claims. Use [`try_claim`](Self::try_claim)
    /// when exactly-once claiming is required.
    pub fn has_visited(&self, id: &str) -> bool {
        lock(&self.visited).contains(id)
    }

    /// Marks `id` as claimed. Claiming twice is a no-op.
    pub fn claim_visit(&self, id: &str) {
        lock(&self.visited).insert(id.to_string());
    }

    /// Claims `id` if nobody has, returning whether this call won the claim
    pub fn try_claim(&self, id: &str) -> bool {
        lock(&self.visited).insert(id.to_string())
    }

    /// Stores the fetched content for `id`, replacing any earlier content
    pub fn record_found(&self, id: &str, content: &str) {
        lock(&self.found).insert(id.to_string(), content.to_string());
    }

    /// Notes that the fetch of `id` failed
    ///
    /// Ignored when another fetch of the same identifier already succeeded,
    /// which can happen when two tasks race under check-then-claim.
    pub fn record_failure(&self, id: &str) {
        if lock(&self.found).contains_key(id) {
            return;
        }
        lock(&self.failed).insert(id.to_string());
    }

    /// All fetched `(id, content)` pairs in ascending identifier order
    pub fn sorted_results(&self) -> Vec<(String, String)> {
        let mut results: Vec<(String, String)> = lock(&self.found)
            .iter()
            .map(|(id, content)| (id.clone(), content.clone()))
            .collect();
        results.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        results
    }

    /// All identifiers whose fetch failed, in ascending order
    ///
    /// An identifier that also has recorded content is left out: a success
    /// always wins over a failure of a duplicate fetch.
    pub fn sorted_failures(&self) -> Vec<String> {
        let mut failed: Vec<String> = lock(&self.failed).iter().cloned().collect();
        {
            let found = lock(&self.found);
            failed.retain(|id| !found.contains_key(id));
        }
        failed.sort_unstable();
        failed
    }

    /// Where `id` currently stands
    ///
    /// While a fetch is in flight this reports `Claimed`.
    pub fn state_of(&self, id: &str) -> VisitState {
        if lock(&self.found).contains_key(id) {
            VisitState::Fetched
        } else if lock(&self.failed).contains(id) {
            VisitState::Failed
        } else if self.has_visited(id) {
            VisitState::Claimed
        } else {
            VisitState::Unseen
        }
    }

    /// Number of identifiers claimed so far
    pub fn visited_count(&self) -> usize {
        lock(&self.visited).len()
    }

    #[cfg(test)]
    fn found_count(&self) -> usize {
        lock(&self.found).len()
    }
}
