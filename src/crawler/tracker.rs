//! Completion tracking for a dynamically growing task tree
//!
//! Every task is represented by a [`TaskGuard`]. The guard is created in the
//! parent before the child is spawned and dropped when the child ends, on
//! every exit path including a panic. The count can only reach zero once
//! the last guard of the whole tree has been dropped.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

/// Counter of outstanding crawl tasks
#[derive(Debug, Default)]
pub struct CompletionTracker {
    outstanding: AtomicUsize,
    idle: Notify,
}

impl CompletionTracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Registers one unit of outstanding work
    ///
    /// Call this before spawning the task that will own the returned guard.
    pub fn register(self: &Arc<Self>) -> TaskGuard {
        let now = self.outstanding.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!(outstanding = now, "task registered");
        TaskGuard {
            tracker: Arc::clone(self),
        }
    }

    /// Number of tasks registered but not yet finished
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Waits until every registered task has finished
    ///
    /// Returns immediately if nothing is outstanding.
    pub async fn wait(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            // Enable before checking so a wake-up between the check and the
            // await is not lost.
            notified.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn finish(&self) {
        let previous = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "completion tracker went negative");
        tracing::trace!(outstanding = previous - 1, "task finished");

        if previous == 1 {
            self.idle.notify_waiters();
        }
    }
}

/// Outstanding-work token; dropping it marks the task finished
#[derive(Debug)]
#[must_use = "dropping the guard immediately marks the task finished"]
pub struct TaskGuard {
    tracker: Arc<CompletionTracker>,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.tracker.finish();
    }
}
