//! Crawl engine - recursive, depth-bounded, deduplicating traversal
//!
//! One tokio task runs per visit. A task claims its identifier, fetches it,
//! records the content and spawns one child task per discovered link with
//! one less unit of depth. The caller waits on the completion tracker and
//! then reads the sorted results.

use crate::crawler::cache::VisitCache;
use crate::crawler::tracker::{CompletionTracker, TaskGuard};
use crate::fetch::Fetcher;
use crate::output::CrawlStatistics;
use crate::state::VisitState;
use chrono::Utc;
use serde::Deserialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// How a task decides that it owns the fetch of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupPolicy {
    /// Check and claim in one step; every identifier is fetched at most once
    #[default]
    Atomic,

    /// Check, then claim in a separate step. Two parents discovering the
    /// same identifier at the same moment may both fetch it.
    CheckThenClaim,
}

impl DedupPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::CheckThenClaim => "check-then-claim",
        }
    }
}

impl fmt::Display for DedupPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DedupPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "atomic" => Ok(Self::Atomic),
            "check-then-claim" => Ok(Self::CheckThenClaim),
            other => Err(format!(
                "unknown dedup policy '{}' (expected 'atomic' or 'check-then-claim')",
                other
            )),
        }
    }
}

/// Outcome of one crawl invocation
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Fetched `(identifier, content)` pairs in ascending identifier order
    pub results: Vec<(String, String)>,

    /// Identifiers whose fetch failed, in ascending order
    pub failed: Vec<String>,

    pub stats: CrawlStatistics,

    // Every task has finished, so nothing writes to the cache any more.
    cache: Arc<VisitCache>,
}

impl CrawlReport {
    /// Final state of `id` in this crawl
    ///
    /// Identifiers never claimed (beyond the depth limit or never linked)
    /// are `Unseen`. `Claimed` only remains if a task panicked mid-fetch.
    pub fn state_of(&self, id: &str) -> VisitState {
        self.cache.state_of(id)
    }

    /// Returns the content recorded for `id`, if it was fetched
    pub fn content_of(&self, id: &str) -> Option<&str> {
        self.results
            .binary_search_by(|(found, _)| found.as_str().cmp(id))
            .ok()
            .map(|index| self.results[index].1.as_str())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.results.iter().map(|(id, _)| id.as_str())
    }
}

/// Concurrent crawler over an injected [`Fetcher`]
///
/// # Example
///
/// ```
/// use ripple_crawl::fetch::reference_graph;
/// use ripple_crawl::Crawler;
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() {
/// let crawler = Crawler::new(Arc::new(reference_graph()));
/// let report = crawler.crawl("https://golang.org/", 4).await;
/// assert_eq!(report.results.len(), 4);
/// # }
/// ```
#[derive(Clone)]
pub struct Crawler {
    fetcher: Arc<dyn Fetcher>,
    policy: DedupPolicy,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher,
            policy: DedupPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DedupPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Crawls from `seed`, following links up to `max_depth` levels
    ///
    /// Depth 1 fetches only the seed; zero or a negative depth fetches
    /// nothing. Returns once every spawned task has finished. Fetch failures
    /// never surface here: failed identifiers are simply absent from
    /// `results`.
    pub async fn crawl(&self, seed: &str, max_depth: i32) -> CrawlReport {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            "Starting crawl of {} (max depth {}, dedup {})",
            seed,
            max_depth,
            self.policy
        );

        let run = Arc::new(CrawlRun {
            fetcher: Arc::clone(&self.fetcher),
            policy: self.policy,
            cache: Arc::new(VisitCache::new()),
            tracker: CompletionTracker::new(),
            counters: Counters::default(),
        });

        let seed_guard = run.tracker.register();
        spawn_visit(Arc::clone(&run), seed.to_string(), max_depth, seed_guard);
        run.tracker.wait().await;

        let stats = run
            .counters
            .snapshot(started_at, start.elapsed(), run.cache.visited_count());
        tracing::info!(
            "Crawl completed: {} fetched, {} failed, {} tasks in {:?}",
            stats.fetched,
            stats.failed,
            stats.tasks_spawned,
            stats.elapsed
        );

        CrawlReport {
            results: run.cache.sorted_results(),
            failed: run.cache.sorted_failures(),
            stats,
            cache: Arc::clone(&run.cache),
        }
    }
}

impl fmt::Debug for Crawler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crawler")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// State shared by every task of one crawl invocation
struct CrawlRun {
    fetcher: Arc<dyn Fetcher>,
    policy: DedupPolicy,
    cache: Arc<VisitCache>,
    tracker: Arc<CompletionTracker>,
    counters: Counters,
}

impl CrawlRun {
    /// Returns true if this task should fetch `id`
    fn claim(&self, id: &str) -> bool {
        match self.policy {
            DedupPolicy::Atomic => self.cache.try_claim(id),
            DedupPolicy::CheckThenClaim => {
                if self.cache.has_visited(id) {
                    return false;
                }
                self.cache.claim_visit(id);
                true
            }
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    tasks: AtomicUsize,
    attempted: AtomicUsize,
    fetched: AtomicUsize,
    failed: AtomicUsize,
    skipped_depth: AtomicUsize,
    skipped_visited: AtomicUsize,
}

impl Counters {
    fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(
        &self,
        started_at: chrono::DateTime<Utc>,
        elapsed: std::time::Duration,
        identifiers_claimed: usize,
    ) -> CrawlStatistics {
        CrawlStatistics {
            started_at,
            elapsed,
            identifiers_claimed,
            tasks_spawned: self.tasks.load(Ordering::Relaxed),
            fetches_attempted: self.attempted.load(Ordering::Relaxed),
            fetched: self.fetched.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            skipped_depth: self.skipped_depth.load(Ordering::Relaxed),
            skipped_visited: self.skipped_visited.load(Ordering::Relaxed),
        }
    }
}

type VisitFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Spawns a visit task. `guard` must already be registered with the tracker.
fn spawn_visit(run: Arc<CrawlRun>, id: String, depth: i32, guard: TaskGuard) {
    tokio::spawn(visit(run, id, depth, guard));
}

// Boxed so the recursive spawn has a nameable future type.
fn visit(run: Arc<CrawlRun>, id: String, depth: i32, guard: TaskGuard) -> VisitFuture {
    Box::pin(async move {
        let _guard = guard;
        Counters::bump(&run.counters.tasks);

        if depth <= 0 {
            tracing::trace!("Depth exhausted at {}", id);
            Counters::bump(&run.counters.skipped_depth);
            return;
        }

        if !run.claim(&id) {
            tracing::trace!("Already visited {}", id);
            Counters::bump(&run.counters.skipped_visited);
            return;
        }

        Counters::bump(&run.counters.attempted);
        let page = match run.fetcher.fetch(&id).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!("Fetch failed: {}", e);
                run.cache.record_failure(&id);
                Counters::bump(&run.counters.failed);
                return;
            }
        };

        run.cache.record_found(&id, &page.body);
        Counters::bump(&run.counters.fetched);
        tracing::debug!("Fetched {} ({} links, depth {})", id, page.links.len(), depth);

        for link in page.links {
            let child_guard = run.tracker.register();
            spawn_visit(Arc::clone(&run), link, depth - 1, child_guard);
        }
    })
}
