//! Crawler module for concurrent, depth-bounded traversal
//!
//! This module contains the core crawling logic:
//! - `VisitCache`: shared dedup set and result map
//! - `CompletionTracker`: outstanding-task counter the caller waits on
//! - `Crawler`: spawns one task per visit and collects sorted results

mod cache;
mod engine;
mod tracker;

pub use cache::VisitCache;
pub use engine::{CrawlReport, Crawler, DedupPolicy};
pub use tracker::{CompletionTracker, TaskGuard};

use crate::config::{Config, FetcherKind};
use crate::fetch::{reference_graph, Fetcher, HttpFetcher, StaticFetcher};
use crate::CrawlError;
use std::sync::Arc;

/// Builds the fetcher described by the configuration
///
/// A static fetcher with no configured pages serves the built-in reference
/// graph.
pub fn build_fetcher(config: &Config) -> Result<Arc<dyn Fetcher>, CrawlError> {
    let fetcher: Arc<dyn Fetcher> = match config.fetcher.kind {
        FetcherKind::Static if config.fetcher.pages.is_empty() => Arc::new(reference_graph()),
        FetcherKind::Static => Arc::new(StaticFetcher::from_entries(&config.fetcher.pages)),
        FetcherKind::Http => Arc::new(HttpFetcher::with_user_agent(&config.fetcher.user_agent)?),
    };
    Ok(fetcher)
}

/// Runs a complete crawl operation described by `config`
///
/// # Example
///
/// ```
/// use ripple_crawl::config::Config;
/// use ripple_crawl::crawler::crawl;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), ripple_crawl::CrawlError> {
/// let report = crawl(&Config::default()).await?;
/// assert_eq!(report.results[0].0, "https://golang.org/");
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlReport, CrawlError> {
    let fetcher = build_fetcher(config)?;
    let crawler = Crawler::new(fetcher).with_policy(config.crawler.dedup);
    Ok(crawler
        .crawl(&config.crawler.seed, config.crawler.max_depth)
        .await)
}
