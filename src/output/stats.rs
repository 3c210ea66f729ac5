//! Statistics gathered during a crawl

use chrono::{DateTime, Utc};
use std::io::{self, Write};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlStatistics {
    /// When the crawl was started
    pub started_at: DateTime<Utc>,

    /// Wall-clock time until the last task finished
    pub elapsed: Duration,

    /// Distinct identifiers claimed for fetching
    pub identifiers_claimed: usize,

    /// Tasks run, including the seed task
    pub tasks_spawned: usize,

    /// Fetches issued (claimed identifiers)
    pub fetches_attempted: usize,

    /// Fetches that succeeded
    pub fetched: usize,

    /// Fetches that failed
    pub failed: usize,

    /// Tasks that ended because no depth was left
    pub skipped_depth: usize,

    /// Tasks that ended because the identifier was already claimed
    pub skipped_visited: usize,
}

impl CrawlStatistics {
    /// Average fetches per second, or zero for an instantaneous crawl
    pub fn fetch_rate(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.fetches_attempted as f64 / secs
        } else {
            0.0
        }
    }
}

/// Writes a human-readable statistics block
pub fn write_statistics<W: Write>(out: &mut W, stats: &CrawlStatistics) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===")?;
    writeln!(out, "Started:           {}", stats.started_at.to_rfc3339())?;
    writeln!(out, "Elapsed:           {:.3}s", stats.elapsed.as_secs_f64())?;
    writeln!(out, "Tasks spawned:     {}", stats.tasks_spawned)?;
    writeln!(out, "Identifiers:       {}", stats.identifiers_claimed)?;
    writeln!(out, "Fetches attempted: {}", stats.fetches_attempted)?;
    writeln!(out, "  fetched:         {}", stats.fetched)?;
    writeln!(out, "  failed:          {}", stats.failed)?;
    writeln!(out, "Skipped (depth):   {}", stats.skipped_depth)?;
    writeln!(out, "Skipped (visited): {}", stats.skipped_visited)?;
    writeln!(out, "Fetch rate:        {:.2}/s", stats.fetch_rate())?;
    Ok(())
}

/// Prints the statistics block to stdout
pub fn print_statistics(stats: &CrawlStatistics) -> io::Result<()> {
    write_statistics(&mut io::stdout().lock(), stats)
}
