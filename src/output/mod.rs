//! Output module for crawl results
//!
//! This module handles:
//! - Rendering sorted `(identifier, content)` pairs as text lines
//! - Recording and printing crawl statistics

mod results;
pub mod stats;

pub use results::{format_results, write_results, RESULTS_HEADER};
pub use stats::{print_statistics, write_statistics, CrawlStatistics};
