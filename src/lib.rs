//! Ripple-Crawl: a depth-bounded, deduplicating, concurrent link crawler
//!
//! Starting from a seed identifier, the crawler fans out one task per
//! discovered link, fetches every identifier at most once, and waits for the
//! whole task tree to finish before reporting results in sorted order.

pub mod config;
pub mod crawler;
pub mod fetch;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Ripple-Crawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to fetch a single identifier
///
/// Every variant means "this identifier could not be fetched". The crawl
/// engine treats all of them the same way: the branch ends and nothing is
/// recorded for the identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("not found: {id}")]
    NotFound { id: String },

    #[error("HTTP {status} for {id}")]
    Http { id: String, status: u16 },

    #[error("network error for {id}: {message}")]
    Network { id: String, message: String },

    #[error("invalid identifier: {id}")]
    InvalidId { id: String },
}

impl FetchError {
    /// Returns the identifier the failed fetch was made for
    pub fn id(&self) -> &str {
        match self {
            Self::NotFound { id }
            | Self::Http { id, .. }
            | Self::Network { id, .. }
            | Self::InvalidId { id } => id,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Ripple-Crawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, DedupPolicy};
pub use fetch::{FetchedPage, Fetcher, HttpFetcher, StaticFetcher};
pub use state::VisitState;
