use crate::crawler::DedupPolicy;
use serde::Deserialize;

/// Seed used when no configuration file overrides it
pub const DEFAULT_SEED: &str = "https://golang.org/";

/// Depth used when no configuration file overrides it
pub const DEFAULT_MAX_DEPTH: i32 = 4;

/// User agent sent by the HTTP fetcher unless configured otherwise
pub const DEFAULT_USER_AGENT: &str = concat!("ripple-crawl/", env!("CARGO_PKG_VERSION"));

/// Main configuration structure for Ripple-Crawl
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Identifier the crawl starts from
    #[serde(default = "default_seed")]
    pub seed: String,

    /// Maximum number of link levels to follow, counting the seed as one
    #[serde(default = "default_max_depth")]
    pub max_depth: i32,

    /// How concurrent tasks claim identifiers
    #[serde(default)]
    pub dedup: DedupPolicy,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_depth: DEFAULT_MAX_DEPTH,
            dedup: DedupPolicy::default(),
        }
    }
}

/// Which fetcher backs the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetcherKind {
    /// Fixed in-memory table
    #[default]
    Static,

    /// Live HTTP(S) requests
    Http,
}

/// Fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FetcherConfig {
    #[serde(default)]
    pub kind: FetcherKind,

    /// User agent for the HTTP fetcher
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Page table for the static fetcher; empty means the built-in
    /// reference graph
    #[serde(default)]
    pub pages: Vec<PageEntry>,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            kind: FetcherKind::default(),
            user_agent: default_user_agent(),
            pages: Vec::new(),
        }
    }
}

/// One page of a static fetcher table
#[derive(Debug, Clone, Deserialize)]
pub struct PageEntry {
    /// Identifier of the page
    pub url: String,

    /// Content recorded when the page is fetched
    pub body: String,

    /// Identifiers the page links to, in order
    #[serde(default)]
    pub links: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// File the result lines are written to; stdout when absent
    pub results_path: Option<String>,
}

fn default_seed() -> String {
    DEFAULT_SEED.to_string()
}

fn default_max_depth() -> i32 {
    DEFAULT_MAX_DEPTH
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
