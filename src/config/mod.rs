//! Configuration module for Ripple-Crawl
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every section is optional; an empty file crawls the built-in
//! reference graph from `https://golang.org/` to depth 4.
//!
//! # Example
//!
//! ```no_run
//! use ripple_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlerConfig, FetcherConfig, FetcherKind, OutputConfig, PageEntry, DEFAULT_MAX_DEPTH,
    DEFAULT_SEED, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
