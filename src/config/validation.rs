use crate::config::types::{
    Config, CrawlerConfig, FetcherConfig, FetcherKind, OutputConfig, PageEntry,
};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler, config.fetcher.kind)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
///
/// Any depth is accepted; zero or negative simply yields an empty crawl.
fn validate_crawler_config(config: &CrawlerConfig, kind: FetcherKind) -> Result<(), ConfigError> {
    if config.seed.trim().is_empty() {
        return Err(ConfigError::Validation("seed cannot be empty".to_string()));
    }

    if kind == FetcherKind::Http {
        validate_http_url(&config.seed)?;
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.kind == FetcherKind::Http && !config.pages.is_empty() {
        return Err(ConfigError::Validation(
            "pages can only be configured for the static fetcher".to_string(),
        ));
    }

    validate_pages(&config.pages)
}

/// Validates the static page table: non-empty, unique identifiers
fn validate_pages(pages: &[PageEntry]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for page in pages {
        if page.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "page url cannot be empty".to_string(),
            ));
        }

        if !seen.insert(page.url.as_str()) {
            return Err(ConfigError::Validation(format!(
                "page '{}' is defined more than once",
                page.url
            )));
        }

        if let Some(link) = page.links.iter().find(|link| link.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "page '{}' has an empty link '{}'",
                page.url, link
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if matches!(config.results_path.as_deref(), Some(path) if path.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "results_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Requires an absolute http or https URL
fn validate_http_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed URL '{}': {}", raw, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed URL '{}' must use http or https",
            raw
        )));
    }

    Ok(())
}
