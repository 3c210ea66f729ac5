//! In-memory fetcher backed by a fixed table of pages

use crate::config::PageEntry;
use crate::fetch::{FetchedPage, Fetcher};
use crate::FetchError;
use async_trait::async_trait;
use std::collections::HashMap;

/// Fetcher that answers from a fixed table
///
/// Unknown identifiers fail with [`FetchError::NotFound`].
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, FetchedPage>,
}

impl StaticFetcher {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the page for `id`
    pub fn with_page(mut self, id: &str, body: &str, links: &[&str]) -> Self {
        self.insert(
            id.to_string(),
            FetchedPage::new(body, links.iter().map(|l| l.to_string()).collect()),
        );
        self
    }

    pub fn insert(&mut self, id: String, page: FetchedPage) {
        self.pages.insert(id, page);
    }

    /// Builds a table from configured page entries
    pub fn from_entries(entries: &[PageEntry]) -> Self {
        let mut fetcher = Self::new();
        for entry in entries {
            fetcher.insert(
                entry.url.clone(),
                FetchedPage::new(entry.body.clone(), entry.links.clone()),
            );
        }
        fetcher
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, id: &str) -> Result<FetchedPage, FetchError> {
        tracing::debug!("Fetching {}", id);
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound { id: id.to_string() })
    }
}

/// The four-page golang.org graph used by the default configuration
///
/// `https://golang.org/cmd/` is linked but absent, so fetching it fails.
pub fn reference_graph() -> StaticFetcher {
    StaticFetcher::new()
        .with_page(
            "https://golang.org/",
            "The Go Programming Language",
            &["https://golang.org/pkg/", "https://golang.org/cmd/"],
        )
        .with_page(
            "https://golang.org/pkg/",
            "Packages",
            &[
                "https://golang.org/",
                "https://golang.org/cmd/",
                "https://golang.org/pkg/fmt/",
                "https://golang.org/pkg/os/",
            ],
        )
        .with_page(
            "https://golang.org/pkg/fmt/",
            "Package fmt",
            &["https://golang.org/", "https://golang.org/pkg/"],
        )
        .with_page(
            "https://golang.org/pkg/os/",
            "Package os",
            &["https://golang.org/", "https://golang.org/pkg/"],
        )
}
