//! Fetch port for the crawl engine
//!
//! The engine only knows the [`Fetcher`] trait: give it an identifier, get
//! back the content and the identifiers it links to, or a [`FetchError`].
//! Two implementations ship with the crate:
//! - [`StaticFetcher`]: a fixed in-memory table (test fixtures, offline demo)
//! - [`HttpFetcher`]: real HTTP GET with HTML link extraction

mod http;
mod links;
mod static_table;

pub use http::{build_http_client, HttpFetcher};
pub use links::{parse_html, ParsedPage};
pub use static_table::{reference_graph, StaticFetcher};

use crate::FetchError;
use async_trait::async_trait;

/// Result of a successful fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Content recorded for the identifier
    pub body: String,

    /// Identifiers discovered on the page, in document order
    pub links: Vec<String>,
}

impl FetchedPage {
    pub fn new(body: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            body: body.into(),
            links,
        }
    }
}

/// Capability that turns an identifier into content plus child identifiers
///
/// Implementations must be safe to call concurrently and reentrantly from
/// many tasks. The engine never retries a failed call.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<FetchedPage, FetchError>;
}
