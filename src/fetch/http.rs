//! HTTP fetcher implementation
//!
//! Issues one GET per identifier. There is no retry and no request timeout:
//! a failed request ends that branch of the crawl.

use crate::fetch::links::parse_html;
use crate::fetch::{FetchedPage, Fetcher};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use url::Url;

/// Builds the HTTP client shared by all crawl tasks
///
/// # Example
///
/// ```no_run
/// use ripple_crawl::fetch::build_http_client;
///
/// let client = build_http_client("ripple-crawl/0.1").unwrap();
/// ```
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetcher that retrieves pages over HTTP(S)
///
/// The recorded content is the page title (empty when the page has none);
/// the children are the page's absolute links in document order.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher with its own client identified by `user_agent`
    pub fn with_user_agent(user_agent: &str) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, id: &str) -> Result<FetchedPage, FetchError> {
        let url = Url::parse(id).map_err(|_| FetchError::InvalidId { id: id.to_string() })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidId { id: id.to_string() });
        }

        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network_error(id, e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            return Err(FetchError::Http {
                id: id.to_string(),
                status: status.as_u16(),
            });
        }

        // Links resolve against the URL we ended up at after redirects
        let final_url = response.url().clone();
        let body = response.text().await.map_err(|e| network_error(id, e))?;
        let parsed = parse_html(&body, &final_url);

        Ok(FetchedPage::new(parsed.title.unwrap_or_default(), parsed.links))
    }
}

fn network_error(id: &str, error: reqwest::Error) -> FetchError {
    FetchError::Network {
        id: id.to_string(),
        message: error.to_string(),
    }
}
