//! Crawls against a mock HTTP server
//!
//! These tests use wiremock to serve a small site and check the HTTP
//! fetcher and the crawl engine together.

use ripple_crawl::config::{Config, FetcherKind};
use ripple_crawl::crawler::{crawl, Crawler, DedupPolicy};
use ripple_crawl::fetch::{Fetcher, HttpFetcher};
use ripple_crawl::FetchError;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html_page(title: &str, links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    ResponseTemplate::new(200)
        .set_body_string(format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, anchors
        ))
        .insert_header("content-type", "text/html")
}

async fn mount_page(server: &MockServer, route: &str, page: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(page)
        .expect(times)
        .mount(server)
        .await;
}

/// Site layout:
///
/// ```text
/// /        -> /a, /b, /missing (404), /broken (500)
/// /a       -> /
/// /b       -> /a/deep
/// /a/deep  -> /too-deep
/// ```
async fn start_site() -> MockServer {
    let server = MockServer::start().await;

    mount_page(&server, "/", html_page("Home", &["/a", "/b", "/missing", "/broken"]), 1).await;
    mount_page(&server, "/a", html_page("Page A", &["/"]), 1).await;
    mount_page(&server, "/b", html_page("Page B", &["/a/deep"]), 1).await;
    mount_page(&server, "/a/deep", html_page("Deep", &["/too-deep"]), 1).await;
    mount_page(&server, "/too-deep", html_page("Too deep", &[]), 0).await;
    mount_page(&server, "/broken", ResponseTemplate::new(500), 1).await;

    server
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_http_crawl_fetches_each_page_once() {
    let server = start_site().await;
    let base = server.uri();

    let fetcher = HttpFetcher::with_user_agent("TestBot/1.0").expect("client should build");
    let crawler = Crawler::new(Arc::new(fetcher)).with_policy(DedupPolicy::Atomic);
    let report = crawler.crawl(&format!("{}/", base), 3).await;

    let expected: Vec<(String, String)> = vec![
        (format!("{}/", base), "Home".to_string()),
        (format!("{}/a", base), "Page A".to_string()),
        (format!("{}/a/deep", base), "Deep".to_string()),
        (format!("{}/b", base), "Page B".to_string()),
    ];
    assert_eq!(report.results, expected);
    assert_eq!(
        report.failed,
        vec![format!("{}/broken", base), format!("{}/missing", base)]
    );

    // Drop verifies the `expect` counts: one GET per page, none past the depth limit.
    drop(server);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_http_crawl_from_config() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page("Home", &["/a"]), 1).await;
    mount_page(&server, "/a", html_page("Page A", &[]), 0).await;

    let mut config = Config::default();
    config.fetcher.kind = FetcherKind::Http;
    config.crawler.seed = format!("{}/", server.uri());
    config.crawler.max_depth = 1;

    let report = crawl(&config).await.expect("crawl failed");
    assert_eq!(
        report.results,
        vec![(config.crawler.seed.clone(), "Home".to_string())]
    );
}

#[tokio::test]
async fn test_http_fetcher_maps_status_codes() {
    let server = MockServer::start().await;
    mount_page(&server, "/b", html_page("Page B", &["/a/deep"]), 1).await;
    mount_page(&server, "/broken", ResponseTemplate::new(500), 1).await;
    let base = server.uri();
    let fetcher = HttpFetcher::with_user_agent("TestBot/1.0").expect("client should build");

    let page = fetcher.fetch(&format!("{}/b", base)).await.expect("page should load");
    assert_eq!(page.body, "Page B");
    assert_eq!(page.links, vec![format!("{}/a/deep", base)]);

    let missing = format!("{}/missing", base);
    assert_eq!(
        fetcher.fetch(&missing).await,
        Err(FetchError::NotFound { id: missing.clone() })
    );

    let broken = format!("{}/broken", base);
    assert_eq!(
        fetcher.fetch(&broken).await,
        Err(FetchError::Http {
            id: broken.clone(),
            status: 500
        })
    );
}

#[tokio::test]
async fn test_http_fetcher_page_without_title() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"<a href="/next">next</a>"#))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::with_user_agent("TestBot/1.0").expect("client should build");
    let page = fetcher
        .fetch(&format!("{}/plain", server.uri()))
        .await
        .expect("page should load");

    assert_eq!(page.body, "");
    assert_eq!(page.links, vec![format!("{}/next", server.uri())]);
}

#[tokio::test]
async fn test_http_fetcher_unreachable_host() {
    // Bind an ephemeral port and release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("should bind an ephemeral port")
        .port();
    let uri = format!("http://127.0.0.1:{}/", port);

    let fetcher = HttpFetcher::with_user_agent("TestBot/1.0").expect("client should build");
    let result = fetcher.fetch(&uri).await;
    assert!(matches!(result, Err(FetchError::Network { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_fragment_links_fetch_the_page_once() {
    let server = MockServer::start().await;
    mount_page(&server, "/", html_page("Home", &["/a", "/a#top", "/a#end"]), 1).await;
    mount_page(&server, "/a", html_page("Page A", &["/#footer"]), 1).await;

    let fetcher = HttpFetcher::with_user_agent("TestBot/1.0").expect("client should build");
    let report = Crawler::new(Arc::new(fetcher))
        .crawl(&format!("{}/", server.uri()), 3)
        .await;

    assert_eq!(
        report.ids().collect::<Vec<_>>(),
        vec![format!("{}/", server.uri()), format!("{}/a", server.uri())]
    );
}
