//! End-to-end crawls over static graphs driven through the public API

use ripple_crawl::config::parse_config;
use ripple_crawl::crawler::{crawl, Crawler, DedupPolicy};
use ripple_crawl::fetch::{reference_graph, FetchedPage, StaticFetcher};
use ripple_crawl::output::format_results;
use std::sync::Arc;

const REFERENCE_OUTPUT: &str = "\
https://golang.org/ The Go Programming Language
https://golang.org/pkg/ Packages
https://golang.org/pkg/fmt/ Package fmt
https://golang.org/pkg/os/ Package os
";

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_default_config_reproduces_reference_output() {
    let config = parse_config("").expect("empty config should be valid");
    let report = crawl(&config).await.expect("crawl failed");

    assert_eq!(format_results(&report.results), REFERENCE_OUTPUT);
    assert!(!report.ids().any(|id| id == "https://golang.org/cmd/"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_output_is_identical_across_runs_and_policies() {
    for policy in [DedupPolicy::Atomic, DedupPolicy::CheckThenClaim] {
        let crawler = Crawler::new(Arc::new(reference_graph())).with_policy(policy);
        for _ in 0..20 {
            let report = crawler.crawl("https://golang.org/", 4).await;
            assert_eq!(format_results(&report.results), REFERENCE_OUTPUT);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_reference_graph_depth_boundaries() {
    let crawler = Crawler::new(Arc::new(reference_graph()));

    assert!(crawler.crawl("https://golang.org/", 0).await.results.is_empty());
    assert!(crawler.crawl("https://golang.org/", -3).await.results.is_empty());

    let report = crawler.crawl("https://golang.org/", 2).await;
    assert_eq!(
        report.ids().collect::<Vec<_>>(),
        vec!["https://golang.org/", "https://golang.org/pkg/"]
    );

    let report = crawler.crawl("https://golang.org/", 3).await;
    assert_eq!(report.results.len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_configured_page_table() {
    let config = parse_config(
        r#"
[crawler]
seed = "a"
max-depth = 10
dedup = "check-then-claim"

[[fetcher.pages]]
url = "a"
body = "Alpha"
links = ["c", "b", "gone"]

[[fetcher.pages]]
url = "b"
body = "Beta"
links = ["a", "c"]

[[fetcher.pages]]
url = "c"
body = "Gamma"
links = ["a"]
"#,
    )
    .expect("config should be valid");

    let report = crawl(&config).await.expect("crawl failed");

    assert_eq!(format_results(&report.results), "a Alpha\nb Beta\nc Gamma\n");
    assert_eq!(report.failed, vec!["gone".to_string()]);
}

/// Nodes 1..=255 of a binary heap (8 levels), optionally linking back to the root
fn heap_graph(back_edges: bool) -> StaticFetcher {
    let mut graph = StaticFetcher::new();
    for n in 1..=255u32 {
        let mut links: Vec<String> = [2 * n, 2 * n + 1]
            .iter()
            .filter(|child| **child <= 255)
            .map(|child| format!("node{:03}", child))
            .collect();
        if back_edges {
            links.push("node001".to_string());
        }
        graph.insert(format!("node{:03}", n), FetchedPage::new(n.to_string(), links));
    }
    graph
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_deep_binary_tree_with_back_edges() {
    let report = Crawler::new(Arc::new(heap_graph(true)))
        .crawl("node001", 8)
        .await;

    assert_eq!(report.results.len(), 255);
    assert!(report.failed.is_empty());
    assert_eq!(report.stats.fetched, 255);
    assert!(report.results.windows(2).all(|pair| pair[0].0 < pair[1].0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_binary_tree_depth_limit() {
    for (depth, expected) in [(1, 1), (4, 15), (7, 127), (8, 255), (20, 255)] {
        let report = Crawler::new(Arc::new(heap_graph(false)))
            .crawl("node001", depth)
            .await;
        assert_eq!(report.results.len(), expected, "depth {}", depth);
    }
}
