//! Integration tests for Ripple-Crawl

mod crawl_tests;
mod http_tests;
