//! HTML link extraction for the HTTP fetcher
//!
//! Pulls the page title (used as the recorded content) and every followable
//! link, resolved against the page URL, in document order.

use scraper::{Html, Selector};
use url::Url;

/// Title and outgoing links of one HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Text of the first `<title>` element on one line, if non-empty
    pub title: Option<String>,

    /// Absolute http(s) links
    pub links: Vec<String>,
}

/// Parses an HTML document and extracts its title and links
///
/// Followed: `<a href>` (unless marked `download`) and
/// `<link rel="canonical">`. Dropped: fragment-only hrefs, `javascript:`,
/// `mailto:`, `tel:`, `data:` and anything that does not resolve to http(s).
/// Fragments are stripped, so `/a#top` and `/a` are the same link.
///
/// # Example
///
/// ```
/// use ripple_crawl::fetch::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Home</title></head><body><a href="/docs">Docs</a></body></html>"#;
/// let page = parse_html(html, &Url::parse("https://example.com/").unwrap());
/// assert_eq!(page.title.as_deref(), Some("Home"));
/// assert_eq!(page.links, vec!["https://example.com/docs".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: page_title(&document),
        links: page_links(&document, base_url),
    }
}

fn page_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;

    document
        .select(&selector)
        .next()
        .map(|element| {
            element
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|title| !title.is_empty())
}

fn page_links(document: &Html, base_url: &Url) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href], link[rel='canonical'][href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|element| {
            !(element.value().name() == "a" && element.value().attr("download").is_some())
        })
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Resolves `href` against `base_url`, or `None` if it should not be followed
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];
    if SKIPPED_SCHEMES.iter().any(|scheme| href.starts_with(scheme)) {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    if !matches!(absolute.scheme(), "http" | "https") {
        return None;
    }
    absolute.set_fragment(None);
    Some(absolute.to_string())
}
