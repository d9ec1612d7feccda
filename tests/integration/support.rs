//! Shared helpers for the integration tests

use sumi_audit::config::{Config, CrawlerConfig};
use sumi_audit::model::{CrawlResult, CrawledPage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with no politeness delay and short timeouts
pub fn test_config(max_pages: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_pages,
            page_timeout_ms: 5_000,
            probe_timeout_ms: 2_000,
            request_delay_ms: 0,
            ..CrawlerConfig::default()
        },
        ..Config::default()
    }
}

/// An HTML response
pub fn html(body: &str) -> ResponseTemplate {
    // set_body_string would force text/plain
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=utf-8")
}

/// A page whose body only holds links to `links`
pub fn link_page(title: &str, links: &[&str]) -> ResponseTemplate {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    html(&format!(
        "<html><head><title>{}</title></head><body>{}</body></html>",
        title, anchors
    ))
}

/// Mounts a GET handler for `route`, expected to be hit exactly once
pub async fn mount_once(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts a GET handler for `route` without call-count expectations
pub async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

/// Returns the crawl entry whose key is `path` on the mock server
pub fn entry<'a>(result: &'a CrawlResult, server: &MockServer, path: &str) -> &'a CrawledPage {
    let url = format!("{}{}", server.uri(), path);
    result
        .pages
        .iter()
        .find(|p| p.url() == url)
        .unwrap_or_else(|| panic!("{} was not crawled", url))
}

/// Paths of every crawl entry, in crawl order
pub fn crawled_paths(result: &CrawlResult, server: &MockServer) -> Vec<String> {
    let prefix = server.uri();
    result
        .pages
        .iter()
        .map(|p| p.url().trim_start_matches(prefix.as_str()).to_string())
        .collect()
}
