//! Site metadata prober
//!
//! Best-effort fetches of `/robots.txt` and `/sitemap.xml` at the site
//! origin. Redirects are followed like for pages. Any failure, including a
//! final status other than 200, leaves the matching metadata field absent
//! and never stops the crawl.

mod robots;
mod sitemap;

pub use robots::ParsedRobots;
pub use sitemap::parse_sitemap;

use crate::crawler::fetch_page;
use crate::model::SitemapInfo;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Fetches robots.txt and sitemap.xml for the origin of `base_url` concurrently
///
/// # Arguments
///
/// * `client` - The crawl's HTTP client
/// * `base_url` - Any URL of the site; only its origin is used
/// * `timeout` - Deadline for each probe, redirects included
/// * `max_redirects` - Maximum number of redirect hops per probe
///
/// # Returns
///
/// `(robots_txt, sitemap)`, each `None` when the resource could not be fetched
pub async fn probe_site(
    client: &Client,
    base_url: &Url,
    timeout: Duration,
    max_redirects: u32,
) -> (Option<String>, Option<SitemapInfo>) {
    let (robots, sitemap) = tokio::join!(
        fetch_robots(client, base_url, timeout, max_redirects),
        fetch_sitemap(client, base_url, timeout, max_redirects)
    );
    (robots, sitemap)
}

/// Fetches `/robots.txt` from the origin of `base_url`
pub async fn fetch_robots(
    client: &Client,
    base_url: &Url,
    timeout: Duration,
    max_redirects: u32,
) -> Option<String> {
    let url = base_url.join("/robots.txt").ok()?;
    let body = fetch_ok_text(client, &url, timeout, max_redirects).await?;
    tracing::info!("Found robots.txt at {}", url);
    Some(body)
}

/// Fetches and parses `/sitemap.xml` from the origin of `base_url`
///
/// A sitemap served with 200 but not parseable as XML is still reported as
/// found, with no URLs.
pub async fn fetch_sitemap(
    client: &Client,
    base_url: &Url,
    timeout: Duration,
    max_redirects: u32,
) -> Option<SitemapInfo> {
    let url = base_url.join("/sitemap.xml").ok()?;
    let body = fetch_ok_text(client, &url, timeout, max_redirects).await?;

    let urls = match parse_sitemap(&body) {
        Ok(urls) => urls,
        Err(e) => {
            tracing::warn!("Could not parse sitemap {}: {}", url, e);
            Vec::new()
        }
    };

    tracing::info!("Found sitemap at {} with {} URLs", url, urls.len());
    Some(SitemapInfo::from_urls(urls))
}

async fn fetch_ok_text(
    client: &Client,
    url: &Url,
    timeout: Duration,
    max_redirects: u32,
) -> Option<String> {
    match fetch_page(client, url, timeout, max_redirects).await {
        Ok(document) if document.status_code == 200 => {
            if document.redirected() {
                tracing::debug!("{} redirected to {}", url, document.final_url);
            }
            Some(document.body)
        }
        Ok(document) => {
            tracing::debug!("{} returned {}", url, document.status_code);
            None
        }
        Err(e) => {
            tracing::warn!("Probe request to {} failed: {}", url, e);
            None
        }
    }
}
