use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Site-wide signals gathered once per crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlMetadata {
    /// Seed URL the crawl started from
    pub base_url: String,
    /// Body of `/robots.txt`, absent when it could not be fetched
    pub robots_txt: Option<String>,
    /// Parsed `/sitemap.xml`, absent when it could not be fetched
    pub sitemap: Option<SitemapInfo>,
    /// True when the crawl stopped on the page budget with work still queued
    pub budget_reached: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CrawlMetadata {
    /// Creates metadata for a crawl of `base_url` starting now
    pub fn new(base_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            base_url: base_url.into(),
            robots_txt: None,
            sitemap: None,
            budget_reached: false,
            started_at: now,
            finished_at: now,
        }
    }

    /// Returns true if a sitemap was fetched
    pub fn has_sitemap(&self) -> bool {
        self.sitemap.as_ref().map_or(false, |s| s.found)
    }
}

/// `<url><loc>` entries of a sitemap
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapInfo {
    pub found: bool,
    pub url_count: usize,
    pub urls: Vec<String>,
}

impl SitemapInfo {
    pub fn from_urls(urls: Vec<String>) -> Self {
        Self {
            found: true,
            url_count: urls.len(),
            urls,
        }
    }
}
