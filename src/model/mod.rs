//! Crawl output data model
//!
//! - `PageRecord`: SEO signals of one fetched page
//! - `FailedPage`: degraded entry for a page that could not be fetched
//! - `CrawlMetadata`: robots.txt, sitemap and run bookkeeping for the whole site

mod metadata;
mod page;

use serde::{Deserialize, Serialize};

pub use metadata::{CrawlMetadata, SitemapInfo};
pub use page::{CrawledPage, FailedPage, FailureKind, HreflangLink, ImageInfo, PageRecord};

/// Terminal output of a crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub pages: Vec<CrawledPage>,
    pub metadata: CrawlMetadata,
}

impl CrawlResult {
    /// Iterates over successfully fetched pages
    pub fn records(&self) -> impl Iterator<Item = &PageRecord> {
        self.pages.iter().filter_map(CrawledPage::as_fetched)
    }

    /// Number of pages fetched successfully, whatever their HTTP status
    pub fn fetched_count(&self) -> usize {
        self.records().count()
    }

    /// Number of degraded entries
    pub fn failed_count(&self) -> usize {
        self.pages.len() - self.fetched_count()
    }
}
