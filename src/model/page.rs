use serde::{Deserialize, Serialize};

use crate::FetchError;

/// Structured SEO signals extracted from one fetched document
///
/// Optional tags that are absent from the document are represented by an
/// empty string rather than `None`, so "missing" and "present but empty"
/// read the same way to every rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Crawl key: the URL as it was dequeued from the frontier
    pub url: String,
    pub status_code: u16,
    pub load_time_ms: u64,
    /// URL of the last response after following redirects
    pub final_url: String,
    /// BFS distance from the seed at first discovery
    pub depth: usize,
    pub redirected: bool,
    pub redirect_hops: u32,
    pub content_type: String,

    // Meta tags
    pub title: String,
    pub meta_description: String,
    pub meta_keywords: String,
    pub meta_robots: String,
    pub canonical: String,

    // Open Graph
    pub og_title: String,
    pub og_description: String,
    pub og_image: String,
    pub og_type: String,

    // Twitter Cards
    pub twitter_card: String,
    pub twitter_title: String,
    pub twitter_description: String,

    // Headings
    pub h1: Vec<String>,
    pub h2_count: usize,
    pub h3_count: usize,
    pub h4_count: usize,

    // Content
    pub word_count: usize,
    /// Length in characters of the trimmed visible body text
    pub content_length: usize,

    pub images: Vec<ImageInfo>,

    /// Absolute same-host link targets, deduplicated, in document order
    pub internal_links: Vec<String>,
    /// Absolute off-host link targets, deduplicated, in document order
    pub external_links: Vec<String>,

    // Technical
    pub lang: String,
    pub viewport: String,
    pub charset: String,

    // Structured data
    pub json_ld: Vec<serde_json::Value>,
    pub has_schema: bool,

    pub hreflang: Vec<HreflangLink>,

    // Pagination
    pub next_page: String,
    pub prev_page: String,

    pub has_https: bool,
    pub has_amp: bool,
}

impl PageRecord {
    /// Total number of distinct link targets on the page
    pub fn total_links(&self) -> usize {
        self.internal_links.len() + self.external_links.len()
    }
}

/// Attributes of one `<img>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub src: String,
    pub alt: String,
    pub title: String,
    pub width: String,
    pub height: String,
    pub loading: String,
}

/// One `<link rel="alternate" hreflang="...">` declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HreflangLink {
    pub lang: String,
    pub href: String,
}

/// Why a page could not be turned into a [`PageRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Network,
    Redirect,
    /// Skipped because robots.txt disallows it; never fetched
    RobotsDisallowed,
}

impl From<&FetchError> for FailureKind {
    fn from(err: &FetchError) -> Self {
        match err {
            FetchError::Timeout { .. } => Self::Timeout,
            FetchError::Network { .. } => Self::Network,
            FetchError::TooManyRedirects { .. }
            | FetchError::RedirectLoop { .. }
            | FetchError::InvalidRedirect { .. } => Self::Redirect,
        }
    }
}

/// Degraded entry recorded in place of a page that could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPage {
    pub url: String,
    pub depth: usize,
    pub error: String,
    pub kind: FailureKind,
}

impl FailedPage {
    /// Builds a failure entry from a fetch error
    pub fn from_fetch_error(url: &str, depth: usize, err: &FetchError) -> Self {
        Self {
            url: url.to_string(),
            depth,
            error: err.to_string(),
            kind: FailureKind::from(err),
        }
    }

    /// Builds the entry for a URL skipped because robots.txt disallows it
    pub fn robots_disallowed(url: &str, depth: usize) -> Self {
        Self {
            url: url.to_string(),
            depth,
            error: "Disallowed by robots.txt".to_string(),
            kind: FailureKind::RobotsDisallowed,
        }
    }

    /// Returns true if the page was attempted and could not be reached
    pub fn is_unreachable(&self) -> bool {
        self.kind != FailureKind::RobotsDisallowed
    }
}

/// One entry of the crawl output, in crawl order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CrawledPage {
    Fetched(PageRecord),
    #[serde(rename = "error")]
    Failed(FailedPage),
}

impl CrawledPage {
    pub fn url(&self) -> &str {
        match self {
            Self::Fetched(record) => &record.url,
            Self::Failed(failed) => &failed.url,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Self::Fetched(record) => record.depth,
            Self::Failed(failed) => failed.depth,
        }
    }

    pub fn as_fetched(&self) -> Option<&PageRecord> {
        match self {
            Self::Fetched(record) => Some(record),
            Self::Failed(_) => None,
        }
    }

    pub fn as_failed(&self) -> Option<&FailedPage> {
        match self {
            Self::Fetched(_) => None,
            Self::Failed(failed) => Some(failed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_from_fetch_error() {
        let err = FetchError::Timeout {
            url: "https://example.com/".to_string(),
        };
        assert_eq!(FailureKind::from(&err), FailureKind::Timeout);

        let err = FetchError::RedirectLoop {
            url: "https://example.com/".to_string(),
        };
        assert_eq!(FailureKind::from(&err), FailureKind::Redirect);
    }

    #[test]
    fn test_failed_page_serializes_with_error_status() {
        let page = CrawledPage::Failed(FailedPage::robots_disallowed("https://example.com/x", 2));
        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["url"], "https://example.com/x");
        assert_eq!(json["depth"], 2);
        assert_eq!(json["kind"], "robots_disallowed");
    }

    #[test]
    fn test_fetched_page_serializes_camel_case() {
        let record = PageRecord {
            url: "https://example.com/".to_string(),
            status_code: 200,
            meta_description: "desc".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(CrawledPage::Fetched(record)).unwrap();

        assert_eq!(json["status"], "fetched");
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["metaDescription"], "desc");
    }

    #[test]
    fn test_robots_skip_is_not_unreachable() {
        assert!(!FailedPage::robots_disallowed("https://example.com/", 0).is_unreachable());

        let err = FetchError::Timeout {
            url: "https://example.com/".to_string(),
        };
        assert!(FailedPage::from_fetch_error("https://example.com/", 0, &err).is_unreachable());
    }

    #[test]
    fn test_crawled_page_accessors() {
        let record = PageRecord {
            url: "https://example.com/a".to_string(),
            depth: 1,
            ..Default::default()
        };
        let page = CrawledPage::Fetched(record);
        assert_eq!(page.url(), "https://example.com/a");
        assert_eq!(page.depth(), 1);
        assert!(page.as_fetched().is_some());
        assert!(page.as_failed().is_none());
    }
}
