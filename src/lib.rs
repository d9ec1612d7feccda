//! Sumi-Audit: an on-page SEO site auditor
//!
//! This crate crawls a single site breadth-first, extracts on-page SEO signals
//! from every fetched document, and scores the site against a fixed rule set.
//!
//! The pipeline has two halves:
//! - [`crawl`] drives the frontier loop and returns every page plus site metadata
//! - [`analyze`] evaluates per-page and site-wide rules and reduces them to a score

pub mod analyzer;
pub mod config;
pub mod crawler;
pub mod model;
pub mod probe;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for Sumi-Audit operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("No page could be crawled from {url}")]
    NoPagesCrawled { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Network-level failure while fetching a single page
///
/// HTTP error statuses are not failures: a 404 or 500 response is returned
/// as a regular document. Only transport problems end up here.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTTP error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Too many redirects (limit {limit}) from {url}")]
    TooManyRedirects { url: String, limit: u32 },

    #[error("Redirect loop detected at {url}")]
    RedirectLoop { url: String },

    #[error("Invalid redirect location '{location}' from {url}")]
    InvalidRedirect { url: String, location: String },
}

/// Result type alias for Sumi-Audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use analyzer::{AnalysisResult, Issue, IssueKind, Priority, RuleId};
pub use config::Config;
pub use crawler::{CrawlProgress, ProgressSender};
pub use model::{CrawlMetadata, CrawlResult, CrawledPage, PageRecord};
pub use report::AuditReport;

/// Crawls a site starting from `base_url`
///
/// Only setup problems (an unusable base URL, an HTTP client that cannot be
/// built) are returned as errors. Individual unreachable pages are recorded
/// as [`CrawledPage::Failed`] entries and the crawl carries on.
pub async fn crawl(
    base_url: &str,
    config: &Config,
    progress: Option<ProgressSender>,
) -> Result<CrawlResult> {
    let mut coordinator = crawler::Coordinator::new(base_url, config)?;
    if let Some(progress) = progress {
        coordinator = coordinator.with_progress(progress);
    }
    Ok(coordinator.run().await)
}

/// Evaluates every rule over a completed crawl and scores the result
pub fn analyze(pages: &[CrawledPage], metadata: &CrawlMetadata) -> AnalysisResult {
    analyzer::Analyzer::new(pages, metadata).analyze()
}

/// Runs the full crawl-then-analyze pipeline
///
/// Fails with [`AuditError::NoPagesCrawled`] when not a single page could be
/// fetched, since an empty crawl cannot be meaningfully scored.
pub async fn audit(
    base_url: &str,
    config: &Config,
    progress: Option<ProgressSender>,
) -> Result<AuditReport> {
    let result = crawl(base_url, config, progress).await?;

    if result.fetched_count() == 0 {
        return Err(AuditError::NoPagesCrawled {
            url: base_url.to_string(),
        });
    }

    let analysis = analyze(&result.pages, &result.metadata);
    Ok(AuditReport::new(result, analysis))
}
