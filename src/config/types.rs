use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for Sumi-Audit
///
/// Every section and key has a default, so an empty file is a valid config.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum number of URLs visited in one crawl
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Overall timeout for one page fetch, redirects included (milliseconds)
    #[serde(rename = "page-timeout-ms", default = "default_page_timeout_ms")]
    pub page_timeout_ms: u64,

    /// Timeout for the robots.txt and sitemap.xml probes (milliseconds)
    #[serde(rename = "probe-timeout-ms", default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Fixed pause between two page fetches (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Maximum number of redirects followed for one page
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Skip URLs disallowed by the site's robots.txt
    #[serde(rename = "respect-robots", default)]
    pub respect_robots: bool,

    /// Enqueue same-host sitemap URLs right after the seed
    #[serde(rename = "seed-from-sitemap", default)]
    pub seed_from_sitemap: bool,
}

impl CrawlerConfig {
    pub fn page_timeout(&self) -> Duration {
        Duration::from_millis(self.page_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            page_timeout_ms: default_page_timeout_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            request_delay_ms: default_request_delay_ms(),
            max_redirects: default_max_redirects(),
            respect_robots: false,
            seed_from_sitemap: false,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (SEO Crawler)`
    pub fn header_value(&self) -> String {
        format!("{}/{} (SEO Crawler)", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSON report (no report file when absent)
    #[serde(rename = "report-path", default)]
    pub report_path: Option<String>,
}

fn default_max_pages() -> usize {
    10_000
}

fn default_page_timeout_ms() -> u64 {
    30_000
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

fn default_request_delay_ms() -> u64 {
    100
}

fn default_max_redirects() -> u32 {
    5
}

fn default_crawler_name() -> String {
    "SumiAudit".to_string()
}

fn default_crawler_version() -> String {
    "1.0".to_string()
}
