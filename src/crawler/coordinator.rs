//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Probing robots.txt and sitemap.xml once at start
//! - Managing the frontier queue
//! - Coordinating fetching, extraction, and link discovery
//! - Reporting progress to an optional listener

use crate::config::{Config, CrawlerConfig};
use crate::crawler::extractor::extract_page;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::frontier::{Frontier, FrontierEntry, Offer};
use crate::model::{CrawlMetadata, CrawlResult, CrawledPage, FailedPage, SitemapInfo};
use crate::probe::{probe_site, ParsedRobots};
use crate::url::{extract_domain, is_same_host, parse_base_url};
use crate::AuditError;
use chrono::Utc;
use reqwest::Client;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Progress notification sent after each dequeued page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlProgress {
    /// Number of URLs visited so far
    pub current: usize,
    /// Page budget
    pub total: usize,
    /// URL that was just processed
    pub url: String,
}

/// Channel end that receives [`CrawlProgress`] notifications
pub type ProgressSender = UnboundedSender<CrawlProgress>;

/// Main crawler coordinator structure
///
/// One coordinator drives one crawl. All crawl state (frontier, visited
/// set, collected pages) lives inside [`Coordinator::run`], so independent
/// crawls never share anything.
pub struct Coordinator {
    config: CrawlerConfig,
    client: Client,
    base_url: Url,
    base_host: String,
    robots_agent: String,
    progress: Option<ProgressSender>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `base_url` - The seed URL; only pages on its host are crawled
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(AuditError)` - The base URL is unusable or the HTTP client failed to build
    pub fn new(base_url: &str, config: &Config) -> Result<Self, AuditError> {
        let base = parse_base_url(base_url).map_err(|e| AuditError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        let base_host = extract_domain(&base).ok_or_else(|| AuditError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: "missing host".to_string(),
        })?;

        let client = build_http_client(&config.user_agent, config.crawler.page_timeout())?;

        Ok(Self {
            config: config.crawler.clone(),
            client,
            base_url: base,
            base_host,
            robots_agent: config.user_agent.crawler_name.clone(),
            progress: None,
        })
    }

    /// Attaches a progress listener
    ///
    /// Notifications are fire-and-forget: a dropped receiver never slows
    /// down or stops the crawl.
    pub fn with_progress(mut self, progress: ProgressSender) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Runs the main crawl loop
    ///
    /// This is the core crawling logic that:
    /// 1. Probes robots.txt and sitemap.xml
    /// 2. Seeds the frontier (base URL, then sitemap URLs if enabled)
    /// 3. Dequeues, fetches and extracts pages in BFS order
    /// 4. Offers internal links at `depth + 1`
    /// 5. Stops when the frontier is empty or the page budget is spent
    pub async fn run(self) -> CrawlResult {
        let start_time = Instant::now();
        let mut metadata = CrawlMetadata::new(self.base_url.as_str());

        tracing::info!(
            "Starting crawl of {} (budget: {} pages)",
            self.base_url,
            self.config.max_pages
        );

        let (robots_txt, sitemap) = probe_site(
            &self.client,
            &self.base_url,
            self.config.probe_timeout(),
            self.config.max_redirects,
        )
        .await;

        let robots = match (&robots_txt, self.config.respect_robots) {
            (Some(content), true) => Some(ParsedRobots::from_content(content)),
            _ => None,
        };

        let mut frontier = Frontier::new(self.base_url.clone(), self.config.max_pages);
        if self.config.seed_from_sitemap {
            if let Some(sitemap) = &sitemap {
                self.seed_from_sitemap(&mut frontier, sitemap);
            }
        }

        let mut pages = Vec::new();
        while let Some(entry) = frontier.next() {
            let (page, fetched) = self.process_entry(&entry, robots.as_ref()).await;

            if let CrawledPage::Fetched(record) = &page {
                for link in &record.internal_links {
                    self.offer_link(&mut frontier, link, entry.depth + 1);
                }
            }
            pages.push(page);

            self.notify(frontier.visited_count(), frontier.max_pages(), entry.url.as_str());

            // Progress reporting every 10 pages
            if pages.len() % 10 == 0 {
                let rate = pages.len() as f64 / start_time.elapsed().as_secs_f64().max(0.001);
                tracing::info!(
                    "Progress: {} pages crawled, {} in frontier, {:.2} pages/sec",
                    pages.len(),
                    frontier.pending_len(),
                    rate
                );
            }

            if fetched && !self.config.request_delay().is_zero() {
                tokio::time::sleep(self.config.request_delay()).await;
            }
        }

        metadata.robots_txt = robots_txt;
        metadata.sitemap = sitemap;
        metadata.budget_reached = frontier.truncated();
        metadata.finished_at = Utc::now();

        let result = CrawlResult { pages, metadata };
        tracing::info!(
            "Crawl complete: {} pages fetched, {} failed in {:.1}s{}",
            result.fetched_count(),
            result.failed_count(),
            start_time.elapsed().as_secs_f64(),
            if result.metadata.budget_reached {
                " (page budget reached)"
            } else {
                ""
            }
        );

        result
    }

    /// Fetches and extracts one entry
    ///
    /// Returns the crawl entry and whether a request was actually sent.
    async fn process_entry(
        &self,
        entry: &FrontierEntry,
        robots: Option<&ParsedRobots>,
    ) -> (CrawledPage, bool) {
        let url = entry.url.as_str();

        if let Some(robots) = robots {
            if !robots.is_allowed(url, &self.robots_agent) {
                tracing::debug!("Skipping {} (disallowed by robots.txt)", url);
                return (
                    CrawledPage::Failed(FailedPage::robots_disallowed(url, entry.depth)),
                    false,
                );
            }
        }

        tracing::debug!("Fetching {} (depth {})", url, entry.depth);
        let page = match fetch_page(
            &self.client,
            &entry.url,
            self.config.page_timeout(),
            self.config.max_redirects,
        )
        .await
        {
            Ok(document) => {
                tracing::debug!(
                    "Fetched {} -> {} in {}ms",
                    url,
                    document.status_code,
                    document.elapsed_ms
                );
                CrawledPage::Fetched(extract_page(
                    &entry.url,
                    entry.depth,
                    &document,
                    &self.base_host,
                ))
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                CrawledPage::Failed(FailedPage::from_fetch_error(url, entry.depth, &e))
            }
        };

        (page, true)
    }

    fn offer_link(&self, frontier: &mut Frontier, link: &str, depth: usize) {
        let Ok(url) = Url::parse(link) else {
            return;
        };

        match frontier.offer(url, depth) {
            Offer::Queued => tracing::trace!("Queued {} at depth {}", link, depth),
            Offer::NonHtml => tracing::debug!("Skipping non-HTML target {}", link),
            Offer::AlreadyVisited | Offer::AlreadyQueued => {}
        }
    }

    /// Enqueues same-host sitemap URLs at depth 1, after the seed
    fn seed_from_sitemap(&self, frontier: &mut Frontier, sitemap: &SitemapInfo) {
        let mut seeded = 0;
        for loc in &sitemap.urls {
            let Ok(mut url) = Url::parse(loc) else {
                tracing::debug!("Ignoring invalid sitemap URL {}", loc);
                continue;
            };
            if !is_same_host(&url, &self.base_host) {
                continue;
            }
            url.set_fragment(None);
            if frontier.offer(url, 1) == Offer::Queued {
                seeded += 1;
            }
        }
        tracing::info!("Seeded {} URLs from sitemap", seeded);
    }

    fn notify(&self, current: usize, total: usize, url: &str) {
        if let Some(progress) = &self.progress {
            let _ = progress.send(CrawlProgress {
                current,
                total,
                url: url.to_string(),
            });
        }
    }
}
