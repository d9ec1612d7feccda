//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with manual redirect handling
//! - HTML extraction of SEO signals and links
//! - The breadth-first frontier
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;

pub use coordinator::{Coordinator, CrawlProgress, ProgressSender};
pub use extractor::extract_page;
pub use fetcher::{build_http_client, fetch_page, FetchedDocument};
pub use frontier::{Frontier, FrontierEntry, Offer};
