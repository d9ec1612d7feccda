//! Site-wide rules
//!
//! These rules need the complete crawl: they compare pages with each other,
//! follow the internal link graph, and read the site metadata.

use super::Finding;
use crate::model::{CrawlMetadata, CrawledPage, PageRecord};
use crate::url::has_non_html_extension;
use std::collections::{HashMap, HashSet};
use url::Url;

const MAX_REDIRECT_HOPS: u32 = 2;
const MAX_DEPTH: usize = 3;
/// Broken targets listed in one finding before the rest are summarized
const LISTED_TARGETS: usize = 5;

/// What the crawl knows about a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Fetched(u16),
    Unreachable,
    /// Known to the crawl but deliberately not fetched
    Skipped,
}

/// Verdict on a link or pagination target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetState {
    Ok,
    Broken(String),
    /// Not crawled, and the crawl was cut short so absence proves nothing
    Unknown,
}

/// Read-only view of a finished crawl shared by every site rule
pub struct SiteContext<'a> {
    pub records: Vec<&'a PageRecord>,
    pub metadata: &'a CrawlMetadata,
    outcomes: HashMap<&'a str, Outcome>,
    /// Internal link targets, not counting links from a page to itself
    linked: HashSet<&'a str>,
}

impl<'a> SiteContext<'a> {
    pub fn new(pages: &'a [CrawledPage], metadata: &'a CrawlMetadata) -> Self {
        let records: Vec<&PageRecord> = pages.iter().filter_map(CrawledPage::as_fetched).collect();

        let mut outcomes = HashMap::new();
        for page in pages {
            let outcome = match page {
                CrawledPage::Fetched(record) => Outcome::Fetched(record.status_code),
                CrawledPage::Failed(failed) if failed.is_unreachable() => Outcome::Unreachable,
                CrawledPage::Failed(_) => Outcome::Skipped,
            };
            outcomes.insert(page.url(), outcome);
        }
        // A redirect target counts as crawled even if it was never dequeued itself
        for &record in &records {
            outcomes
                .entry(record.final_url.as_str())
                .or_insert(Outcome::Fetched(record.status_code));
        }

        let mut linked = HashSet::new();
        for &record in &records {
            for link in &record.internal_links {
                if link != &record.url {
                    linked.insert(link.as_str());
                }
            }
        }

        Self {
            records,
            metadata,
            outcomes,
            linked,
        }
    }

    /// URL that site-level issues are reported against
    pub fn site_url(&self) -> &str {
        &self.metadata.base_url
    }

    /// Returns true if some other page links to `url`
    pub fn is_linked(&self, url: &str) -> bool {
        self.linked.contains(url)
    }

    /// Decides whether a referenced URL is broken
    ///
    /// A target is broken when it was crawled and failed or answered with a
    /// status of 400 or more. A target missing from the crawl is broken only
    /// if the crawl ran to completion.
    pub fn target_state(&self, target: &str) -> TargetState {
        match self.outcomes.get(target) {
            Some(Outcome::Fetched(status)) if *status >= 400 => {
                TargetState::Broken(format!("HTTP {}", status))
            }
            Some(Outcome::Fetched(_)) | Some(Outcome::Skipped) => TargetState::Ok,
            Some(Outcome::Unreachable) => TargetState::Broken("unreachable".to_string()),
            None if self.metadata.budget_reached => TargetState::Unknown,
            None => TargetState::Broken("not found on the site".to_string()),
        }
    }
}

/// Groups pages by a non-empty value and reports each shared value once
///
/// The finding is raised against the first page carrying the value.
fn duplicates<'a>(
    records: &[&'a PageRecord],
    value: impl Fn(&'a PageRecord) -> Option<&'a str>,
    what: &str,
) -> Vec<Finding> {
    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, Vec<&str>> = HashMap::new();

    for &record in records {
        let Some(v) = value(record).filter(|v| !v.is_empty()) else {
            continue;
        };
        groups
            .entry(v)
            .or_insert_with(|| {
                order.push(v);
                Vec::new()
            })
            .push(record.url.as_str());
    }

    order
        .into_iter()
        .filter_map(|v| {
            let urls = &groups[v];
            (urls.len() > 1).then(|| {
                Finding::new(
                    urls[0],
                    format!("This {} appears on {} pages", what, urls.len()),
                )
            })
        })
        .collect()
}

pub fn duplicate_title(ctx: &SiteContext<'_>) -> Vec<Finding> {
    duplicates(&ctx.records, |r| Some(r.title.as_str()), "title")
}

pub fn duplicate_meta_description(ctx: &SiteContext<'_>) -> Vec<Finding> {
    duplicates(
        &ctx.records,
        |r| Some(r.meta_description.as_str()),
        "meta description",
    )
}

pub fn duplicate_h1(ctx: &SiteContext<'_>) -> Vec<Finding> {
    duplicates(&ctx.records, |r| r.h1.first().map(String::as_str), "H1")
}

pub fn orphan_page(ctx: &SiteContext<'_>) -> Vec<Finding> {
    ctx.records
        .iter()
        .filter(|r| r.url != ctx.metadata.base_url && !ctx.is_linked(&r.url))
        .map(|r| Finding::new(&r.url, "No internal link points to this page"))
        .collect()
}

fn describe_broken(targets: &[(String, String)], noun: &str) -> String {
    let listed: Vec<String> = targets
        .iter()
        .take(LISTED_TARGETS)
        .map(|(url, reason)| format!("{} ({})", url, reason))
        .collect();

    let mut description = format!("{} broken {}: {}", targets.len(), noun, listed.join(", "));
    if targets.len() > LISTED_TARGETS {
        description.push_str(&format!(" and {} more", targets.len() - LISTED_TARGETS));
    }
    description
}

pub fn broken_link(ctx: &SiteContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for record in &ctx.records {
        let broken: Vec<(String, String)> = record
            .internal_links
            .iter()
            .filter(|link| {
                Url::parse(link)
                    .map(|url| !has_non_html_extension(&url))
                    .unwrap_or(false)
            })
            .filter_map(|link| match ctx.target_state(link) {
                TargetState::Broken(reason) => Some((link.clone(), reason)),
                TargetState::Ok | TargetState::Unknown => None,
            })
            .collect();

        if !broken.is_empty() {
            let noun = if broken.len() == 1 { "internal link" } else { "internal links" };
            findings.push(Finding::new(&record.url, describe_broken(&broken, noun)));
        }
    }

    findings
}

pub fn redirect_chain(ctx: &SiteContext<'_>) -> Vec<Finding> {
    ctx.records
        .iter()
        .filter(|r| r.redirect_hops > MAX_REDIRECT_HOPS)
        .map(|r| {
            Finding::new(
                &r.url,
                format!("{} redirects before reaching {}", r.redirect_hops, r.final_url),
            )
        })
        .collect()
}

pub fn excessive_depth(ctx: &SiteContext<'_>) -> Vec<Finding> {
    ctx.records
        .iter()
        .filter(|r| r.depth > MAX_DEPTH)
        .map(|r| {
            Finding::new(
                &r.url,
                format!("{} clicks from the home page (recommended: {} max)", r.depth, MAX_DEPTH),
            )
        })
        .collect()
}

/// Only pages served with 200 are compared, error pages carry no alternates
pub fn hreflang_incomplete(ctx: &SiteContext<'_>) -> Vec<Finding> {
    let served: Vec<&PageRecord> = ctx
        .records
        .iter()
        .copied()
        .filter(|r| r.status_code == 200)
        .collect();
    let total = served.len();
    let with_hreflang = served.iter().filter(|r| !r.hreflang.is_empty()).count();

    if with_hreflang > 0 && with_hreflang < total {
        vec![Finding::new(
            ctx.site_url(),
            format!(
                "Only {} of {} pages declare hreflang alternates",
                with_hreflang, total
            ),
        )]
    } else {
        Vec::new()
    }
}

pub fn pagination_broken(ctx: &SiteContext<'_>) -> Vec<Finding> {
    let mut findings = Vec::new();

    for record in &ctx.records {
        let references = [("next", &record.next_page), ("prev", &record.prev_page)];
        let broken: Vec<(String, String)> = references
            .into_iter()
            .filter(|(_, target)| !target.is_empty())
            .filter_map(|(rel, target)| match ctx.target_state(target) {
                TargetState::Broken(reason) => Some((format!("rel={} {}", rel, target), reason)),
                TargetState::Ok | TargetState::Unknown => None,
            })
            .collect();

        if !broken.is_empty() {
            findings.push(Finding::new(
                &record.url,
                describe_broken(&broken, "pagination reference(s)"),
            ));
        }
    }

    findings
}

pub fn amp_detected(ctx: &SiteContext<'_>) -> Vec<Finding> {
    let amp_pages = ctx.records.iter().filter(|r| r.has_amp).count();
    if amp_pages == 0 {
        return Vec::new();
    }
    vec![Finding::new(
        ctx.site_url(),
        format!("{} page(s) declare an AMP version", amp_pages),
    )]
}

pub fn sitemap_missing(ctx: &SiteContext<'_>) -> Vec<Finding> {
    if ctx.metadata.has_sitemap() {
        return Vec::new();
    }
    vec![Finding::new(ctx.site_url(), "No sitemap.xml found at the site root")]
}

pub fn sitemap_incomplete(ctx: &SiteContext<'_>) -> Vec<Finding> {
    match &ctx.metadata.sitemap {
        Some(sitemap) if sitemap.found && sitemap.url_count < ctx.records.len() => {
            vec![Finding::new(
                ctx.site_url(),
                format!(
                    "The sitemap lists {} URLs but {} pages were crawled",
                    sitemap.url_count,
                    ctx.records.len()
                ),
            )]
        }
        _ => Vec::new(),
    }
}

pub fn robots_txt_missing(ctx: &SiteContext<'_>) -> Vec<Finding> {
    if ctx.metadata.robots_txt.is_some() {
        return Vec::new();
    }
    vec![Finding::new(ctx.site_url(), "No robots.txt found at the site root")]
}
