//! Rule analyzer
//!
//! Runs two passes over a finished crawl: every per-page rule against every
//! fetched page, then every site-wide rule against the whole crawl. The
//! resulting issues are binned by kind and reduced to a score.

mod explanations;
mod issue;
mod rules;
mod score;

pub use explanations::{explanation, RuleExplanation};
pub use issue::{Issue, IssueCollector, IssueKind, IssueSet, Priority};
pub use rules::{
    Finding, PageRule, RuleId, SiteContext, SiteRule, TargetState, PAGE_RULES, SITE_RULES,
};
pub use score::compute_score;

use crate::model::{CrawlMetadata, CrawledPage};
use serde::Serialize;

/// Issues and score of one analysis run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub issues: IssueSet,
    pub score: u8,
}

/// Evaluates every rule over one crawl
///
/// Analysis is a pure function of its inputs and cannot fail.
pub struct Analyzer<'a> {
    pages: &'a [CrawledPage],
    metadata: &'a CrawlMetadata,
}

impl<'a> Analyzer<'a> {
    pub fn new(pages: &'a [CrawledPage], metadata: &'a CrawlMetadata) -> Self {
        Self { pages, metadata }
    }

    pub fn analyze(&self) -> AnalysisResult {
        tracing::info!("Analyzing {} pages", self.pages.len());

        let mut collector = IssueCollector::new();
        self.analyze_pages(&mut collector);
        self.analyze_site(&mut collector);

        let issues = collector.finish();
        let score = compute_score(&issues);

        tracing::info!(
            "Analysis complete: {} errors, {} warnings, {} opportunities, score {}",
            issues.errors.len(),
            issues.warnings.len(),
            issues.opportunities.len(),
            score
        );

        AnalysisResult { issues, score }
    }

    fn analyze_pages(&self, collector: &mut IssueCollector) {
        for page in self.pages {
            match page {
                CrawledPage::Fetched(record) => {
                    for rule in PAGE_RULES {
                        if let Some(description) = (rule.check)(record) {
                            collector.report(&record.url, rule.id, description);
                        }
                    }
                }
                CrawledPage::Failed(failed) if failed.is_unreachable() => {
                    collector.report(&failed.url, RuleId::PageUnreachable, failed.error.clone());
                }
                CrawledPage::Failed(_) => {}
            }
        }
    }

    fn analyze_site(&self, collector: &mut IssueCollector) {
        let context = SiteContext::new(self.pages, self.metadata);
        for rule in SITE_RULES {
            for finding in (rule.check)(&context) {
                collector.report(&finding.url, rule.id, finding.description);
            }
        }
    }
}
