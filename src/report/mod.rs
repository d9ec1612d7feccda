//! Audit report assembly and export
//!
//! This module handles:
//! - Combining the crawl output and the analysis into an [`AuditReport`]
//! - Exporting the report as JSON
//! - Printing a console summary

mod summary;

pub use summary::{print_summary, rule_counts, RuleCount};

use crate::analyzer::{AnalysisResult, IssueSet};
use crate::model::{CrawlMetadata, CrawlResult, CrawledPage};
use crate::AuditError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// Headline numbers of an audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub pages_crawled: usize,
    pub pages_failed: usize,
    pub errors: usize,
    pub warnings: usize,
    pub opportunities: usize,
    pub duration_seconds: i64,
}

/// Complete result of one crawl-then-analyze run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub tool_version: &'static str,
    pub generated_at: DateTime<Utc>,
    /// SHA-256 of the configuration file, when one was used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_hash: Option<String>,
    pub base_url: String,
    pub score: u8,
    pub summary: ReportSummary,
    pub issues: IssueSet,
    pub metadata: CrawlMetadata,
    pub pages: Vec<CrawledPage>,
}

impl AuditReport {
    pub fn new(crawl: CrawlResult, analysis: AnalysisResult) -> Self {
        let summary = ReportSummary {
            pages_crawled: crawl.fetched_count(),
            pages_failed: crawl.failed_count(),
            errors: analysis.issues.errors.len(),
            warnings: analysis.issues.warnings.len(),
            opportunities: analysis.issues.opportunities.len(),
            duration_seconds: (crawl.metadata.finished_at - crawl.metadata.started_at)
                .num_seconds(),
        };

        Self {
            tool_version: env!("CARGO_PKG_VERSION"),
            generated_at: Utc::now(),
            config_hash: None,
            base_url: crawl.metadata.base_url.clone(),
            score: analysis.score,
            summary,
            issues: analysis.issues,
            metadata: crawl.metadata,
            pages: crawl.pages,
        }
    }

    /// Stamps the hash of the configuration the audit ran with
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Serializes the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the JSON report to `path`
    ///
    /// # Arguments
    ///
    /// * `path` - Destination file, overwritten if it exists
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Report written
    /// * `Err(AuditError)` - Serialization or I/O failure
    pub fn write_json(&self, path: &Path) -> Result<(), AuditError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        tracing::info!("Report written to {}", path.display());
        Ok(())
    }
}
