//! Console summary of an audit

use super::AuditReport;
use crate::analyzer::{IssueKind, IssueSet, Priority, RuleId};
use std::collections::HashMap;

/// Number of issues raised by one rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCount {
    pub rule: RuleId,
    pub kind: IssueKind,
    pub priority: Priority,
    pub count: usize,
}

/// Counts issues per rule, most severe first, then most frequent
pub fn rule_counts(issues: &IssueSet) -> Vec<RuleCount> {
    let mut counts: HashMap<RuleId, usize> = HashMap::new();
    for rule in issues.iter().filter_map(|i| i.rule_id) {
        *counts.entry(rule).or_insert(0) += 1;
    }

    let mut result: Vec<RuleCount> = counts
        .into_iter()
        .map(|(rule, count)| {
            let (kind, priority) = rule.classification();
            RuleCount {
                rule,
                kind,
                priority,
                count,
            }
        })
        .collect();

    result.sort_by(|a, b| {
        kind_rank(a.kind)
            .cmp(&kind_rank(b.kind))
            .then(a.priority.cmp(&b.priority))
            .then(b.count.cmp(&a.count))
            .then(a.rule.cmp(&b.rule))
    });
    result
}

fn kind_rank(kind: IssueKind) -> u8 {
    match kind {
        IssueKind::Error => 0,
        IssueKind::Warning => 1,
        IssueKind::Opportunity => 2,
    }
}

/// Prints the audit summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
/// * `max_rules` - How many rules to list under "Top issues"
pub fn print_summary(report: &AuditReport, max_rules: usize) {
    println!("=== SEO Audit: {} ===\n", report.base_url);

    println!("Score: {}/100\n", report.score);

    println!("Crawl:");
    println!("  Pages crawled: {}", report.summary.pages_crawled);
    println!("  Pages failed: {}", report.summary.pages_failed);
    println!("  Duration: {}s", report.summary.duration_seconds);
    if report.metadata.budget_reached {
        println!("  Page budget reached, some pages were not crawled");
    }
    println!(
        "  robots.txt: {}",
        if report.metadata.robots_txt.is_some() {
            "found"
        } else {
            "missing"
        }
    );
    match &report.metadata.sitemap {
        Some(sitemap) if sitemap.found => {
            println!("  sitemap.xml: {} URLs", sitemap.url_count)
        }
        _ => println!("  sitemap.xml: missing"),
    }
    println!();

    println!("Issues:");
    println!("  Errors: {}", report.summary.errors);
    println!("  Warnings: {}", report.summary.warnings);
    println!("  Opportunities: {}", report.summary.opportunities);
    println!();

    let counts = rule_counts(&report.issues);
    if !counts.is_empty() {
        println!("Top issues:");
        for entry in counts.iter().take(max_rules) {
            println!(
                "  [{:?}/{}] {} ({}): {}",
                entry.kind,
                entry.priority,
                entry.rule.title(),
                entry.rule,
                entry.count
            );
        }
        if counts.len() > max_rules {
            println!("  ... and {} more rules", counts.len() - max_rules);
        }
        println!();
    }
}
