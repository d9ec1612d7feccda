//! Issue model produced by the rule analyzer

use super::explanations::RuleExplanation;
use super::rules::RuleId;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Issue bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    /// Site-breaking problem
    Error,
    /// Degraded but functional
    Warning,
    /// Optional improvement
    Opportunity,
}

/// Issue priority, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        };
        f.write_str(label)
    }
}

/// One finding of one rule against one URL
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub url: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<RuleId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<&'static RuleExplanation>,
}

impl Issue {
    /// Builds an issue for `rule`, taking title, kind and priority from the rule
    pub fn new(url: impl Into<String>, rule: RuleId, description: impl Into<String>) -> Self {
        let (kind, priority) = rule.classification();
        Self {
            url: url.into(),
            title: rule.title().to_string(),
            description: description.into(),
            priority,
            kind,
            rule_id: Some(rule),
            explanation: Some(rule.explanation()),
        }
    }
}

/// Issues grouped into their three bins
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IssueSet {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub opportunities: Vec<Issue>,
}

impl IssueSet {
    /// Adds an issue to the bin matching its kind
    pub fn push(&mut self, issue: Issue) {
        match issue.kind {
            IssueKind::Error => self.errors.push(issue),
            IssueKind::Warning => self.warnings.push(issue),
            IssueKind::Opportunity => self.opportunities.push(issue),
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len() + self.opportunities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates errors, then warnings, then opportunities
    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.opportunities.iter())
    }

    /// Returns the issues raised by `rule`
    pub fn by_rule(&self, rule: RuleId) -> Vec<&Issue> {
        self.iter().filter(|i| i.rule_id == Some(rule)).collect()
    }

    /// Counts issues of `kind` with `priority`
    pub fn count(&self, kind: IssueKind, priority: Priority) -> usize {
        self.bin(kind)
            .iter()
            .filter(|i| i.priority == priority)
            .count()
    }

    pub fn bin(&self, kind: IssueKind) -> &[Issue] {
        match kind {
            IssueKind::Error => &self.errors,
            IssueKind::Warning => &self.warnings,
            IssueKind::Opportunity => &self.opportunities,
        }
    }
}

/// Accumulates issues while keeping each (url, rule) pair unique
#[derive(Debug, Default)]
pub struct IssueCollector {
    seen: HashSet<(String, RuleId)>,
    issues: IssueSet,
}

impl IssueCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finding; a repeated (url, rule) pair is ignored
    ///
    /// Returns true if the issue was added.
    pub fn report(&mut self, url: &str, rule: RuleId, description: impl Into<String>) -> bool {
        if !self.seen.insert((url.to_string(), rule)) {
            tracing::trace!("Ignoring repeated {} for {}", rule, url);
            return false;
        }
        self.issues.push(Issue::new(url, rule, description));
        true
    }

    pub fn finish(self) -> IssueSet {
        self.issues
    }
}
