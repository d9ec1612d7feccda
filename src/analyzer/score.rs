//! Scorer: reduces an issue set to a 0-100 score

use super::issue::{IssueKind, IssueSet, Priority};

const CRITICAL_ERROR_PENALTY: i64 = 20;
const HIGH_ERROR_PENALTY: i64 = 10;
const MEDIUM_WARNING_PENALTY: i64 = 5;
const WARNING_PENALTY: i64 = 2;
const OPPORTUNITY_PENALTY: i64 = 1;

/// Computes the site score
///
/// Starts at 100 and subtracts:
/// - 20 per CRITICAL error
/// - 10 per HIGH error
/// - 5 per MEDIUM warning
/// - 2 per warning of any priority
/// - 1 per opportunity
///
/// then clamps to `[0, 100]`.
///
/// MEDIUM warnings are penalized twice, once by their own term and once by
/// the blanket warning term, for 7 points each. Existing scores depend on
/// this weighting.
pub fn compute_score(issues: &IssueSet) -> u8 {
    let critical = issues.count(IssueKind::Error, Priority::Critical) as i64;
    let high = issues.count(IssueKind::Error, Priority::High) as i64;
    let medium_warnings = issues.count(IssueKind::Warning, Priority::Medium) as i64;
    let warnings = issues.warnings.len() as i64;
    let opportunities = issues.opportunities.len() as i64;

    let score = 100
        - critical * CRITICAL_ERROR_PENALTY
        - high * HIGH_ERROR_PENALTY
        - medium_warnings * MEDIUM_WARNING_PENALTY
        - warnings * WARNING_PENALTY
        - opportunities * OPPORTUNITY_PENALTY;

    score.clamp(0, 100) as u8
}
