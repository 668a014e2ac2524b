use crate::github::issues::Issue;
use std::cmp::Reverse;

/// Issues need at least this many `+1` reactions to be ranked.
pub const MIN_PLUS_ONE: u64 = 2;
/// Size cap of each label group.
pub const LABEL_GROUP_LIMIT: usize = 20;

pub const ENHANCEMENT_LABEL: &str = "enhancement";
pub const BUG_LABEL: &str = "bug";

/// Ranked view of the open issues, every group ordered by descending `+1`.
///
/// Only `all_issues` is rendered; the label groups are kept for callers that
/// want them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedReport {
    pub enhancement_issues: Vec<Issue>,
    pub bug_issues: Vec<Issue>,
    pub all_issues: Vec<Issue>,
}

pub fn rank(issues: Vec<Issue>) -> RankedReport {
    let all_issues = filter_and_sort(issues);
    let report = RankedReport {
        enhancement_issues: top_issues_by_label(ENHANCEMENT_LABEL, &all_issues),
        bug_issues: top_issues_by_label(BUG_LABEL, &all_issues),
        all_issues,
    };
    tracing::info!(
        ranked = report.all_issues.len(),
        enhancements = report.enhancement_issues.len(),
        bugs = report.bug_issues.len(),
        "Ranked issues"
    );
    report
}

/// Keeps issues with at least [`MIN_PLUS_ONE`] `+1`s, most endorsed first.
/// The sort is stable, so equal counts stay in fetch order.
pub fn filter_and_sort(issues: Vec<Issue>) -> Vec<Issue> {
    let mut ranked: Vec<Issue> = issues
        .into_iter()
        .filter(|issue| issue.plus_one_count() >= MIN_PLUS_ONE)
        .collect();
    ranked.sort_by_key(|issue| Reverse(issue.plus_one_count()));
    ranked
}

/// The first [`LABEL_GROUP_LIMIT`] issues of `issues` carrying `label`, in
/// their existing order.
pub fn top_issues_by_label(label: &str, issues: &[Issue]) -> Vec<Issue> {
    issues
        .iter()
        .filter(|issue| issue.has_label(label))
        .take(LABEL_GROUP_LIMIT)
        .cloned()
        .collect()
}
