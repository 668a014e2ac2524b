use crate::github::issues::Issue;
use crate::ranking::RankedReport;

pub const HEADING: &str = "## Top Issues";

/// Renders the tracking issue body: the heading, then one ordered-list entry
/// per ranked issue. Every entry uses the `1.` marker and lets Markdown do
/// the numbering. Label groups are not part of the body.
pub fn render_ranking(report: &RankedReport) -> String {
    let mut body = String::from(HEADING);
    body.push('\n');
    for issue in &report.all_issues {
        body.push_str(&render_entry(issue));
        body.push('\n');
    }
    body
}

fn render_entry(issue: &Issue) -> String {
    format!(
        "1. [{url}]({url}) - {count} :+1:",
        url = issue.url,
        count = issue.plus_one_count()
    )
}
