use serde_json::Value;
use std::collections::HashMap;

/// Reaction kind the ranking is built on.
pub const PLUS_ONE: &str = "+1";

/// An open issue as needed for ranking. Built fresh from every list
/// response and never written anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub number: u64,
    pub labels: Vec<String>,
    pub reactions: HashMap<String, u64>,
    pub url: String,
}

impl Issue {
    /// Number of reactions of `kind`. A kind GitHub did not report, or an
    /// issue without any reaction summary, counts as zero.
    pub fn reaction_count(&self, kind: &str) -> u64 {
        self.reactions.get(kind).copied().unwrap_or(0)
    }

    /// Shorthand for the `+1` count, zero when absent.
    pub fn plus_one_count(&self) -> u64 {
        self.reaction_count(PLUS_ONE)
    }

    /// Exact, case-sensitive label match.
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|name| name == label)
    }
}

/// Converts one page of the "list repository issues" response.
///
/// Records without a numeric `number` or a string `html_url` are skipped.
/// Labels may be bare strings or objects carrying a `name`; anything else in
/// the label list is ignored. Only integer-valued reaction entries are kept,
/// which drops the `url` field of GitHub's reaction summary.
pub fn parse_github_issues(issues_json: &[Value]) -> Vec<Issue> {
    issues_json
        .iter()
        .filter_map(|issue| {
            let (Some(number), Some(url)) = (issue["number"].as_u64(), issue["html_url"].as_str())
            else {
                tracing::warn!("Skipping issue record without number or html_url");
                return None;
            };

            let labels = issue["labels"]
                .as_array()
                .map(|labels| labels.iter().filter_map(label_name).collect())
                .unwrap_or_default();

            let reactions = issue["reactions"]
                .as_object()
                .map(|reactions| {
                    reactions
                        .iter()
                        .filter_map(|(kind, count)| count.as_u64().map(|n| (kind.clone(), n)))
                        .collect()
                })
                .unwrap_or_default();

            Some(Issue {
                number,
                labels,
                reactions,
                url: url.to_string(),
            })
        })
        .collect()
}

fn label_name(label: &Value) -> Option<String> {
    match label {
        Value::String(name) => Some(name.clone()),
        Value::Object(fields) => fields.get("name")?.as_str().map(str::to_string),
        _ => None,
    }
}
