use crate::error::{TopIssuesError, TopIssuesResult};
use std::fmt;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    OrgName,
    RepoName,
    IssueNumber,
    Token,
    Repository,
    ApiUrl,
}

impl ConfigKey {
    /// Environment variable the value is read from.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::OrgName => "INPUT_ORG_NAME",
            ConfigKey::RepoName => "INPUT_REPO_NAME",
            ConfigKey::IssueNumber => "INPUT_ISSUE_NUMBER",
            ConfigKey::Token => "GITHUB_TOKEN",
            ConfigKey::Repository => "GITHUB_REPOSITORY",
            ConfigKey::ApiUrl => "GITHUB_API_URL",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::OrgName,
            ConfigKey::RepoName,
            ConfigKey::IssueNumber,
            ConfigKey::Token,
            ConfigKey::Repository,
            ConfigKey::ApiUrl,
        ]
    }
}

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Everything a run needs, resolved once at startup.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub issue_number: u64,
    pub token: String,
    pub api_url: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("issue_number", &self.issue_number)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Config {
    /// `owner/repo`, the repository field of the run's log lines.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Builds a [`Config`] from a key lookup, normally `std::env::var`.
///
/// Values are trimmed and empty values count as unset. `INPUT_ORG_NAME` and
/// `INPUT_REPO_NAME` take precedence over the `GITHUB_REPOSITORY` fallback,
/// which is only parsed when one of them is missing.
///
/// # Errors
///
/// Returns `TopIssuesError::Configuration` naming the first missing or
/// malformed key.
pub fn load_config<F>(lookup: F) -> TopIssuesResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: ConfigKey| {
        lookup(key.as_str())
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let (owner, repo) = match (get(ConfigKey::OrgName), get(ConfigKey::RepoName)) {
        (Some(owner), Some(repo)) => (owner, repo),
        (owner, repo) => {
            let repository = get(ConfigKey::Repository).ok_or_else(|| {
                let missing = if owner.is_none() {
                    ConfigKey::OrgName
                } else {
                    ConfigKey::RepoName
                };
                missing_key(missing)
            })?;
            let (fallback_owner, fallback_repo) = parse_repository(&repository)?;
            (
                owner.unwrap_or(fallback_owner),
                repo.unwrap_or(fallback_repo),
            )
        }
    };

    let issue_number = get(ConfigKey::IssueNumber)
        .ok_or_else(|| missing_key(ConfigKey::IssueNumber))
        .and_then(|value| parse_issue_number(&value))?;

    let token = get(ConfigKey::Token).ok_or_else(|| missing_key(ConfigKey::Token))?;

    let api_url = get(ConfigKey::ApiUrl)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());

    Ok(Config {
        owner,
        repo,
        issue_number,
        token,
        api_url,
    })
}

/// Parses the destination issue number. Only positive integers are accepted.
pub fn parse_issue_number(value: &str) -> TopIssuesResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(TopIssuesError::Configuration(format!(
            "{} must be a positive integer, got '{}'",
            ConfigKey::IssueNumber.as_str(),
            value
        ))),
    }
}

/// Splits an `owner/repo` string as found in `GITHUB_REPOSITORY`.
pub fn parse_repository(value: &str) -> TopIssuesResult<(String, String)> {
    let parts: Vec<&str> = value.split('/').collect();
    if parts.len() == 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        Ok((parts[0].to_string(), parts[1].to_string()))
    } else {
        Err(TopIssuesError::Configuration(format!(
            "{} must be in the form <owner>/<repo>, got '{}'",
            ConfigKey::Repository.as_str(),
            value
        )))
    }
}

fn missing_key(key: ConfigKey) -> TopIssuesError {
    TopIssuesError::Configuration(format!("{} is not set", key.as_str()))
}
