use crate::config::Config;
use crate::error::{TopIssuesError, TopIssuesResult};
use serde::Serialize;
use serde_json::Value;

const USER_AGENT: &str = "top-issues";
const API_VERSION: &str = "2022-11-28";
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Payload of the "update an issue" call; only the body is replaced.
#[derive(Serialize, Debug, PartialEq)]
pub struct UpdateIssueBody<'a> {
    pub body: &'a str,
}

/// Thin async wrapper over the two GitHub REST calls a run needs.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> TopIssuesResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TopIssuesError::Transport(format!("Failed to create HTTP client: {e}")))?;
        Ok(GitHubClient {
            http,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        })
    }

    /// `GET /repos/{owner}/{repo}/issues?state=open`, one page of raw records.
    pub async fn list_open_issues(
        &self,
        owner: &str,
        repo: &str,
        page: u32,
        per_page: u32,
    ) -> TopIssuesResult<Vec<Value>> {
        let response = self
            .http
            .get(issues_url(&self.api_url, owner, repo))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .query(&[
                ("state", "open".to_string()),
                ("per_page", per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await
            .map_err(|e| TopIssuesError::Transport(format!("{owner}/{repo} page {page}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TopIssuesError::Transport(format!(
                "{owner}/{repo} page {page}: {}",
                describe_failure(status, &body)
            )));
        }

        response
            .json::<Vec<Value>>()
            .await
            .map_err(|e| TopIssuesError::Transport(format!("{owner}/{repo} page {page}: {e}")))
    }

    /// `PATCH /repos/{owner}/{repo}/issues/{issue_number}` replacing the body.
    pub async fn update_issue_body(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> TopIssuesResult<()> {
        let response = self
            .http
            .patch(issue_url(&self.api_url, owner, repo, issue_number))
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
            .json(&UpdateIssueBody { body })
            .send()
            .await
            .map_err(|e| TopIssuesError::Publish(format!("issue #{issue_number}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(TopIssuesError::Publish(format!(
                "issue #{issue_number}: {}",
                describe_failure(status, &text)
            )));
        }
        Ok(())
    }
}

pub fn issues_url(api_url: &str, owner: &str, repo: &str) -> String {
    format!("{api_url}/repos/{owner}/{repo}/issues")
}

pub fn issue_url(api_url: &str, owner: &str, repo: &str, issue_number: u64) -> String {
    format!("{}/{issue_number}", issues_url(api_url, owner, repo))
}

/// Status line plus GitHub's `message`, when the error body carries one.
pub fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value["message"].as_str().map(str::to_string));
    match message {
        Some(message) => format!("HTTP {status}: {message}"),
        None => format!("HTTP {status}"),
    }
}
