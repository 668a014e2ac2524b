use crate::error::TopIssuesResult;
use crate::github::issues::{Issue, parse_github_issues};
use serde_json::Value;
use std::future::Future;

/// Page size requested from the list endpoint.
pub const PER_PAGE: u32 = 100;

/// Collects every open issue of `owner/repo`.
///
/// `page_fetcher(page, per_page)` returns the raw records of one page. Pages
/// are requested one after another starting at 1, and the loop ends on the
/// first page holding fewer than [`PER_PAGE`] records. When the total is an
/// exact multiple of the page size this costs one extra, empty request.
///
/// The first failing page aborts the whole fetch; nothing collected so far
/// is returned.
pub async fn fetch_open_issues<F, Fut>(
    owner: &str,
    repo: &str,
    mut page_fetcher: F,
) -> TopIssuesResult<Vec<Issue>>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = TopIssuesResult<Vec<Value>>>,
{
    let mut all_issues = Vec::new();
    let mut page = 1;

    loop {
        tracing::debug!(owner, repo, page, "Requesting open issues page");
        let issues_json = page_fetcher(page, PER_PAGE).await?;
        let page_len = issues_json.len();

        all_issues.extend(parse_github_issues(&issues_json));

        if page_len < PER_PAGE as usize {
            break;
        }
        page += 1;
    }

    tracing::info!(
        owner,
        repo,
        pages = page,
        issues = all_issues.len(),
        "Fetched open issues"
    );
    Ok(all_issues)
}
