use crate::error::TopIssuesResult;
use std::future::Future;

/// Overwrites the tracking issue's body with `body`.
///
/// `issue_updater(issue_number, body)` performs the write. The body is
/// replaced in full, so publishing the same text twice leaves the issue
/// unchanged after the second call.
pub async fn publish_ranking<F, Fut>(
    issue_number: u64,
    body: String,
    issue_updater: F,
) -> TopIssuesResult<()>
where
    F: FnOnce(u64, String) -> Fut,
    Fut: Future<Output = TopIssuesResult<()>>,
{
    tracing::info!(issue_number, bytes = body.len(), "Publishing ranking");
    issue_updater(issue_number, body).await?;
    tracing::info!(issue_number, "Ranking published");
    Ok(())
}
