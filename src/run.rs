use crate::cli;
use crate::config::{self, Config};
use crate::error::TopIssuesResult;
use crate::github::client::GitHubClient;
use crate::github::{fetch, publish};
use crate::output;
use crate::ranking::{self, RankedReport};
use crate::render;
use anyhow::Context;
use serde_json::Value;
use std::future::Future;

/// Entry point shared by the binary and the acceptance tests.
///
/// `lookup` resolves configuration keys (the binary passes the process
/// environment). Everything printed to stdout is mirrored into
/// `stdout_additional` when given.
pub async fn run<L>(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
    lookup: L,
) -> anyhow::Result<()>
where
    L: Fn(&str) -> Option<String>,
{
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Publish => {
            let config = config::load_config(lookup)?;
            let http = GitHubClient::new(&config)?;
            let (client, target) = (&http, &config);

            let report = publish_top_issues(
                target,
                |page, per_page| {
                    client.list_open_issues(&target.owner, &target.repo, page, per_page)
                },
                |number, body| async move {
                    client
                        .update_issue_body(&target.owner, &target.repo, number, &body)
                        .await
                },
            )
            .await?;

            output::println(
                &format!(
                    "Updated issue #{} with {} ranked issues",
                    config.issue_number,
                    report.all_issues.len()
                ),
                &mut stdout_additional,
            )?;
        }
        cli::parser::Command::Preview => {
            let config = config::load_config(lookup)?;
            let client = GitHubClient::new(&config)?;
            tracing::info!(repository = %config.full_name(), "Previewing ranking");

            let (_, body) = build_ranking(&config, |page, per_page| {
                client.list_open_issues(&config.owner, &config.repo, page, per_page)
            })
            .await
            .context("Failed to build ranking")?;

            output::print(&body, &mut stdout_additional)?;
        }
        cli::parser::Command::Help => {
            output::println(cli::parser::USAGE, &mut stdout_additional)?;
        }
        cli::parser::Command::Unknown(cmd) => {
            return Err(anyhow::anyhow!(
                "Unknown command '{cmd}'. Use --help for usage."
            ));
        }
    }
    Ok(())
}

/// The whole publish run: fetch, rank, render, then one call to
/// `issue_updater` with the rendered body. A failed fetch returns before the
/// updater is touched.
pub async fn publish_top_issues<F, Fut, U, UFut>(
    config: &Config,
    page_fetcher: F,
    issue_updater: U,
) -> anyhow::Result<RankedReport>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = TopIssuesResult<Vec<Value>>>,
    U: FnOnce(u64, String) -> UFut,
    UFut: Future<Output = TopIssuesResult<()>>,
{
    tracing::info!(
        repository = %config.full_name(),
        issue_number = config.issue_number,
        "Ranking open issues"
    );

    let (report, body) = build_ranking(config, page_fetcher)
        .await
        .context("Failed to build ranking")?;

    publish::publish_ranking(config.issue_number, body, issue_updater)
        .await
        .with_context(|| format!("Failed to update issue #{}", config.issue_number))?;

    Ok(report)
}

/// Fetches every open issue of the configured repository, ranks them and
/// renders the tracking issue body.
pub async fn build_ranking<F, Fut>(
    config: &Config,
    page_fetcher: F,
) -> TopIssuesResult<(RankedReport, String)>
where
    F: FnMut(u32, u32) -> Fut,
    Fut: Future<Output = TopIssuesResult<Vec<Value>>>,
{
    let issues = fetch::fetch_open_issues(&config.owner, &config.repo, page_fetcher).await?;
    let report = ranking::rank(issues);
    let body = render::render_ranking(&report);
    Ok((report, body))
}
