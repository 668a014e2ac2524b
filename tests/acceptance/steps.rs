use crate::TopIssuesWorld;
use cucumber::gherkin::Step;
use cucumber::{given, then, when};
use serde_json::{Value, json};
use std::sync::Mutex;
use top_issues::config::{Config, DEFAULT_API_URL};
use top_issues::github::issues::Issue;
use top_issues::run::build_ranking;

const OWNER: &str = "octo-org";
const REPO: &str = "widgets";

fn issue_record(number: u64, plus_one: Option<u64>, labels: &[&str]) -> Value {
    let mut record = json!({
        "number": number,
        "state": "open",
        "html_url": format!("https://github.com/{OWNER}/{REPO}/issues/{number}"),
        "labels": labels.iter().map(|name| json!({ "name": name })).collect::<Vec<_>>(),
    });
    if let Some(count) = plus_one {
        record["reactions"] = json!({ "+1": count, "-1": 0, "total_count": count });
    }
    record
}

fn parse_numbers(list: &str) -> Vec<u64> {
    list.split(',')
        .map(|n| n.trim().parse().expect("Expected a comma separated list of numbers"))
        .collect()
}

fn numbers(issues: &[Issue]) -> Vec<u64> {
    issues.iter().map(|issue| issue.number).collect()
}

fn label_group<'a>(world: &'a TopIssuesWorld, label: &str) -> &'a [Issue] {
    let report = world.report.as_ref().expect("The ranking was not built");
    match label {
        "bug" => report.bug_issues.as_slice(),
        "enhancement" => report.enhancement_issues.as_slice(),
        other => panic!("No group is built for label '{}'", other),
    }
}

#[given("the repository has the open issues:")]
async fn given_open_issues(world: &mut TopIssuesWorld, step: &Step) {
    let table = step.table.as_ref().expect("Expected a table of issues");
    world.open_issues = table
        .rows
        .iter()
        .skip(1)
        .map(|row| {
            let number = row[0].trim().parse().expect("Invalid issue number");
            let plus_one = match row[1].trim() {
                "" => None,
                count => Some(count.parse().expect("Invalid +1 count")),
            };
            let labels: Vec<&str> = row[2]
                .split(',')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .collect();
            issue_record(number, plus_one, &labels)
        })
        .collect();
}

#[given(regex = r"^the repository has (\d+) open issues with (\d+) :\+1: each$")]
async fn given_uniform_issues(world: &mut TopIssuesWorld, count: u64, plus_one: u64) {
    world.open_issues = (1..=count)
        .map(|number| issue_record(number, Some(plus_one), &[]))
        .collect();
}

#[given(regex = r#"^the repository has (\d+) open "([^"]+)" issues with decreasing :\+1: counts$"#)]
async fn given_labelled_issues(world: &mut TopIssuesWorld, count: u64, label: String) {
    world.open_issues = (1..=count)
        .map(|number| issue_record(number, Some(1000 - number), &[label.as_str()]))
        .collect();
}

#[when("the ranking is built")]
async fn when_ranking_is_built(world: &mut TopIssuesWorld) {
    let config = Config {
        owner: OWNER.to_string(),
        repo: REPO.to_string(),
        issue_number: 1,
        token: "ghs_test".to_string(),
        api_url: DEFAULT_API_URL.to_string(),
    };
    let requested = Mutex::new(Vec::new());
    let open_issues = world.open_issues.clone();

    let (report, body) = build_ranking(&config, |page, per_page| {
        requested.lock().expect("Lock poisoned").push(page);
        let start = ((page - 1) * per_page) as usize;
        let data: Vec<Value> = open_issues
            .iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();
        async move { Ok(data) }
    })
    .await
    .expect("Building the ranking should succeed");

    world.requested_pages = requested.into_inner().expect("Lock poisoned");
    world.report = Some(report);
    world.rendered_body = body;
}

#[then("the rendered body should be:")]
async fn then_rendered_body_should_be(world: &mut TopIssuesWorld, step: &Step) {
    let expected = step
        .docstring
        .as_ref()
        .expect("Expected docstring with the rendered body");
    assert_eq!(
        world.rendered_body,
        format!("{}\n", expected.trim()),
        "Rendered body differs:\n---\n{}\n---",
        world.rendered_body
    );
}

#[then("every entry should link the issue URL to itself")]
async fn then_entries_link_to_themselves(world: &mut TopIssuesWorld) {
    let entry = regex::Regex::new(r"^1\. \[(\S+)\]\((\S+)\) - (\d+) :\+1:$").unwrap();
    for line in world.rendered_body.lines().skip(1) {
        let captures = entry
            .captures(line)
            .unwrap_or_else(|| panic!("Malformed ranking entry: {}", line));
        assert_eq!(&captures[1], &captures[2], "Link text and target differ: {}", line);
    }
}

#[then(regex = r#"^the "([^"]+)" group should contain issues "(.*)"$"#)]
async fn then_group_should_contain(world: &mut TopIssuesWorld, label: String, list: String) {
    assert_eq!(numbers(label_group(world, &label)), parse_numbers(&list));
}

#[then(regex = r#"^the "([^"]+)" group should hold the 20 most endorsed issues$"#)]
async fn then_group_should_hold_top_twenty(world: &mut TopIssuesWorld, label: String) {
    let group = label_group(world, &label);
    assert_eq!(numbers(group), (1..=20).collect::<Vec<u64>>());
    assert!(group.iter().all(|issue| issue.has_label(&label)));
}

#[then(regex = r#"^the ranked issues should be "(.*)"$"#)]
async fn then_ranked_issues_should_be(world: &mut TopIssuesWorld, list: String) {
    let report = world.report.as_ref().expect("The ranking was not built");
    assert_eq!(numbers(&report.all_issues), parse_numbers(&list));
}

#[then(regex = r"^(\d+) pages should have been requested$")]
async fn then_pages_requested(world: &mut TopIssuesWorld, count: u32) {
    assert_eq!(world.requested_pages, (1..=count).collect::<Vec<u32>>());
}

#[then(regex = r"^(\d+) issues should be ranked$")]
async fn then_issues_ranked(world: &mut TopIssuesWorld, count: usize) {
    let report = world.report.as_ref().expect("The ranking was not built");
    assert_eq!(report.all_issues.len(), count);
    let mut unique = numbers(&report.all_issues);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), count, "Ranked issues contain duplicates");
}

#[given(regex = r#"^the environment variable "([^"]+)" is "([^"]*)"$"#)]
async fn given_environment_variable(world: &mut TopIssuesWorld, key: String, value: String) {
    world.env.insert(key, value);
}

#[when(regex = r"^I run `top-issues ?([^`]*)`$")]
async fn when_run_top_issues(world: &mut TopIssuesWorld, args: String) {
    let binary = env!("CARGO_BIN_EXE_top-issues");
    let output = std::process::Command::new(binary)
        .args(args.split_whitespace())
        .env_clear()
        .envs(&world.env)
        .env("RUST_LOG", "error")
        .output()
        .unwrap_or_else(|e| panic!("Failed to execute top-issues at {:?}: {}", binary, e));

    world.captured_output = output.stdout;
    world.captured_error = output.stderr;
    world.command_status = Some(output.status);
}

#[then("the command should succeed")]
async fn then_command_should_succeed(world: &mut TopIssuesWorld) {
    assert!(
        world.command_status.is_some_and(|s| s.success()),
        "Command failed with status: {:?}\n{}",
        world.command_status,
        String::from_utf8_lossy(&world.captured_error)
    );
}

#[then("the command should fail")]
async fn then_command_should_fail(world: &mut TopIssuesWorld) {
    assert!(
        world.command_status.is_some_and(|s| !s.success()),
        "Command should have failed but exited with status: {:?}",
        world.command_status
    );
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn then_output_should_contain(world: &mut TopIssuesWorld, expected: String) {
    let output = String::from_utf8(world.captured_output.clone()).expect("Invalid UTF-8");
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r#"^the error should contain "(.*)"$"#)]
async fn then_error_should_contain(world: &mut TopIssuesWorld, expected: String) {
    let error = String::from_utf8(world.captured_error.clone()).expect("Invalid UTF-8");
    assert!(
        error.contains(&expected),
        "Expected error output to contain '{}', but got:\n---\n{}\n---",
        expected,
        error
    );
}

#[then(regex = r#"^the error should contain "(.*)" exactly once$"#)]
async fn then_error_should_contain_once(world: &mut TopIssuesWorld, expected: String) {
    let error = String::from_utf8(world.captured_error.clone()).expect("Invalid UTF-8");
    assert_eq!(
        error.matches(expected.as_str()).count(),
        1,
        "Expected '{}' exactly once in error output:\n---\n{}\n---",
        expected,
        error
    );
}
