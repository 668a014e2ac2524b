/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Publish,
    Preview,
    Help,
    Unknown(String),
}

pub const USAGE: &str = "\
Usage: top-issues [COMMAND]

Ranks the open issues of a repository by :+1: reactions and writes the
ranking into the body of a tracking issue.

Commands:
  publish   Fetch, rank and overwrite the tracking issue (default)
  preview   Fetch and rank, print the body instead of publishing
  help      Show this message

Environment:
  INPUT_ORG_NAME, INPUT_REPO_NAME   target repository (or GITHUB_REPOSITORY=owner/repo)
  INPUT_ISSUE_NUMBER                tracking issue to overwrite
  GITHUB_TOKEN                      token with read/write access to issues
  GITHUB_API_URL                    API base URL, defaults to https://api.github.com
  RUST_LOG                          log filter, defaults to info";

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    match args.len() {
        0 | 1 => Command::Publish,
        2 => match args[1].as_str() {
            "publish" => Command::Publish,
            "preview" => Command::Preview,
            "help" | "--help" | "-h" => Command::Help,
            cmd => Command::Unknown(cmd.to_string()),
        },
        _ => Command::Unknown(args[1..].join(" ")),
    }
}
