use thiserror::Error;

/// Failures that end a ranking run.
///
/// Each stage of the pipeline reports through exactly one variant, so the
/// caller can tell whether anything was written back to GitHub: only
/// `Publish` can happen after the fetch succeeded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TopIssuesError {
    #[error("Failed to fetch open issues: {0}")]
    Transport(String),

    #[error("Failed to publish ranking: {0}")]
    Publish(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type TopIssuesResult<T> = Result<T, TopIssuesError>;
