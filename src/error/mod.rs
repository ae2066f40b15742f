//! Error types and handling for gl1tch-card
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Variants follow the run's stages: configuration and stats fetching
//! (generation), working-tree writes, committing, and pushing. Every error is
//! fatal for the run; `main` maps them to a non-zero exit code. Push errors
//! are the only retryable class, and only by a fresh invocation.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for gl1tch-card operations
#[derive(Error, Diagnostic, Debug)]
pub enum Gl1tchError {
    // Configuration errors
    #[error("Missing required environment variable: {name}")]
    #[diagnostic(
        code(gl1tch::config::missing_env),
        help("Set {name} in the environment before invoking gl1tch-card")
    )]
    MissingEnv { name: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(gl1tch::config::invalid))]
    ConfigInvalid { message: String },

    // Stats fetch errors (generation stage)
    #[error("HTTP request failed: {url}: {reason}")]
    #[diagnostic(
        code(gl1tch::http::request_failed),
        help("Check network connectivity and that the endpoint is reachable")
    )]
    HttpRequestFailed { url: String, reason: String },

    #[error("GitHub API error {status}: {message}")]
    #[diagnostic(code(gl1tch::github::api_failed))]
    GitHubApiFailed { status: u16, message: String },

    #[error("GitHub rate limit exceeded: {message}")]
    #[diagnostic(
        code(gl1tch::github::rate_limited),
        help("Wait for the rate limit window to reset, or use a token with higher limits")
    )]
    GitHubRateLimited { message: String },

    #[error("GitHub user not found: {username}")]
    #[diagnostic(code(gl1tch::github::user_not_found))]
    GitHubUserNotFound { username: String },

    #[error("GitHub GraphQL query failed: {message}")]
    #[diagnostic(code(gl1tch::github::graphql_failed))]
    GraphqlFailed { message: String },

    #[error("WakaTime API error {status}: {message}")]
    #[diagnostic(
        code(gl1tch::wakatime::api_failed),
        help("Check that INPUT_WAKATIME_API_KEY is a valid WakaTime API key")
    )]
    WakaTimeApiFailed { status: u16, message: String },

    #[error("Malformed {what} response: {reason}")]
    #[diagnostic(code(gl1tch::fetch::malformed_response))]
    MalformedResponse { what: String, reason: String },

    // Theme errors (generation stage)
    #[error("Failed to fetch theme '{theme}': {reason}")]
    #[diagnostic(
        code(gl1tch::theme::fetch_failed),
        help("Theme names must match a file under Gogh-Co/Gogh/themes, e.g. 'Aco'")
    )]
    ThemeFetchFailed { theme: String, reason: String },

    #[error("Failed to parse theme '{theme}': {reason}")]
    #[diagnostic(code(gl1tch::theme::parse_failed))]
    ThemeParseFailed { theme: String, reason: String },

    // Working-tree write errors (publish stage)
    #[error("Failed to write file: {path}")]
    #[diagnostic(code(gl1tch::publish::write_failed))]
    WriteFailed { path: String, reason: String },

    #[error("gl1tch card section not found in {path}")]
    #[diagnostic(
        code(gl1tch::publish::marker_missing),
        help(
            "Add <!--START_SECTION:gl1tch-card--> and <!--END_SECTION:gl1tch-card--> markers to the README"
        )
    )]
    MarkerSectionMissing { path: String },

    #[error("Failed to read publish state: {path}")]
    #[diagnostic(code(gl1tch::publish::state_read_failed))]
    StateReadFailed { path: String, reason: String },

    // Commit errors (publish stage)
    #[error("Failed to commit: {reason}")]
    #[diagnostic(code(gl1tch::publish::commit_failed))]
    CommitFailed { reason: String },

    #[error("Invalid bot identity '{name} <{email}>': {reason}")]
    #[diagnostic(code(gl1tch::publish::invalid_identity))]
    InvalidIdentity {
        name: String,
        email: String,
        reason: String,
    },

    // Push errors (publish stage, retryable by a fresh run)
    #[error("Failed to push to remote: {reason}")]
    #[diagnostic(
        code(gl1tch::publish::push_rejected),
        help("The remote may have advanced; a fresh run regenerates against the updated history")
    )]
    PushRejected { reason: String },

    // Git plumbing errors
    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(gl1tch::git::clone_failed),
        help("Check that the token grants access to the profile repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(gl1tch::git::operation_failed))]
    GitOperationFailed { message: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(gl1tch::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for Gl1tchError {
    fn from(err: std::io::Error) -> Self {
        Gl1tchError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<git2::Error> for Gl1tchError {
    fn from(err: git2::Error) -> Self {
        Gl1tchError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for Gl1tchError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(ToString::to_string)
            .unwrap_or_else(|| "unknown".to_string());
        Gl1tchError::HttpRequestFailed {
            url,
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Gl1tchError {
    fn from(err: serde_json::Error) -> Self {
        Gl1tchError::MalformedResponse {
            what: "JSON".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, Gl1tchError>;
