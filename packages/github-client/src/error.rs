//! Error types for the GitHub client.

use thiserror::Error;

/// Result type for GitHub client operations.
pub type Result<T> = std::result::Result<T, GitHubError>;

/// GitHub client errors.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Configuration error (missing token, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// API error (non-2xx response: auth, rate limit, conflict)
    ///
    /// `message` is GitHub's own error message when the body carries one,
    /// so callers can surface it as-is.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Parse error (unexpected response shape)
    #[error("Parse error: {0}")]
    Parse(String),
}
