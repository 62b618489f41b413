//! Submission domain: turning an untrusted payload into a reviewable
//! change against the records repository.

pub mod models;
pub mod validator;
pub mod workflow;

pub use models::{slugify, ValidatedSubmission};
pub use validator::SubmissionValidator;
pub use workflow::{RecordsRepo, RepoTarget, ReviewWorkflow, SubmittedRecord};

use github_client::GitHubError;
use thiserror::Error;

/// Errors a submission can fail with.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Malformed body or missing/blank required field. Local to the
    /// boundary; never reaches the remote workflow.
    #[error("{0}")]
    InvalidInput(String),

    /// A remote repository step failed. Earlier steps are not rolled back;
    /// an already-created branch stays behind for reviewers.
    #[error("remote workflow failed: {0}")]
    Remote(#[from] GitHubError),
}

impl SubmissionError {
    /// Message safe to return to the caller: the upstream system's own
    /// message when there is one, else a generic fallback.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidInput(message) => message.clone(),
            Self::Remote(GitHubError::Api { message, .. }) if !message.is_empty() => {
                message.clone()
            }
            Self::Remote(_) => "System failed to create submission.".to_string(),
        }
    }
}
