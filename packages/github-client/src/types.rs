//! Request and response types for the GitHub REST endpoints we use.

use serde::{Deserialize, Serialize};

/// Branch metadata from `GET /repos/{owner}/{repo}/branches/{branch}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchCommit,
}

/// Tip commit of a branch.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
}

/// Body for `POST /repos/{owner}/{repo}/git/refs`.
#[derive(Debug, Serialize)]
pub struct NewRef {
    /// Fully qualified ref, e.g. `refs/heads/my-branch`
    #[serde(rename = "ref")]
    pub full_ref: String,
    pub sha: String,
}

/// Body for `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub struct CreateFileRequest {
    pub message: String,
    /// Base64-encoded file content, as the contents API requires
    pub content: String,
    pub branch: String,
}

/// Body for `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPullRequest {
    pub title: String,
    pub head: String,
    pub base: String,
    pub body: String,
}

/// Pull request as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

/// Error body GitHub returns on non-2xx responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}
