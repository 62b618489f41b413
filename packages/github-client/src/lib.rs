//! Pure GitHub REST API client.
//!
//! A minimal client for the handful of repository operations the registry
//! needs to turn a submission into a reviewable pull request: read a branch
//! tip, create a ref, commit a file, and open a pull request. No domain
//! logic lives here.
//!
//! # Example
//!
//! ```rust,ignore
//! use github_client::GitHubClient;
//!
//! let client = GitHubClient::from_env()?;
//!
//! let main = client.get_branch("owner", "repo", "main").await?;
//! client
//!     .create_ref("owner", "repo", "refs/heads/new-branch", &main.commit.sha)
//!     .await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GitHubError, Result};
pub use types::{Branch, BranchCommit, CreateFileRequest, NewPullRequest, NewRef, PullRequest};

use base64::Engine as _;
use serde::de::DeserializeOwned;
use tracing::debug;

const BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "obr-registry/0.1";

/// Pure GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    http_client: reqwest::Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    /// Create a new client with the given access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            token: token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `GITHUB_TOKEN`.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| GitHubError::Config("GITHUB_TOKEN not set".into()))?;
        Ok(Self::new(token))
    }

    /// Set a custom base URL (GitHub Enterprise, proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Read a branch and its tip commit.
    pub async fn get_branch(&self, owner: &str, repo: &str, branch: &str) -> Result<Branch> {
        let url = format!(
            "{}/repos/{}/{}/branches/{}",
            self.base_url, owner, repo, branch
        );
        self.send(self.http_client.get(&url)).await
    }

    /// Create a ref (e.g. `refs/heads/my-branch`) pointing at a commit.
    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        full_ref: &str,
        sha: &str,
    ) -> Result<()> {
        let url = format!("{}/repos/{}/{}/git/refs", self.base_url, owner, repo);
        let body = NewRef {
            full_ref: full_ref.to_string(),
            sha: sha.to_string(),
        };
        let _: serde_json::Value = self.send(self.http_client.post(&url).json(&body)).await?;
        Ok(())
    }

    /// Create or update a file on a branch, as one commit.
    ///
    /// Content is raw bytes; the client handles the base64 encoding the
    /// contents API requires.
    pub async fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url, owner, repo, path
        );
        let body = CreateFileRequest {
            message: message.to_string(),
            content: base64::engine::general_purpose::STANDARD.encode(content),
            branch: branch.to_string(),
        };
        let _: serde_json::Value = self.send(self.http_client.put(&url).json(&body)).await?;
        Ok(())
    }

    /// Open a pull request.
    pub async fn create_pull(
        &self,
        owner: &str,
        repo: &str,
        pull: &NewPullRequest,
    ) -> Result<PullRequest> {
        let url = format!("{}/repos/{}/{}/pulls", self.base_url, owner, repo);
        self.send(self.http_client.post(&url).json(pull)).await
    }

    /// Send a request with auth headers; surface non-2xx responses as
    /// [`GitHubError::Api`] carrying GitHub's own message when present.
    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            debug!(status = status.as_u16(), message = %message, "GitHub API error");
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| GitHubError::Parse(e.to_string()))
    }
}

/// GitHub's error message from a response body, else the raw body.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<types::ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.to_string())
}
