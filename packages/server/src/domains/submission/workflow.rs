//! Review workflow: branch, commit, pull request.
//!
//! Four remote steps in strict sequence, each feeding the next. The first
//! failure aborts the rest; nothing is rolled back. A branch created before
//! a later step fails stays behind as a human-visible artifact.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use github_client::{GitHubClient, NewPullRequest, PullRequest};

use super::models::ValidatedSubmission;
use super::SubmissionError;

/// The remote repository operations the workflow performs, in call order.
///
/// [`GitHubClient`] is the production implementation; tests substitute a
/// recording fake.
#[async_trait]
pub trait RecordsRepo: Send + Sync {
    /// Tip commit sha of a branch.
    async fn branch_tip(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> github_client::Result<String>;

    /// Create a branch pointing at a commit.
    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> github_client::Result<()>;

    /// Commit a file to a branch.
    async fn commit_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> github_client::Result<()>;

    /// Open a pull request, returning its browsable form.
    async fn open_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull: &NewPullRequest,
    ) -> github_client::Result<PullRequest>;
}

#[async_trait]
impl RecordsRepo for GitHubClient {
    async fn branch_tip(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> github_client::Result<String> {
        Ok(self.get_branch(owner, repo, branch).await?.commit.sha)
    }

    async fn create_branch(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> github_client::Result<()> {
        self.create_ref(owner, repo, &format!("refs/heads/{}", branch), sha)
            .await
    }

    async fn commit_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> github_client::Result<()> {
        self.put_file(owner, repo, path, message, content, branch)
            .await
    }

    async fn open_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull: &NewPullRequest,
    ) -> github_client::Result<PullRequest> {
        self.create_pull(owner, repo, pull).await
    }
}

/// Identity of the records repository submissions are reviewed in.
#[derive(Debug, Clone)]
pub struct RepoTarget {
    pub owner: String,
    pub repo: String,
    /// The authoritative, continuously deployed branch
    pub base_branch: String,
}

impl RepoTarget {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            base_branch: "main".to_string(),
        }
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmittedRecord {
    /// The review branch carrying the record commit
    pub branch: String,
    /// Browsable pull request URL, returned to the caller
    pub pr_url: String,
}

/// Turns a validated submission into an isolated branch, a committed
/// record file, and a pull request against the main line.
pub struct ReviewWorkflow {
    repo_client: Arc<dyn RecordsRepo>,
    target: RepoTarget,
}

impl ReviewWorkflow {
    /// The repository client is constructed once at process start and
    /// shared by reference, so tests can wire a fake.
    pub fn new(repo_client: Arc<dyn RecordsRepo>, target: RepoTarget) -> Self {
        Self {
            repo_client,
            target,
        }
    }

    pub async fn submit(
        &self,
        submission: &ValidatedSubmission,
    ) -> Result<SubmittedRecord, SubmissionError> {
        let RepoTarget {
            owner,
            repo,
            base_branch,
        } = &self.target;

        // The timestamp keeps concurrent submissions of the same business
        // name from colliding on one branch
        let branch = format!(
            "submission-{}-{}",
            submission.slug,
            Utc::now().timestamp_millis()
        );

        // 1. Tip of the main line to branch off from
        let base_sha = self.repo_client.branch_tip(owner, repo, base_branch).await?;

        // 2. Isolated review branch
        self.repo_client
            .create_branch(owner, repo, &branch, &base_sha)
            .await?;

        // 3. The record file, as one commit on that branch
        let path = format!("records/{}.json", submission.slug);
        let message = format!("New record submission: {}", submission.name);
        self.repo_client
            .commit_file(
                owner,
                repo,
                &path,
                &message,
                submission.record_json().as_bytes(),
                &branch,
            )
            .await?;

        // 4. Pull request into the main line
        let website_link = match &submission.url {
            Some(url) => format!("[Check Website]({})", url),
            None => "_No URL provided_".to_string(),
        };
        let pull = NewPullRequest {
            title: format!("New business record: {}", submission.name),
            head: branch.clone(),
            base: base_branch.clone(),
            body: format!(
                "Reviewing new business registration for **{}**.\n\n{}",
                submission.name, website_link
            ),
        };
        let pr = self.repo_client.open_pull_request(owner, repo, &pull).await?;

        info!(branch = %branch, pr_url = %pr.html_url, "submission opened for review");

        Ok(SubmittedRecord {
            branch,
            pr_url: pr.html_url,
        })
    }
}
