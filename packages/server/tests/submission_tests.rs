//! Integration tests for the submission boundary.
//!
//! Requests run through the full router (validation, review workflow,
//! CORS) against a recording fake of the records repository.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use github_client::{GitHubError, NewPullRequest, PullRequest};
use registry_core::domains::submission::{RecordsRepo, RepoTarget, ReviewWorkflow};
use registry_core::server::app::build_app;
use registry_core::server::cors::CorsConfig;
use tower::ServiceExt;

const PR_URL: &str = "https://github.com/openbusinessregistry/openbusinessregistry.github.io/pull/7";

#[derive(Debug, Clone, PartialEq)]
enum RepoCall {
    BranchTip,
    CreateBranch {
        branch: String,
        sha: String,
    },
    CommitFile {
        path: String,
        message: String,
        content: String,
        branch: String,
    },
    OpenPullRequest {
        title: String,
        head: String,
        base: String,
        body: String,
    },
}

/// Records every remote operation; optionally fails the pull-request step.
#[derive(Default)]
struct FakeRepo {
    calls: Arc<RwLock<Vec<RepoCall>>>,
    fail_pull_request: bool,
}

impl FakeRepo {
    fn calls(&self) -> Vec<RepoCall> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl RecordsRepo for FakeRepo {
    async fn branch_tip(
        &self,
        _owner: &str,
        _repo: &str,
        _branch: &str,
    ) -> github_client::Result<String> {
        self.calls.write().unwrap().push(RepoCall::BranchTip);
        Ok("abc123".to_string())
    }

    async fn create_branch(
        &self,
        _owner: &str,
        _repo: &str,
        branch: &str,
        sha: &str,
    ) -> github_client::Result<()> {
        self.calls.write().unwrap().push(RepoCall::CreateBranch {
            branch: branch.to_string(),
            sha: sha.to_string(),
        });
        Ok(())
    }

    async fn commit_file(
        &self,
        _owner: &str,
        _repo: &str,
        path: &str,
        message: &str,
        content: &[u8],
        branch: &str,
    ) -> github_client::Result<()> {
        self.calls.write().unwrap().push(RepoCall::CommitFile {
            path: path.to_string(),
            message: message.to_string(),
            content: String::from_utf8(content.to_vec()).unwrap(),
            branch: branch.to_string(),
        });
        Ok(())
    }

    async fn open_pull_request(
        &self,
        _owner: &str,
        _repo: &str,
        pull: &NewPullRequest,
    ) -> github_client::Result<PullRequest> {
        self.calls.write().unwrap().push(RepoCall::OpenPullRequest {
            title: pull.title.clone(),
            head: pull.head.clone(),
            base: pull.base.clone(),
            body: pull.body.clone(),
        });
        if self.fail_pull_request {
            return Err(GitHubError::Api {
                status: 403,
                message: "Resource not accessible by integration".to_string(),
            });
        }
        Ok(PullRequest {
            number: 7,
            html_url: PR_URL.to_string(),
        })
    }
}

fn test_app(repo: Arc<FakeRepo>) -> Router {
    let workflow = Arc::new(ReviewWorkflow::new(
        repo,
        RepoTarget::new("openbusinessregistry", "openbusinessregistry.github.io"),
    ));
    build_app(workflow, CorsConfig::default())
}

async fn send(
    app: Router,
    method: Method,
    body: &str,
    origin: Option<&str>,
) -> (StatusCode, serde_json::Value, HeaderMap) {
    let mut request = Request::builder()
        .method(method)
        .uri("/api/save-record")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(origin) = origin {
        request = request.header(header::ORIGIN, origin);
    }
    let response = app
        .oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json, headers)
}

#[tokio::test]
async fn submission_with_url_opens_a_pull_request() {
    let repo = Arc::new(FakeRepo::default());
    let body = r#"{"name": "Stone's Pizza", "url": "https://stonespizza.com"}"#;

    let (status, json, _) = send(test_app(repo.clone()), Method::POST, body, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["pr_url"], PR_URL);

    let calls = repo.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0], RepoCall::BranchTip);

    let RepoCall::CreateBranch { branch, sha } = &calls[1] else {
        panic!("expected branch creation, got {:?}", calls[1]);
    };
    assert!(branch.starts_with("submission-stone-s-pizza-"));
    assert_eq!(sha, "abc123");

    let RepoCall::CommitFile {
        path,
        message,
        content,
        branch: commit_branch,
    } = &calls[2]
    else {
        panic!("expected file commit, got {:?}", calls[2]);
    };
    assert_eq!(path, "records/stone-s-pizza.json");
    assert!(message.contains("Stone's Pizza"));
    assert_eq!(commit_branch, branch);
    // Committed file is the pretty-printed submitted payload
    let committed: serde_json::Value = serde_json::from_str(content).unwrap();
    assert_eq!(committed, serde_json::from_str::<serde_json::Value>(body).unwrap());
    assert!(content.contains('\n'));

    let RepoCall::OpenPullRequest {
        title, head, base, body: pr_body,
    } = &calls[3]
    else {
        panic!("expected pull request, got {:?}", calls[3]);
    };
    assert!(title.contains("Stone's Pizza"));
    assert_eq!(head, branch);
    assert_eq!(base, "main");
    assert!(pr_body.contains("[Check Website](https://stonespizza.com)"));
}

#[tokio::test]
async fn submission_without_url_marks_it_in_the_pull_request() {
    let repo = Arc::new(FakeRepo::default());

    let (status, _, _) = send(
        test_app(repo.clone()),
        Method::POST,
        r#"{"name": "Corner Shop"}"#,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let calls = repo.calls();
    let RepoCall::OpenPullRequest { body, .. } = &calls[3] else {
        panic!("expected pull request, got {:?}", calls[3]);
    };
    assert!(body.contains("_No URL provided_"));
}

#[tokio::test]
async fn malformed_json_is_rejected_without_remote_calls() {
    let repo = Arc::new(FakeRepo::default());

    let (status, json, _) = send(test_app(repo.clone()), Method::POST, "{oops", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert!(repo.calls().is_empty(), "no remote call may be attempted");
}

#[tokio::test]
async fn blank_or_missing_name_is_rejected_without_remote_calls() {
    for body in [r#"{"name": "   "}"#, r#"{"url": "https://x.example"}"#] {
        let repo = Arc::new(FakeRepo::default());

        let (status, json, _) = send(test_app(repo.clone()), Method::POST, body, None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
        assert!(json["error"].is_string());
        assert!(repo.calls().is_empty());
    }
}

#[tokio::test]
async fn remote_failure_surfaces_the_upstream_message() {
    let repo = Arc::new(FakeRepo {
        fail_pull_request: true,
        ..Default::default()
    });

    let (status, json, _) = send(
        test_app(repo.clone()),
        Method::POST,
        r#"{"name": "Stone's Pizza"}"#,
        None,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Resource not accessible by integration");

    // The branch and commit already happened; nothing tries to undo them
    let calls = repo.calls();
    assert_eq!(calls.len(), 4);
    assert!(matches!(calls[1], RepoCall::CreateBranch { .. }));
    assert!(matches!(calls[2], RepoCall::CommitFile { .. }));
}

#[tokio::test]
async fn allowed_and_dev_origins_are_echoed() {
    for origin in [
        "https://openbusinessregistry.github.io",
        "http://localhost:5173",
        "http://127.0.0.1:8000",
    ] {
        let (_, _, headers) = send(
            test_app(Arc::new(FakeRepo::default())),
            Method::POST,
            r#"{"name": "Corner Shop"}"#,
            Some(origin),
        )
        .await;

        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some(origin)
        );
    }
}

#[tokio::test]
async fn unknown_origins_get_the_fallback() {
    let (_, _, headers) = send(
        test_app(Arc::new(FakeRepo::default())),
        Method::POST,
        r#"{"name": "Corner Shop"}"#,
        Some("https://evil.example"),
    )
    .await;

    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("https://openbusinessregistry.org")
    );
}

#[tokio::test]
async fn preflight_is_an_empty_success_with_cors_headers() {
    let (status, json, headers) = send(
        test_app(Arc::new(FakeRepo::default())),
        Method::OPTIONS,
        "",
        Some("http://localhost:3000"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json.is_null());
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|v| v.to_str().ok()),
        Some("POST, OPTIONS")
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .and_then(|v| v.to_str().ok()),
        Some("Content-Type")
    );
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let (status, _, _) = send(
        test_app(Arc::new(FakeRepo::default())),
        Method::GET,
        "",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
