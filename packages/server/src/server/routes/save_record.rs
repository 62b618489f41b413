//! Submission endpoint: validate the payload, then open a review pull
//! request.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::server::app::AppState;

/// Successful submission response.
#[derive(Serialize)]
pub struct SaveRecordResponse {
    pub success: bool,
    pub pr_url: String,
}

/// Error response body for both client and server failures.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// `POST /api/save-record`
///
/// 400 for anything wrong with the body itself; 500 with the upstream
/// system's message when the remote workflow fails partway.
pub async fn save_record_handler(State(state): State<AppState>, body: String) -> Response {
    let submission = match state.validator.validate(&body) {
        Ok(submission) => submission,
        Err(invalid) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: invalid.public_message(),
                }),
            )
                .into_response();
        }
    };

    match state.workflow.submit(&submission).await {
        Ok(submitted) => (
            StatusCode::OK,
            Json(SaveRecordResponse {
                success: true,
                pr_url: submitted.pr_url,
            }),
        )
            .into_response(),
        Err(failure) => {
            error!(error = %failure, name = %submission.name, "submission workflow failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: failure.public_message(),
                }),
            )
                .into_response()
        }
    }
}

/// `OPTIONS /api/save-record` preflight: empty success body; the CORS
/// middleware supplies the headers.
pub async fn save_record_preflight() -> StatusCode {
    StatusCode::OK
}
