//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::domains::submission::{ReviewWorkflow, SubmissionValidator};
use crate::server::cors::{cors_middleware, CorsConfig};
use crate::server::routes::{health_handler, save_record_handler, save_record_preflight};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub validator: SubmissionValidator,
    pub workflow: Arc<ReviewWorkflow>,
}

/// Build the Axum application router.
///
/// The repository client inside `workflow` is constructed once at process
/// start and passed in by reference, so tests can wire a fake.
pub fn build_app(workflow: Arc<ReviewWorkflow>, cors: CorsConfig) -> Router {
    let state = AppState {
        validator: SubmissionValidator::new(),
        workflow,
    };

    Router::new()
        .route(
            "/api/save-record",
            post(save_record_handler).options(save_record_preflight),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |request, next| {
            cors_middleware(cors.clone(), request, next)
        }))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
