// Main entry point for the registry API server

use std::sync::Arc;

use anyhow::{Context, Result};
use github_client::GitHubClient;
use registry_core::domains::submission::{RepoTarget, ReviewWorkflow};
use registry_core::server::app::build_app;
use registry_core::server::cors::CorsConfig;
use registry_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,registry_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Open Business Registry API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // One repository client for the whole process, passed by reference
    let github = Arc::new(GitHubClient::new(config.github_token.clone()));
    let target = RepoTarget::new(config.github_owner.clone(), config.github_repo.clone());
    let workflow = Arc::new(ReviewWorkflow::new(github, target));

    let mut cors = CorsConfig::default();
    if let Some(origins) = config.allowed_origins.clone() {
        cors = cors.with_allowed_origins(origins);
    }

    // Build application
    let app = build_app(workflow, cors);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
