use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub github_token: String,
    pub github_owner: String,
    pub github_repo: String,
    /// Optional override of the CORS exact allow-list (comma-separated)
    pub allowed_origins: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            github_token: env::var("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?,
            github_owner: env::var("GITHUB_OWNER")
                .unwrap_or_else(|_| "openbusinessregistry".to_string()),
            github_repo: env::var("GITHUB_REPO")
                .unwrap_or_else(|_| "openbusinessregistry.github.io".to_string()),
            allowed_origins: env::var("ALLOWED_ORIGINS").ok().map(|raw| {
                raw.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            }),
        })
    }
}
