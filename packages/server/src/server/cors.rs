//! Cross-origin contract for the submission boundary.
//!
//! The allow-list is an explicit configuration value, not something buried
//! in handler logic: exact production origins, local-development prefixes,
//! and the fallback origin everyone else receives.

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// CORS configuration for the submission endpoint.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Origins echoed back verbatim on exact match
    pub allowed_origins: Vec<String>,
    /// Prefixes that admit any local-development origin (any port)
    pub dev_prefixes: Vec<String>,
    /// Sent to every origin that matches neither list
    pub fallback_origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "https://openbusinessregistry.github.io".to_string(),
                "https://openbusinessregistry.org".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:5500".to_string(),
            ],
            dev_prefixes: vec![
                "http://localhost".to_string(),
                "http://127.0.0.1".to_string(),
            ],
            fallback_origin: "https://openbusinessregistry.org".to_string(),
        }
    }
}

impl CorsConfig {
    /// Override the exact allow-list, keeping dev prefixes and fallback.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    /// The `Access-Control-Allow-Origin` value for a request origin.
    pub fn resolve_origin<'a>(&'a self, request_origin: Option<&'a str>) -> &'a str {
        match request_origin {
            Some(origin)
                if self.allowed_origins.iter().any(|allowed| allowed == origin)
                    || self
                        .dev_prefixes
                        .iter()
                        .any(|prefix| origin.starts_with(prefix)) =>
            {
                origin
            }
            _ => &self.fallback_origin,
        }
    }
}

/// Middleware applying the cross-origin headers to every response.
pub async fn cors_middleware(config: CorsConfig, request: Request, next: Next) -> Response {
    let request_origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;

    let allow_origin = config.resolve_origin(request_origin.as_deref());
    if let Ok(value) = HeaderValue::from_str(allow_origin) {
        response
            .headers_mut()
            .insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );

    response
}
