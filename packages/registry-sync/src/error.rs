//! Typed errors for the sync library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Negative sync
//! outcomes (policy disallowed, record absent, stale pulse) are not errors
//! and live in [`crate::types::DomainOutcome`]; this module only covers
//! genuine fetch and parse failures.

use thiserror::Error;

/// Errors that can occur while retrieving a domain's documents.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed (connect, TLS, timeout)
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Response body was not a valid business record
    #[error("malformed record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}

/// Result type alias for sync operations.
pub type SyncResult<T> = std::result::Result<T, SyncError>;
