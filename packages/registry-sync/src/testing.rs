//! Mock fetcher for exercising the pipeline without a network.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{SyncError, SyncResult};
use crate::fetcher::DomainFetcher;
use crate::types::BusinessRecord;

/// Mock [`DomainFetcher`] with canned per-domain responses.
///
/// Record bodies are stored as raw JSON so malformed payloads can be
/// exercised too. Calls are recorded for assertions.
///
/// # Example
///
/// ```rust,ignore
/// let fetcher = MockDomainFetcher::new()
///     .with_policy("example.com", "User-agent: *\nDisallow: /")
///     .with_record("example.com", r#"{"name": "Example"}"#);
/// ```
#[derive(Default)]
pub struct MockDomainFetcher {
    /// Canned robots.txt bodies by domain
    policies: Arc<RwLock<HashMap<String, String>>>,
    /// Canned record bodies (raw JSON) by domain
    records: Arc<RwLock<HashMap<String, String>>>,
    /// Domains whose record fetch fails at the transport level
    unreachable: Arc<RwLock<HashSet<String>>>,
    /// Domains requested via fetch_policy_document
    policy_calls: Arc<RwLock<Vec<String>>>,
    /// Domains requested via fetch_record
    record_calls: Arc<RwLock<Vec<String>>>,
}

impl MockDomainFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a robots.txt body for a domain (builder pattern).
    pub fn with_policy(self, domain: impl Into<String>, content: impl Into<String>) -> Self {
        self.policies
            .write()
            .unwrap()
            .insert(domain.into(), content.into());
        self
    }

    /// Serve a record body for a domain (builder pattern).
    pub fn with_record(self, domain: impl Into<String>, body: impl Into<String>) -> Self {
        self.records
            .write()
            .unwrap()
            .insert(domain.into(), body.into());
        self
    }

    /// Make a domain's record fetch fail at the transport level.
    pub fn with_unreachable_record(self, domain: impl Into<String>) -> Self {
        self.unreachable.write().unwrap().insert(domain.into());
        self
    }

    /// Domains whose policy document was requested.
    pub fn policy_calls(&self) -> Vec<String> {
        self.policy_calls.read().unwrap().clone()
    }

    /// Domains whose record was requested.
    pub fn record_calls(&self) -> Vec<String> {
        self.record_calls.read().unwrap().clone()
    }
}

#[async_trait]
impl DomainFetcher for MockDomainFetcher {
    async fn fetch_policy_document(&self, domain: &str) -> SyncResult<Option<String>> {
        self.policy_calls.write().unwrap().push(domain.to_string());
        Ok(self.policies.read().unwrap().get(domain).cloned())
    }

    async fn fetch_record(&self, domain: &str) -> SyncResult<Option<BusinessRecord>> {
        self.record_calls.write().unwrap().push(domain.to_string());

        if self.unreachable.read().unwrap().contains(domain) {
            return Err(SyncError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))));
        }

        let body = self.records.read().unwrap().get(domain).cloned();
        match body {
            Some(body) => {
                let record = serde_json::from_str(&body)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
