//! Fetch boundary for domain-hosted documents.
//!
//! The pipeline talks to domains only through the [`DomainFetcher`] trait,
//! so tests can substitute canned responses
//! ([`crate::testing::MockDomainFetcher`]).

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{SyncError, SyncResult};
use crate::policy::RECORD_PATH;
use crate::types::BusinessRecord;

/// User agent sent on every outbound request, so businesses can see who is
/// visiting and address us in their crawling rules.
pub const USER_AGENT: &str = "ObrRegistryBot/1.0 (+https://openbusinessregistry.org)";

/// Retrieves a domain's published documents.
#[async_trait]
pub trait DomainFetcher: Send + Sync {
    /// Fetch the domain's crawling-policy document. `None` when the domain
    /// serves none.
    async fn fetch_policy_document(&self, domain: &str) -> SyncResult<Option<String>>;

    /// Fetch and parse the domain's business record. `None` when the record
    /// path returns a non-success status.
    async fn fetch_record(&self, domain: &str) -> SyncResult<Option<BusinessRecord>>;
}

/// HTTPS implementation with a bounded per-request timeout.
///
/// Issues exactly one request per document; retrying is left to the next
/// sweep.
pub struct HttpDomainFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl Default for HttpDomainFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpDomainFetcher {
    /// Create a fetcher with default settings.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: USER_AGENT.to_string(),
        }
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set a custom user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// GET a URL; `None` for non-success statuses, `Err` for transport
    /// failures.
    async fn get(&self, url: &str) -> SyncResult<Option<reqwest::Response>> {
        debug!(url = %url, "fetch starting");
        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "request failed");
                SyncError::Http(Box::new(e))
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(Some(response))
        } else {
            debug!(url = %url, status = %status, "non-success status");
            Ok(None)
        }
    }
}

#[async_trait]
impl DomainFetcher for HttpDomainFetcher {
    async fn fetch_policy_document(&self, domain: &str) -> SyncResult<Option<String>> {
        let url = format!("https://{}/robots.txt", domain);
        match self.get(&url).await? {
            Some(response) => {
                let text = response
                    .text()
                    .await
                    .map_err(|e| SyncError::Http(Box::new(e)))?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    async fn fetch_record(&self, domain: &str) -> SyncResult<Option<BusinessRecord>> {
        let url = format!("https://{}{}", domain, RECORD_PATH);
        match self.get(&url).await? {
            Some(response) => {
                let body = response
                    .text()
                    .await
                    .map_err(|e| SyncError::Http(Box::new(e)))?;
                let record = serde_json::from_str(&body)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
