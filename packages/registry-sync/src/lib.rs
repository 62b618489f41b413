//! Registry sync library for the Open Business Registry.
//!
//! Each participating business hosts its own record at a well-known path on
//! its own domain (`/obr-business.json`). This library implements the
//! registry side: a polite, best-effort sweep that checks a domain's
//! published crawling rules, fetches the record, and judges whether its
//! self-reported pulse is recent enough to ingest.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use registry_sync::{DomainTarget, HttpDomainFetcher, SyncPipeline};
//!
//! let pipeline = SyncPipeline::new(Arc::new(HttpDomainFetcher::new()));
//! let targets = vec![DomainTarget::new("stonespizza.com")];
//! let reports = pipeline.sync_all(&targets).await;
//! for record in SyncPipeline::accepted(&reports) {
//!     println!("verified {}", record.name);
//! }
//! ```
//!
//! # Modules
//!
//! - [`policy`] - robots.txt parsing and the per-domain policy gate
//! - [`fetcher`] - HTTP fetch boundary (pluggable via [`DomainFetcher`])
//! - [`freshness`] - pulse-based freshness verification
//! - [`pipeline`] - per-domain composition and the sweep driver
//! - [`testing`] - mock fetcher for exercising the pipeline offline

pub mod error;
pub mod fetcher;
pub mod freshness;
pub mod pipeline;
pub mod policy;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{SyncError, SyncResult};
pub use fetcher::{DomainFetcher, HttpDomainFetcher, USER_AGENT};
pub use freshness::{FreshnessVerdict, FreshnessVerifier};
pub use pipeline::SyncPipeline;
pub use policy::{
    CrawlPolicy, PolicyGate, RobotsRules, AGENT_LABEL, DEFAULT_CRAWL_DELAY, RECORD_PATH,
};
pub use testing::MockDomainFetcher;
pub use types::{BusinessRecord, DomainOutcome, DomainTarget, PulseMetadata, SyncReport};
