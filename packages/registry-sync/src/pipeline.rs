//! Per-domain sync pipeline: policy gate → polite delay → fetch → pulse check.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{info, warn};

use crate::fetcher::DomainFetcher;
use crate::freshness::{FreshnessVerdict, FreshnessVerifier};
use crate::policy::PolicyGate;
use crate::types::{BusinessRecord, DomainOutcome, DomainTarget, SyncReport};

/// Composes the policy gate, record fetcher, and freshness verifier into a
/// best-effort sweep.
///
/// Each invocation is independent: no retries are persisted, no backoff is
/// carried between runs, and no deduplication happens across sweeps.
pub struct SyncPipeline {
    fetcher: Arc<dyn DomainFetcher>,
    gate: PolicyGate,
    verifier: FreshnessVerifier,
}

impl SyncPipeline {
    pub fn new(fetcher: Arc<dyn DomainFetcher>) -> Self {
        Self {
            gate: PolicyGate::new(fetcher.clone()),
            verifier: FreshnessVerifier::new(),
            fetcher,
        }
    }

    /// Replace the default policy gate (e.g. a custom agent label).
    pub fn with_gate(mut self, gate: PolicyGate) -> Self {
        self.gate = gate;
        self
    }

    /// Run one domain's attempt to completion.
    ///
    /// Negative outcomes (disallowed, absent, stale, fetch failure) are
    /// recorded, never raised.
    pub async fn sync_domain(&self, target: &DomainTarget) -> SyncReport {
        let outcome = self.attempt(&target.domain).await;
        match &outcome {
            DomainOutcome::Accepted(record) => {
                info!(domain = %target.domain, name = %record.name, "record accepted");
            }
            DomainOutcome::FetchFailed(error) => {
                warn!(domain = %target.domain, error = %error, "sync attempt failed");
            }
            other => {
                info!(domain = %target.domain, outcome = other.label(), "domain skipped");
            }
        }
        SyncReport {
            domain: target.domain.clone(),
            outcome,
        }
    }

    async fn attempt(&self, domain: &str) -> DomainOutcome {
        let policy = self.gate.check(domain).await;
        if !policy.allowed {
            return DomainOutcome::PolicyDisallowed;
        }

        // Politeness floor before touching the record path
        tokio::time::sleep(policy.crawl_delay).await;

        let record = match self.fetcher.fetch_record(domain).await {
            Ok(Some(record)) => record,
            Ok(None) => return DomainOutcome::RecordAbsent,
            Err(error) => return DomainOutcome::FetchFailed(error),
        };

        match self.verifier.verify(&record) {
            FreshnessVerdict::Fresh => DomainOutcome::Accepted(record),
            verdict => DomainOutcome::Stale(verdict),
        }
    }

    /// Sweep a list of domains.
    ///
    /// Attempts run concurrently and independently; one domain's crawl
    /// delay or failure never blocks another's, and reports come back in
    /// input order.
    pub async fn sync_all(&self, targets: &[DomainTarget]) -> Vec<SyncReport> {
        join_all(targets.iter().map(|target| self.sync_domain(target))).await
    }

    /// Accepted records from a sweep's reports.
    pub fn accepted(reports: &[SyncReport]) -> Vec<&BusinessRecord> {
        reports
            .iter()
            .filter_map(|report| report.outcome.accepted())
            .collect()
    }
}
