//! Core types for the registry sync pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;
use crate::freshness::FreshnessVerdict;

/// A business's self-hosted directory record, as served at the well-known
/// record path on its own domain.
///
/// Unknown fields are preserved in `extra` so the registry ingests exactly
/// what the business published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Human-readable business name
    pub name: String,

    /// Canonical website, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Self-reported freshness metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub obp_metadata: Option<PulseMetadata>,

    /// Fields the record declares beyond what the registry reads
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Freshness metadata a business republishes to prove its listing is
/// actively maintained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulseMetadata {
    /// RFC 3339 timestamp of the last owner-confirmed verification.
    ///
    /// Kept as a string: an unparsable pulse is a freshness failure, not a
    /// record-parse failure.
    #[serde(default)]
    pub last_pulse: Option<String>,
}

/// A hostname registered for syncing. The list is externally supplied and
/// read-only to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainTarget {
    pub domain: String,
}

impl DomainTarget {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

/// Terminal outcome of one domain's sync attempt.
///
/// Only `FetchFailed` is an error; the other non-accepted variants are
/// expected negative outcomes that end the attempt quietly.
#[derive(Debug)]
pub enum DomainOutcome {
    /// Record fetched and its pulse is current; ready for ingestion
    Accepted(BusinessRecord),

    /// The domain's crawling rules disallow the record path for our agent
    PolicyDisallowed,

    /// The record path returned a non-success status
    RecordAbsent,

    /// Record fetched but rejected by the freshness check
    Stale(FreshnessVerdict),

    /// Network or parse failure while fetching the record
    FetchFailed(SyncError),
}

impl DomainOutcome {
    /// The accepted record, if this attempt produced one.
    pub fn accepted(&self) -> Option<&BusinessRecord> {
        match self {
            Self::Accepted(record) => Some(record),
            _ => None,
        }
    }

    /// Short label used in log events and sweep summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Accepted(_) => "accepted",
            Self::PolicyDisallowed => "policy_disallowed",
            Self::RecordAbsent => "record_absent",
            Self::Stale(FreshnessVerdict::MissingPulse) => "missing_pulse",
            Self::Stale(FreshnessVerdict::InvalidPulse) => "invalid_pulse",
            Self::Stale(_) => "stale",
            Self::FetchFailed(_) => "fetch_failed",
        }
    }
}

/// One domain's recorded attempt within a sweep.
#[derive(Debug)]
pub struct SyncReport {
    pub domain: String,
    pub outcome: DomainOutcome,
}
