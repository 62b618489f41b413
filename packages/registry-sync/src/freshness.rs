//! Record freshness verification (the pulse check).
//!
//! A business proves its listing is actively maintained by republishing
//! `obp_metadata.last_pulse` at least once a year. Anything older is
//! rejected; a missing or unparsable pulse is likewise a rejection, never
//! automatically fresh.

use chrono::{DateTime, Months, Utc};

use crate::types::BusinessRecord;

/// Outcome of checking a record's self-reported pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessVerdict {
    /// Pulse is strictly newer than one year ago
    Fresh,
    /// Pulse is exactly one year old or older
    Stale,
    /// Record carries no pulse timestamp
    MissingPulse,
    /// Pulse timestamp is not valid RFC 3339
    InvalidPulse,
}

impl FreshnessVerdict {
    pub fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// Judges whether a fetched record is current enough to ingest.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreshnessVerifier;

impl FreshnessVerifier {
    pub fn new() -> Self {
        Self
    }

    /// Verify against the current wall clock.
    pub fn verify(&self, record: &BusinessRecord) -> FreshnessVerdict {
        self.verify_at(record, Utc::now())
    }

    /// Verify against an explicit `now`. A pulse of exactly `now - 1 year`
    /// is rejected; acceptance requires strictly newer.
    pub fn verify_at(&self, record: &BusinessRecord, now: DateTime<Utc>) -> FreshnessVerdict {
        let Some(last_pulse) = record
            .obp_metadata
            .as_ref()
            .and_then(|m| m.last_pulse.as_deref())
        else {
            return FreshnessVerdict::MissingPulse;
        };

        let Ok(pulse) = DateTime::parse_from_rfc3339(last_pulse) else {
            return FreshnessVerdict::InvalidPulse;
        };

        let cutoff = now
            .checked_sub_months(Months::new(12))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);

        if pulse.with_timezone(&Utc) > cutoff {
            FreshnessVerdict::Fresh
        } else {
            FreshnessVerdict::Stale
        }
    }
}
