//! Verification report and run outcome.
//!
//! A report is produced once per document and holds exactly one verdict per
//! extracted claim, in extraction order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::verdict::{Verdict, VerdictStatus};

/// Verdict counts by status. `Error` is kept apart from the closed buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    #[serde(rename = "Verified")]
    pub verified: usize,

    #[serde(rename = "Inaccurate")]
    pub inaccurate: usize,

    #[serde(rename = "False")]
    pub false_: usize,

    #[serde(rename = "Error")]
    pub error: usize,
}

impl Tally {
    pub fn from_verdicts<'a>(verdicts: impl IntoIterator<Item = &'a Verdict>) -> Self {
        let mut tally = Self::default();
        for verdict in verdicts {
            tally.record(verdict.status);
        }
        tally
    }

    pub fn record(&mut self, status: VerdictStatus) {
        match status {
            VerdictStatus::Verified => self.verified += 1,
            VerdictStatus::Inaccurate => self.inaccurate += 1,
            VerdictStatus::False => self.false_ += 1,
            VerdictStatus::Error => self.error += 1,
        }
    }

    pub fn count(&self, status: VerdictStatus) -> usize {
        match status {
            VerdictStatus::Verified => self.verified,
            VerdictStatus::Inaccurate => self.inaccurate,
            VerdictStatus::False => self.false_,
            VerdictStatus::Error => self.error,
        }
    }

    pub fn total(&self) -> usize {
        self.verified + self.inaccurate + self.false_ + self.error
    }
}

/// Ordered verdicts for one document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Unique identifier for this run
    pub run_id: Uuid,

    /// When verification started
    pub started_at: DateTime<Utc>,

    /// When the last verdict was produced
    pub completed_at: DateTime<Utc>,

    /// One verdict per claim, in claim order
    pub verdicts: Vec<Verdict>,

    /// Counts by status
    pub tally: Tally,
}

impl VerificationReport {
    /// Finalize a report now; the tally is derived from `verdicts`
    pub fn new(run_id: Uuid, started_at: DateTime<Utc>, verdicts: Vec<Verdict>) -> Self {
        let tally = Tally::from_verdicts(&verdicts);
        Self {
            run_id,
            started_at,
            completed_at: Utc::now(),
            verdicts,
            tally,
        }
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    /// Whether any claim failed to get a verdict
    pub fn has_errors(&self) -> bool {
        self.tally.error > 0
    }
}

/// How a document run ended
#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// Extraction succeeded but found nothing checkable
    NoClaims,

    /// The reasoning service could not produce a claim list
    ExtractionFailed { detail: String },

    /// Every claim has a verdict (some may be degraded)
    Completed(VerificationReport),
}

impl RunOutcome {
    pub fn report(&self) -> Option<&VerificationReport> {
        match self {
            Self::Completed(report) => Some(report),
            _ => None,
        }
    }
}
