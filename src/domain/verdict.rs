//! Verdicts: the adjudicated outcome for one claim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source placeholder when no search was possible
pub const NO_SOURCE: &str = "N/A";

/// Verdict status.
///
/// `Verified`, `Inaccurate` and `False` form the closed adjudication set.
/// `Error` only signals a local failure to produce a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerdictStatus {
    /// The claim matches the evidence
    Verified,

    /// Outdated, slightly wrong, misleading, or not supported by the evidence
    Inaccurate,

    /// Directly contradicted by the evidence
    False,

    /// No verdict could be produced
    Error,
}

impl VerdictStatus {
    /// Labels an adjudication may produce
    pub const ADJUDICATED: [VerdictStatus; 3] = [Self::Verified, Self::Inaccurate, Self::False];

    /// Every status a report may contain
    pub const ALL: [VerdictStatus; 4] = [Self::Verified, Self::Inaccurate, Self::False, Self::Error];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "Verified",
            Self::Inaccurate => "Inaccurate",
            Self::False => "False",
            Self::Error => "Error",
        }
    }

    pub fn is_adjudicated(&self) -> bool {
        !matches!(self, Self::Error)
    }

    /// Map a model-produced label onto the closed set.
    ///
    /// "Don't know" style labels collapse to `Inaccurate`. Anything else,
    /// including "Error", is not an adjudication and yields `None`.
    pub fn from_adjudication_label(label: &str) -> Option<Self> {
        let normalized = label
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '.')
            .to_ascii_lowercase()
            .replace(['_', '-'], " ");

        match normalized.as_str() {
            "verified" | "true" | "accurate" | "correct" => Some(Self::Verified),
            "inaccurate" | "misleading" | "partially true" | "outdated" => Some(Self::Inaccurate),
            "unverified" | "uncertain" | "unknown" | "insufficient evidence"
            | "not enough evidence" | "unverifiable" => Some(Self::Inaccurate),
            "false" | "incorrect" | "contradicted" => Some(Self::False),
            _ => None,
        }
    }
}

impl fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verdict for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// The claim text as extracted
    pub claim: String,

    /// Adjudicated status
    pub status: VerdictStatus,

    /// One-to-two-sentence rationale
    pub reason: String,

    /// Evidence URL that best supports the verdict ("" or "N/A" when none)
    pub source_url: String,
}

impl Verdict {
    pub fn new(
        claim: impl Into<String>,
        status: VerdictStatus,
        reason: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            claim: claim.into(),
            status,
            reason: reason.into(),
            source_url: source_url.into(),
        }
    }

    /// Local failure to adjudicate
    pub fn error(claim: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(claim, VerdictStatus::Error, detail, "")
    }

    /// Searched, but nothing came back
    pub fn no_evidence(claim: impl Into<String>) -> Self {
        Self::new(
            claim,
            VerdictStatus::Inaccurate,
            "No evidence was found to support this claim.",
            "",
        )
    }

    /// Search itself failed
    pub fn search_failed(claim: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::new(
            claim,
            VerdictStatus::Inaccurate,
            format!("Could not search for evidence: {}", detail),
            NO_SOURCE,
        )
    }

    pub fn has_source(&self) -> bool {
        !self.source_url.is_empty() && self.source_url != NO_SOURCE
    }
}
