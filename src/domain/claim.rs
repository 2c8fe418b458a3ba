//! Claims and the claim-extraction outcome.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display prefix for a failed extraction, kept for callers that still
/// consume the flat list-of-strings shape
pub const EXTRACTION_FAILURE_MARKER: &str = "Error extracting claims: ";

/// A standalone, checkable factual sentence.
///
/// Construct through [`Claim::parse`], which rejects fragments that cannot
/// be evaluated without the source document (a lone figure, a two-word
/// phrase).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Claim(String);

impl Claim {
    /// Minimum word count for a sentence to carry its own context
    pub const MIN_WORDS: usize = 4;

    /// Validate and normalize a candidate claim sentence
    pub fn parse(raw: &str) -> Result<Self, ClaimRejected> {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

        if text.is_empty() {
            return Err(ClaimRejected::Empty);
        }

        if !text.chars().any(char::is_alphabetic) {
            return Err(ClaimRejected::NoWords(text));
        }

        let words = text
            .split(' ')
            .filter(|w| w.chars().any(char::is_alphanumeric))
            .count();
        if words < Self::MIN_WORDS {
            return Err(ClaimRejected::Fragment(text));
        }

        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Claim {
    type Error = ClaimRejected;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Claim> for String {
    fn from(claim: Claim) -> Self {
        claim.0
    }
}

/// Why a candidate sentence is not a claim
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimRejected {
    #[error("claim is empty")]
    Empty,

    #[error("claim has no words: {0:?}")]
    NoWords(String),

    #[error("fragment cannot stand alone as a claim: {0:?}")]
    Fragment(String),
}

/// Ordered claims extracted from one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimList {
    claims: Vec<Claim>,
}

impl ClaimList {
    pub fn new(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Keep only the first `max` claims
    pub fn capped(mut self, max: usize) -> Self {
        self.claims.truncate(max);
        self
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Claim> {
        self.claims.iter()
    }

    pub fn as_slice(&self) -> &[Claim] {
        &self.claims
    }
}

impl FromIterator<Claim> for ClaimList {
    fn from_iter<T: IntoIterator<Item = Claim>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ClaimList {
    type Item = &'a Claim;
    type IntoIter = std::slice::Iter<'a, Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.iter()
    }
}

impl IntoIterator for ClaimList {
    type Item = Claim;
    type IntoIter = std::vec::IntoIter<Claim>;

    fn into_iter(self) -> Self::IntoIter {
        self.claims.into_iter()
    }
}

/// Outcome of claim extraction.
///
/// Keeps "no claims found" (an empty list) apart from "extraction failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimExtraction {
    /// The service answered; the list may be empty
    Claims(ClaimList),

    /// The service was unreachable or its output was unusable
    Failed { detail: String },
}

impl ClaimExtraction {
    pub fn failed(detail: impl Into<String>) -> Self {
        Self::Failed {
            detail: detail.into(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn claims(&self) -> Option<&ClaimList> {
        match self {
            Self::Claims(list) => Some(list),
            Self::Failed { .. } => None,
        }
    }

    /// Flat list-of-strings form: the claims, or one marker-prefixed entry
    pub fn to_legacy_list(&self) -> Vec<String> {
        match self {
            Self::Claims(list) => list.iter().map(|c| c.as_str().to_string()).collect(),
            Self::Failed { .. } => vec![self.to_string()],
        }
    }
}

impl fmt::Display for ClaimExtraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Claims(list) => write!(f, "{} claim(s)", list.len()),
            Self::Failed { detail } => write!(f, "{}{}", EXTRACTION_FAILURE_MARKER, detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_sentence() {
        let claim = Claim::parse("  Company X revenue grew\n 12% in 2023. ").unwrap();
        assert_eq!(claim.as_str(), "Company X revenue grew 12% in 2023.");
    }

    #[test]
    fn test_parse_rejects_fragments() {
        assert_eq!(Claim::parse("   "), Err(ClaimRejected::Empty));
        assert!(matches!(Claim::parse("12%"), Err(ClaimRejected::NoWords(_))));
        assert!(matches!(
            Claim::parse("revenue 12%"),
            Err(ClaimRejected::Fragment(_))
        ));
        // Punctuation-only tokens don't count as words
        assert!(matches!(
            Claim::parse("up 12% - !"),
            Err(ClaimRejected::Fragment(_))
        ));
    }

    #[test]
    fn test_claim_serde_validates() {
        let ok: Claim = serde_json::from_str("\"The product launched in March 2022.\"").unwrap();
        assert_eq!(ok.as_str(), "The product launched in March 2022.");

        let bad: Result<Claim, _> = serde_json::from_str("\"42%\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_claim_list_capped() {
        let list: ClaimList = (0..12)
            .map(|i| Claim::parse(&format!("Fact number {} was recorded in 2020.", i)).unwrap())
            .collect();
        let capped = list.capped(10);
        assert_eq!(capped.len(), 10);
        assert!(capped.as_slice()[9].as_str().contains("number 9"));
    }

    #[test]
    fn test_failed_extraction_display_carries_marker() {
        let outcome = ClaimExtraction::failed("connection refused");
        assert!(outcome.is_failed());
        assert!(outcome.claims().is_none());

        let legacy = outcome.to_legacy_list();
        assert_eq!(legacy.len(), 1);
        assert!(legacy[0].starts_with(EXTRACTION_FAILURE_MARKER));
        assert!(legacy[0].ends_with("connection refused"));
    }

    #[test]
    fn test_empty_claims_is_not_failure() {
        let outcome = ClaimExtraction::Claims(ClaimList::empty());
        assert!(!outcome.is_failed());
        assert!(outcome.to_legacy_list().is_empty());
    }
}
