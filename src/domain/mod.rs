//! Domain types for the fact-checking pipeline.
//!
//! This module contains the core data structures:
//! - Document / ExtractedText: pipeline input
//! - Claim / ClaimList / ClaimExtraction: extraction output
//! - EvidenceSet: per-claim search results
//! - Verdict / VerificationReport: adjudication output
//! - ProgressEvent: run milestones

pub mod claim;
pub mod document;
pub mod evidence;
pub mod progress;
pub mod report;
pub mod verdict;

// Re-export commonly used types
pub use claim::{Claim, ClaimExtraction, ClaimList, ClaimRejected, EXTRACTION_FAILURE_MARKER};
pub use document::{Document, ExtractedText, ReadSeek, READ_ERROR_PREFIX};
pub use evidence::{EvidenceItem, EvidenceSet};
pub use progress::{NoProgress, ProgressEvent, ProgressObserver};
pub use report::{RunOutcome, Tally, VerificationReport};
pub use verdict::{Verdict, VerdictStatus, NO_SOURCE};
