//! Core verification logic.
//!
//! This module contains:
//! - TextExtractor: document to plain text
//! - ClaimExtractor: text to a bounded claim list
//! - EvidenceRetriever: one web search per claim
//! - VerdictAdjudicator: claim + evidence to a verdict
//! - Orchestrator: sequences the stages and aggregates the report

pub mod adjudicator;
pub mod claims;
pub mod json;
pub mod limits;
pub mod orchestrator;
pub mod retrieval;
pub mod retry;
pub mod text;

// Re-export commonly used types
pub use adjudicator::VerdictAdjudicator;
pub use claims::{normalize_whitespace, ClaimExtractor};
pub use json::StructuredOutputError;
pub use limits::{Limits, LimitsViolation};
pub use orchestrator::Orchestrator;
pub use retrieval::EvidenceRetriever;
pub use retry::RetryPolicy;
pub use text::{TextExtractionError, TextExtractor};
