//! claimcheck - Document fact checker
//!
//! Extracts verifiable factual claims from a PDF and checks each one
//! against live web evidence, producing a verdict, a rationale and a
//! supporting source per claim.
//!
//! # Architecture
//!
//! The pipeline runs in stages:
//! - Text extraction (once per document)
//! - Claim extraction via a reasoning service (once per document)
//! - Evidence retrieval via a search service (per claim)
//! - Verdict adjudication via the reasoning service (per claim)
//!
//! Failures degrade instead of aborting: an unreadable document becomes
//! text describing the error, and a failed search or adjudication becomes
//! a verdict, so a report always holds one verdict per claim.
//!
//! # Modules
//!
//! - `adapters`: External services (OpenAI-compatible chat, Tavily search, mocks)
//! - `core`: Pipeline stages and the orchestrator
//! - `domain`: Data structures (Claim, Verdict, VerificationReport)
//! - `config`: Settings discovery and loading
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Check a document
//! claimcheck check report.pdf
//!
//! # Check a document read from stdin, as JSON
//! cat report.pdf | claimcheck check --stdin --json
//!
//! # List the claims only
//! claimcheck claims report.pdf
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;

// Re-export main types at crate root for convenience
pub use config::{Credentials, Settings};
pub use core::Orchestrator;
pub use domain::{Claim, ClaimList, Document, RunOutcome, Verdict, VerdictStatus, VerificationReport};
