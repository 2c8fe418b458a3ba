//! Cost and size limits for a document run.
//!
//! Bounds the work sent to external services:
//! - Text prefix length sent for claim extraction
//! - Number of claims checked per document
//! - Search results per claim
//! - Per-request timeout
//! - Claims in flight at once

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Limits for one orchestrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Characters of extracted text sent for claim extraction (default: 50,000)
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,

    /// Maximum claims checked per document (default: 10)
    #[serde(default = "default_max_claims")]
    pub max_claims: usize,

    /// Search results used as evidence per claim (default: 3)
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    /// Timeout for each external request in seconds (default: 120)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,

    /// Claims verified concurrently (default: 1, strictly sequential)
    #[serde(default = "default_max_concurrent_claims")]
    pub max_concurrent_claims: usize,
}

fn default_max_text_chars() -> usize {
    50_000
}
fn default_max_claims() -> usize {
    10
}
fn default_max_search_results() -> usize {
    3
}
fn default_request_timeout() -> u64 {
    120
}
fn default_max_concurrent_claims() -> usize {
    1
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
            max_claims: default_max_claims(),
            max_search_results: default_max_search_results(),
            request_timeout_seconds: default_request_timeout(),
            max_concurrent_claims: default_max_concurrent_claims(),
        }
    }
}

impl Limits {
    /// Reject limits that would make every run a no-op
    pub fn validate(&self) -> Result<(), LimitsViolation> {
        let checks = [
            ("max_text_chars", self.max_text_chars as u64),
            ("max_claims", self.max_claims as u64),
            ("max_search_results", self.max_search_results as u64),
            ("request_timeout_seconds", self.request_timeout_seconds),
            ("max_concurrent_claims", self.max_concurrent_claims as u64),
        ];

        for (name, value) in checks {
            if value == 0 {
                return Err(LimitsViolation::Zero { name });
            }
        }

        if self.max_concurrent_claims > self.max_claims {
            return Err(LimitsViolation::ConcurrencyExceedsClaims {
                concurrency: self.max_concurrent_claims,
                max_claims: self.max_claims,
            });
        }

        Ok(())
    }

    /// Longest prefix of `text` within `max_text_chars` characters
    pub fn truncate_text<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.max_text_chars) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Invalid limit configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitsViolation {
    #[error("Limit '{name}' must be greater than zero")]
    Zero { name: &'static str },

    #[error("max_concurrent_claims ({concurrency}) exceeds max_claims ({max_claims})")]
    ConcurrencyExceedsClaims {
        concurrency: usize,
        max_claims: usize,
    },
}
