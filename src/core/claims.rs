//! Claim extraction.
//!
//! Turns extracted document text into a bounded list of standalone,
//! checkable claim sentences using the reasoning service.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use super::json::{parse_json_object, StructuredOutputError};
use super::limits::Limits;
use super::retry::RetryPolicy;
use crate::adapters::{ReasoningService, ServiceError};
use crate::domain::{Claim, ClaimExtraction, ClaimList, ExtractedText};

/// Instruction for claim extraction. `{max_claims}` is interpolated.
pub const EXTRACTION_SYSTEM_PROMPT: &str = r#"You are an expert fact-checker. Identify specific, verifiable claims in the text the user provides.

Focus on:
- Statistics (numbers, percentages, financial figures)
- Dates and times
- Specific technical specifications
- Definitive historical or event-based statements

Rules:
- Ignore opinions, general descriptions, predictions, and subjective statements.
- Every claim must be a complete, standalone sentence that can be checked without the source document. Resolve pronouns and add the subject, time, and place the text implies. Never return a bare figure or fragment such as "12%".
- Return at most {max_claims} claims, choosing the most verifiable and critical ones.
- Return an empty list if the text contains no verifiable claims.

Respond with only a JSON object of the form {"claims": ["...", "..."]}."#;

#[derive(Debug, Deserialize)]
struct ClaimsResponse {
    claims: Vec<String>,
}

/// Collapse runs of whitespace to single spaces and trim
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse and validate a raw claims response.
///
/// Entries failing the claim invariant are dropped; the rest are capped at
/// `max_claims` in response order.
pub fn parse_claims(raw: &str, max_claims: usize) -> Result<ClaimList, StructuredOutputError> {
    let response: ClaimsResponse = parse_json_object(raw)?;

    let claims: ClaimList = response
        .claims
        .iter()
        .filter_map(|candidate| match Claim::parse(candidate) {
            Ok(claim) => Some(claim),
            Err(rejected) => {
                debug!(reason = %rejected, "Dropping candidate claim");
                None
            }
        })
        .collect();

    Ok(claims.capped(max_claims))
}

/// Why one extraction attempt failed
#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("unusable response: {0}")]
    Output(#[from] StructuredOutputError),
}

/// Claim extractor backed by a reasoning service
pub struct ClaimExtractor {
    reasoning: Arc<dyn ReasoningService>,
    max_text_chars: usize,
    max_claims: usize,
    retry: RetryPolicy,
}

impl ClaimExtractor {
    pub fn new(reasoning: Arc<dyn ReasoningService>, limits: &Limits, retry: RetryPolicy) -> Self {
        Self {
            reasoning,
            max_text_chars: limits.max_text_chars,
            max_claims: limits.max_claims,
            retry,
        }
    }

    /// Truncate then normalize, as sent to the service
    pub fn prepare_text(&self, text: &str) -> String {
        let limits = Limits {
            max_text_chars: self.max_text_chars,
            ..Default::default()
        };
        normalize_whitespace(limits.truncate_text(text))
    }

    fn system_prompt(&self) -> String {
        EXTRACTION_SYSTEM_PROMPT.replace("{max_claims}", &self.max_claims.to_string())
    }

    /// Extract claims. Never fails outright: service or parse failures come
    /// back as [`ClaimExtraction::Failed`].
    #[instrument(skip(self, text), fields(chars = text.char_count()))]
    pub async fn extract(&self, text: &ExtractedText) -> ClaimExtraction {
        let prepared = self.prepare_text(text.as_str());
        if prepared.is_empty() {
            info!("No text to extract claims from");
            return ClaimExtraction::Claims(ClaimList::empty());
        }

        let system = self.system_prompt();
        let user = format!("Text:\n{}", prepared);
        let (system, user) = (system.as_str(), user.as_str());
        let reasoning = self.reasoning.as_ref();
        let max_claims = self.max_claims;

        let result = self
            .retry
            .run("extract_claims", move |_| async move {
                let completion = reasoning.complete(system, user).await?;
                let claims = parse_claims(&completion.content, max_claims)?;
                Ok::<_, AttemptError>(claims)
            })
            .await;

        match result {
            Ok(claims) => {
                info!(count = claims.len(), "Claims extracted");
                ClaimExtraction::Claims(claims)
            }
            Err(e) => {
                warn!(error = %e, "Claim extraction failed");
                ClaimExtraction::failed(e.to_string())
            }
        }
    }
}
