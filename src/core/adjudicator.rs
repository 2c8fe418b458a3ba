//! Verdict adjudication.
//!
//! Compares one claim against its evidence using the reasoning service and
//! validates the response against the closed status set. Insufficient
//! evidence resolves to `Inaccurate`; there is no "unknown" verdict.

use std::fmt::Write as _;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::json::{parse_json_object, StructuredOutputError};
use super::retry::RetryPolicy;
use crate::adapters::{ReasoningService, ServiceError};
use crate::domain::{Claim, EvidenceSet, Verdict, VerdictStatus};

/// Instruction for adjudication
pub const ADJUDICATION_SYSTEM_PROMPT: &str = r#"You are a strict fact-checker. You will receive a claim and numbered web search evidence.

Rules:
1. Judge the claim against the provided evidence only. Do not use prior knowledge.
2. Choose exactly one status:
   - "Verified": the evidence supports the claim.
   - "Inaccurate": the claim is outdated, slightly wrong, misleading, or the evidence is insufficient to support it.
   - "False": the evidence directly contradicts the claim.
3. If the evidence does not clearly support or contradict the claim, the status is "Inaccurate". Never answer "Unverified", "Uncertain", or any other label.
4. Give a one to two sentence reason.
5. Cite the single evidence URL that best supports your verdict. Only use URLs from the evidence.

Respond with only a JSON object of the form
{"claim": "...", "status": "Verified" | "Inaccurate" | "False", "reason": "...", "source_url": "..."}"#;

#[derive(Debug, Deserialize)]
struct RawVerdict {
    #[serde(default)]
    claim: Option<String>,
    status: String,
    #[serde(default)]
    reason: String,
    #[serde(default)]
    source_url: String,
}

/// Render the user prompt: the claim, then numbered evidence blocks
pub fn render_prompt(claim: &Claim, evidence: &EvidenceSet) -> String {
    let mut prompt = format!("Claim: {}\n\nEvidence:\n", claim);

    for (idx, item) in evidence.iter().enumerate() {
        let _ = writeln!(prompt, "[{}] URL: {}", idx + 1, item.url);
        if let Some(title) = &item.title {
            let _ = writeln!(prompt, "Title: {}", title);
        }
        let _ = writeln!(prompt, "Content: {}\n", item.snippet);
    }

    prompt
}

/// Parse and validate an adjudication response.
///
/// The returned verdict always carries the original claim text. A cited URL
/// that is not part of the evidence is replaced by the top evidence URL.
pub fn parse_verdict(
    raw: &str,
    claim: &Claim,
    evidence: &EvidenceSet,
) -> Result<Verdict, StructuredOutputError> {
    let parsed: RawVerdict = parse_json_object(raw)?;

    let status = VerdictStatus::from_adjudication_label(&parsed.status).ok_or_else(|| {
        StructuredOutputError::Invalid(format!("status {:?} is not an adjudication label", parsed.status))
    })?;

    let reason = parsed.reason.trim();
    if reason.is_empty() {
        return Err(StructuredOutputError::Invalid("missing reason".to_string()));
    }

    if let Some(echoed) = parsed.claim.as_deref() {
        if echoed.trim() != claim.as_str() {
            debug!(echoed, "Response restated the claim; keeping the original");
        }
    }

    let cited = parsed.source_url.trim();
    let source_url = if evidence.contains_url(cited) {
        cited.to_string()
    } else {
        let fallback = evidence.top_url().unwrap_or_default().to_string();
        warn!(cited, fallback = %fallback, "Cited URL is not in the evidence");
        fallback
    };

    Ok(Verdict::new(claim.as_str(), status, reason, source_url))
}

#[derive(Debug, thiserror::Error)]
enum AttemptError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("unusable verdict: {0}")]
    Output(#[from] StructuredOutputError),
}

/// Verdict adjudicator backed by a reasoning service
pub struct VerdictAdjudicator {
    reasoning: Arc<dyn ReasoningService>,
    retry: RetryPolicy,
}

impl VerdictAdjudicator {
    pub fn new(reasoning: Arc<dyn ReasoningService>, retry: RetryPolicy) -> Self {
        Self { reasoning, retry }
    }

    /// Adjudicate `claim` against `evidence`.
    ///
    /// Empty evidence resolves to `Inaccurate` without a service call. A
    /// failure after retries yields an `Error` verdict.
    #[instrument(skip(self, claim, evidence), fields(evidence = evidence.len()))]
    pub async fn adjudicate(&self, claim: &Claim, evidence: &EvidenceSet) -> Verdict {
        if evidence.is_empty() {
            debug!("No evidence; skipping adjudication");
            return Verdict::no_evidence(claim.as_str());
        }

        let user = render_prompt(claim, evidence);
        let user = user.as_str();
        let reasoning = self.reasoning.as_ref();

        let result = self
            .retry
            .run("adjudicate", move |_| async move {
                let completion = reasoning.complete(ADJUDICATION_SYSTEM_PROMPT, user).await?;
                Ok::<_, AttemptError>(parse_verdict(&completion.content, claim, evidence)?)
            })
            .await;

        match result {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(error = %e, "Adjudication failed");
                Verdict::error(claim.as_str(), e.to_string())
            }
        }
    }
}
