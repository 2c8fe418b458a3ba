//! Main orchestrator for document verification.
//!
//! Sequences text extraction, claim extraction, then retrieval and
//! adjudication per claim. Per-claim failures degrade to verdicts so the
//! report always has one entry per claim.

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::adapters::{
    OpenAiReasoning, ReasoningService, SearchService, ServiceError, TavilySearch,
};
use crate::config::{Credentials, Settings};
use crate::domain::{
    Claim, ClaimExtraction, ClaimList, Document, ExtractedText, ProgressEvent, ProgressObserver,
    RunOutcome, VerificationReport, Verdict,
};

use super::adjudicator::VerdictAdjudicator;
use super::claims::ClaimExtractor;
use super::limits::Limits;
use super::retrieval::{degraded_verdict, EvidenceRetriever};
use super::text::TextExtractor;

/// Main verification orchestrator
pub struct Orchestrator {
    text_extractor: TextExtractor,
    claim_extractor: ClaimExtractor,
    retriever: EvidenceRetriever,
    adjudicator: VerdictAdjudicator,
    limits: Limits,
}

impl Orchestrator {
    /// Build an orchestrator talking to the configured remote services
    pub fn new(credentials: Credentials, settings: &Settings) -> Result<Self, ServiceError> {
        let timeout = settings.limits.request_timeout();

        let reasoning = OpenAiReasoning::new(
            credentials.reasoning_api_key,
            settings.reasoning.clone(),
            timeout,
        )?;
        let search = TavilySearch::new(credentials.search_api_key, settings.search.clone(), timeout)?;

        Ok(Self::with_services(Arc::new(reasoning), Arc::new(search), settings))
    }

    /// Build an orchestrator over arbitrary service implementations
    pub fn with_services(
        reasoning: Arc<dyn ReasoningService>,
        search: Arc<dyn SearchService>,
        settings: &Settings,
    ) -> Self {
        let limits = settings.limits.clone();
        let retry = settings.retry.clone();

        Self {
            text_extractor: TextExtractor::new().with_timeout(limits.request_timeout()),
            claim_extractor: ClaimExtractor::new(reasoning.clone(), &limits, retry.clone()),
            retriever: EvidenceRetriever::new(search, &limits, retry.clone()),
            adjudicator: VerdictAdjudicator::new(reasoning, retry),
            limits,
        }
    }

    /// Replace the text extractor (e.g. a custom `pdftotext` path)
    pub fn with_text_extractor(mut self, text_extractor: TextExtractor) -> Self {
        self.text_extractor = text_extractor;
        self
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Check one document end to end
    #[instrument(skip(self, document, progress))]
    pub async fn run(&self, document: Document, progress: &dyn ProgressObserver) -> RunOutcome {
        let text = self.extract_text(document, progress).await;
        self.verify_text(&text, progress).await
    }

    /// Extract text, reporting size and any read error
    pub async fn extract_text(
        &self,
        document: Document,
        progress: &dyn ProgressObserver,
    ) -> ExtractedText {
        let text = self.text_extractor.extract(document).await;
        let chars = text.char_count();

        progress.on_event(&ProgressEvent::TextExtracted {
            chars,
            truncated: chars > self.limits.max_text_chars,
            read_error: text.is_read_error().then(|| text.as_str().to_string()),
        });

        text
    }

    /// Extract claims without verifying them
    pub async fn extract_claims(&self, text: &ExtractedText) -> ClaimExtraction {
        self.claim_extractor.extract(text).await
    }

    /// Extract claims from `text` and verify each
    #[instrument(skip(self, text, progress))]
    pub async fn verify_text(
        &self,
        text: &ExtractedText,
        progress: &dyn ProgressObserver,
    ) -> RunOutcome {
        let claims = match self.extract_claims(text).await {
            ClaimExtraction::Failed { detail } => {
                warn!(%detail, "Stopping: claim extraction failed");
                progress.on_event(&ProgressEvent::ExtractionFailed {
                    detail: detail.clone(),
                });
                return RunOutcome::ExtractionFailed { detail };
            }
            ClaimExtraction::Claims(claims) => claims,
        };

        progress.on_event(&ProgressEvent::ClaimsExtracted {
            count: claims.len(),
        });

        if claims.is_empty() {
            info!("No claims found");
            return RunOutcome::NoClaims;
        }

        RunOutcome::Completed(self.verify_claims(&claims, progress).await)
    }

    /// Verify every claim, one verdict per claim in claim order.
    ///
    /// At most `max_concurrent_claims` claims are in flight; results are
    /// reported in claim order regardless of completion order.
    pub async fn verify_claims(
        &self,
        claims: &ClaimList,
        progress: &dyn ProgressObserver,
    ) -> VerificationReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let total = claims.len();
        let concurrency = self.limits.max_concurrent_claims.max(1);

        info!(%run_id, total, concurrency, "Verifying claims");

        let mut verdicts = Vec::with_capacity(total);
        let mut pending = stream::iter(claims.iter())
            .map(|claim| self.verify_claim(claim))
            .buffered(concurrency);

        while let Some(verdict) = pending.next().await {
            progress.on_event(&ProgressEvent::ClaimVerified {
                completed: verdicts.len() + 1,
                total,
                status: verdict.status,
            });
            verdicts.push(verdict);
        }

        let report = VerificationReport::new(run_id, started_at, verdicts);
        info!(
            %run_id,
            verified = report.tally.verified,
            inaccurate = report.tally.inaccurate,
            false_ = report.tally.false_,
            error = report.tally.error,
            "Verification complete"
        );
        report
    }

    /// Retrieve evidence and adjudicate one claim. Never fails.
    #[instrument(skip(self, claim), fields(claim = %claim))]
    pub async fn verify_claim(&self, claim: &Claim) -> Verdict {
        match self.retriever.retrieve(claim).await {
            Ok(evidence) => self.adjudicator.adjudicate(claim, &evidence).await,
            Err(e) => {
                warn!(error = %e, "Search failed; recording degraded verdict");
                degraded_verdict(claim, &e)
            }
        }
    }
}
