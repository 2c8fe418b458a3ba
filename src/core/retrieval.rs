//! Evidence retrieval: one web search per claim.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::claims::normalize_whitespace;
use super::limits::Limits;
use super::retry::RetryPolicy;
use crate::adapters::{SearchHit, SearchService, ServiceError};
use crate::domain::{Claim, EvidenceItem, EvidenceSet, Verdict};

/// Evidence retriever backed by a search service
pub struct EvidenceRetriever {
    search: Arc<dyn SearchService>,
    max_results: usize,
    retry: RetryPolicy,
}

impl EvidenceRetriever {
    pub fn new(search: Arc<dyn SearchService>, limits: &Limits, retry: RetryPolicy) -> Self {
        Self {
            search,
            max_results: limits.max_search_results,
            retry,
        }
    }

    /// Search for evidence about `claim`.
    ///
    /// Hits with neither a URL nor a snippet are dropped and the rest are
    /// capped, keeping the service's ranking.
    #[instrument(skip(self), fields(service = self.search.name()))]
    pub async fn retrieve(&self, claim: &Claim) -> Result<EvidenceSet, ServiceError> {
        let search = self.search.as_ref();
        let query = claim.as_str();
        let max_results = self.max_results;

        let hits = self
            .retry
            .run("search", move |_| search.search(query, max_results))
            .await?;

        let items: Vec<EvidenceItem> = hits
            .into_iter()
            .filter_map(to_evidence)
            .take(self.max_results)
            .collect();

        debug!(count = items.len(), "Evidence retrieved");
        Ok(EvidenceSet::new(items))
    }
}

fn to_evidence(hit: SearchHit) -> Option<EvidenceItem> {
    let snippet = normalize_whitespace(&hit.content);
    let url = hit.url.trim().to_string();
    if snippet.is_empty() && url.is_empty() {
        return None;
    }

    Some(EvidenceItem {
        snippet,
        url,
        title: hit.title,
        score: hit.score,
    })
}

/// Verdict standing in for a claim whose search failed
pub fn degraded_verdict(claim: &Claim, error: &ServiceError) -> Verdict {
    Verdict::search_failed(claim.as_str(), error)
}
