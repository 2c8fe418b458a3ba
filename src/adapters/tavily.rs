//! Tavily web-search adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{truncate_body, SearchHit, SearchService, ServiceError};
use crate::config::SearchSettings;

const SERVICE: &str = "tavily";

/// Search service backed by the Tavily search API
pub struct TavilySearch {
    api_key: String,
    settings: SearchSettings,
    timeout: Duration,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: &'a str,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<TavilyResult>,
}

#[derive(Debug, Deserialize)]
struct TavilyResult {
    title: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
    score: Option<f64>,
}

impl From<TavilyResult> for SearchHit {
    fn from(r: TavilyResult) -> Self {
        Self {
            title: r.title.filter(|t| !t.trim().is_empty()),
            url: r.url,
            content: r.content,
            score: r.score,
        }
    }
}

impl TavilySearch {
    pub fn new(
        api_key: impl Into<String>,
        settings: SearchSettings,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ServiceError::MissingApiKey {
                service: SERVICE.to_string(),
            });
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::transport(SERVICE, e.to_string()))?;

        Ok(Self {
            api_key,
            settings,
            timeout,
            client,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.settings.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl SearchService for TavilySearch {
    fn name(&self) -> &str {
        SERVICE
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ServiceError> {
        let request = SearchRequest {
            api_key: &self.api_key,
            query,
            max_results,
            search_depth: &self.settings.search_depth,
        };

        debug!(max_results, "Calling search service");

        let timeout_seconds = self.timeout.as_secs();
        let response = self
            .client
            .post(self.search_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e, timeout_seconds))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Http {
                service: SERVICE.to_string(),
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e, timeout_seconds))?;

        Ok(parsed
            .results
            .into_iter()
            .take(max_results)
            .map(SearchHit::from)
            .collect())
    }
}
