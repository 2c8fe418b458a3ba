//! Adapter interfaces for external services.
//!
//! The pipeline talks to two remote collaborators: a reasoning service
//! (chat-completion LLM) and a web-search service. Both sit behind a trait
//! so the orchestrator can be driven by the HTTP clients in production and
//! by the scripted services in [`mock`] under test.

pub mod mock;
pub mod openai;
pub mod tavily;

use async_trait::async_trait;
use thiserror::Error;

pub use mock::{MockReasoning, MockSearch};
pub use openai::OpenAiReasoning;
pub use tavily::TavilySearch;

/// Output from a reasoning service call
#[derive(Debug, Clone)]
pub struct Completion {
    /// The raw text returned by the model
    pub content: String,

    /// Tokens used (if reported)
    pub tokens_used: Option<u64>,
}

impl Completion {
    /// Create a completion with just content
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tokens_used: None,
        }
    }
}

/// A single web-search result record
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Page title (if the service reports one)
    pub title: Option<String>,

    /// Source URL
    pub url: String,

    /// Text snippet relevant to the query
    pub content: String,

    /// Relevance score (if the service reports one)
    pub score: Option<f64>,
}

impl SearchHit {
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: None,
            url: url.into(),
            content: content.into(),
            score: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Language-reasoning service (claim extraction and adjudication)
#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Human-readable service name
    fn name(&self) -> &str;

    /// Run one instruction + data exchange and return the raw model text
    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ServiceError>;
}

/// Web-search service (evidence retrieval)
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Human-readable service name
    fn name(&self) -> &str;

    /// Search for `query`, returning at most `max_results` ranked hits
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchHit>, ServiceError>;
}

/// Failures talking to an external service
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("Missing API key for {service}")]
    MissingApiKey { service: String },

    #[error("{service} request failed: {message}")]
    Transport { service: String, message: String },

    #[error("{service} request timed out after {seconds}s")]
    Timeout { service: String, seconds: u64 },

    #[error("{service} returned HTTP {status}: {body}")]
    Http {
        service: String,
        status: u16,
        body: String,
    },

    #[error("{service} response could not be decoded: {message}")]
    Decode { service: String, message: String },

    #[error("{service} returned an empty response")]
    EmptyResponse { service: String },
}

impl ServiceError {
    pub fn transport(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Map a reqwest failure onto the taxonomy, keeping timeouts distinct
    pub(crate) fn from_reqwest(service: &str, err: reqwest::Error, timeout_seconds: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                service: service.to_string(),
                seconds: timeout_seconds,
            }
        } else if err.is_decode() {
            Self::Decode {
                service: service.to_string(),
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                service: service.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Keep error bodies short enough for log lines and verdict reasons
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX_BODY_CHARS: usize = 500;
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_CHARS) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
