//! Scripted in-process services.
//!
//! Used by the test suite and for offline dry runs. Both mocks record every
//! call so tests can assert on what the pipeline sent and how often.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{Completion, ReasoningService, SearchHit, SearchService, ServiceError};

type ReasoningFn = dyn Fn(&str, &str) -> Result<String, ServiceError> + Send + Sync;
type SearchFn = dyn Fn(&str) -> Result<Vec<SearchHit>, ServiceError> + Send + Sync;

enum ReasoningScript {
    /// Responses handed out in order; an exhausted queue is a transport error
    Queue(Mutex<VecDeque<Result<String, ServiceError>>>),
    /// Response computed from the (system, user) prompt pair
    Rule(Box<ReasoningFn>),
}

/// Reasoning service returning scripted responses
pub struct MockReasoning {
    script: ReasoningScript,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockReasoning {
    /// Responses returned in order, one per call
    pub fn scripted<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<S, ServiceError>>,
        S: Into<String>,
    {
        let queue = responses.into_iter().map(|r| r.map(Into::into)).collect();
        Self {
            script: ReasoningScript::Queue(Mutex::new(queue)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The same successful response for every call
    pub fn always(response: impl Into<String>) -> Self {
        let response = response.into();
        Self::from_fn(move |_, _| Ok(response.clone()))
    }

    /// Every call fails with `error`
    pub fn failing(error: ServiceError) -> Self {
        Self::from_fn(move |_, _| Err(error.clone()))
    }

    /// Compute each response from the prompts
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str, &str) -> Result<String, ServiceError> + Send + Sync + 'static,
    {
        Self {
            script: ReasoningScript::Rule(Box::new(f)),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Number of calls received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// User prompts received so far, in call order
    pub fn user_prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|c| c.iter().map(|(_, user)| user.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReasoningService for MockReasoning {
    fn name(&self) -> &str {
        "mock-reasoning"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<Completion, ServiceError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((system.to_string(), user.to_string()));
        }

        let result = match &self.script {
            ReasoningScript::Queue(queue) => queue
                .lock()
                .ok()
                .and_then(|mut q| q.pop_front())
                .unwrap_or_else(|| {
                    Err(ServiceError::transport(self.name(), "mock script exhausted"))
                }),
            ReasoningScript::Rule(f) => f(system, user),
        };

        result.map(Completion::new)
    }
}

/// Search service returning scripted results
pub struct MockSearch {
    rule: Box<SearchFn>,
    queries: Mutex<Vec<String>>,
}

impl MockSearch {
    /// The same hits for every query
    pub fn with_results(hits: Vec<SearchHit>) -> Self {
        Self::from_fn(move |_| Ok(hits.clone()))
    }

    /// No hits for any query
    pub fn empty() -> Self {
        Self::with_results(Vec::new())
    }

    /// Every query fails with `error`
    pub fn failing(error: ServiceError) -> Self {
        Self::from_fn(move |_| Err(error.clone()))
    }

    /// Compute hits from the query text
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<Vec<SearchHit>, ServiceError> + Send + Sync + 'static,
    {
        Self {
            rule: Box::new(f),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().map(|q| q.len()).unwrap_or(0)
    }

    /// Queries received so far, in call order
    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchService for MockSearch {
    fn name(&self) -> &str {
        "mock-search"
    }

    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchHit>, ServiceError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_string());
        }

        (self.rule)(query).map(|mut hits| {
            hits.truncate(max_results);
            hits
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_queue_in_order() {
        let mock = MockReasoning::scripted([Ok("first"), Ok("second")]);

        assert_eq!(mock.complete("s", "a").await.unwrap().content, "first");
        assert_eq!(mock.complete("s", "b").await.unwrap().content, "second");
        assert!(mock.complete("s", "c").await.is_err());
        assert_eq!(mock.call_count(), 3);
        assert_eq!(mock.user_prompts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_search_truncates_to_max_results() {
        let hits = (0..5)
            .map(|i| SearchHit::new(format!("https://example.com/{}", i), "snippet"))
            .collect();
        let mock = MockSearch::with_results(hits);

        let results = mock.search("query", 3).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(mock.queries(), vec!["query"]);
    }
}
