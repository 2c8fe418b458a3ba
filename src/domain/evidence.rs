//! Search-derived evidence for a single claim.

use serde::{Deserialize, Serialize};

/// One ranked snippet with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    /// Text snippet returned by the search service
    pub snippet: String,

    /// Source URL
    pub url: String,

    /// Page title (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Relevance score (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl EvidenceItem {
    pub fn new(snippet: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            snippet: snippet.into(),
            url: url.into(),
            title: None,
            score: None,
        }
    }
}

/// Ordered evidence for one claim, best match first. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceSet {
    items: Vec<EvidenceItem>,
}

impl EvidenceSet {
    pub fn new(items: Vec<EvidenceItem>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvidenceItem> {
        self.items.iter()
    }

    /// URL of the top-ranked item
    pub fn top_url(&self) -> Option<&str> {
        self.items
            .iter()
            .map(|i| i.url.as_str())
            .find(|u| !u.is_empty())
    }

    /// Whether `url` is one of the evidence sources (ignores a trailing slash)
    pub fn contains_url(&self, url: &str) -> bool {
        let wanted = url.trim().trim_end_matches('/');
        !wanted.is_empty()
            && self
                .items
                .iter()
                .any(|i| i.url.trim().trim_end_matches('/') == wanted)
    }
}
