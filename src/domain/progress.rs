//! Progress events emitted while a document is checked.
//!
//! Events arrive in order on the orchestrator's task; `ClaimVerified`
//! carries a single advancing counter.

use serde::Serialize;

use super::verdict::VerdictStatus;

/// A milestone in a document run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// Text extraction finished
    TextExtracted {
        chars: usize,
        truncated: bool,
        /// Set when the document could not be read
        read_error: Option<String>,
    },

    /// Claim extraction produced a list
    ClaimsExtracted { count: usize },

    /// Claim extraction failed
    ExtractionFailed { detail: String },

    /// One more claim has a verdict (`completed` is 1-based)
    ClaimVerified {
        completed: usize,
        total: usize,
        status: VerdictStatus,
    },
}

impl ProgressEvent {
    /// Completed fraction in 0.0..=1.0, for claim events
    pub fn fraction(&self) -> Option<f64> {
        match self {
            Self::ClaimVerified {
                completed, total, ..
            } if *total > 0 => Some(*completed as f64 / *total as f64),
            _ => None,
        }
    }
}

/// Receives progress events
pub trait ProgressObserver: Send + Sync {
    fn on_event(&self, event: &ProgressEvent);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn on_event(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Discards all events
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_event(&self, _event: &ProgressEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_fraction() {
        let event = ProgressEvent::ClaimVerified {
            completed: 1,
            total: 4,
            status: VerdictStatus::Verified,
        };
        assert_eq!(event.fraction(), Some(0.25));
        assert_eq!(ProgressEvent::ClaimsExtracted { count: 3 }.fraction(), None);
    }

    #[test]
    fn test_closure_observer() {
        let seen = Mutex::new(Vec::new());
        let observer = |e: &ProgressEvent| seen.lock().unwrap().push(e.clone());

        observer.on_event(&ProgressEvent::ClaimsExtracted { count: 2 });
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(ProgressEvent::ClaimsExtracted { count: 2 }).unwrap();
        assert_eq!(json["type"], "claims_extracted");
        assert_eq!(json["count"], 2);
    }
}
