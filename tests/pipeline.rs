//! Pipeline Integration Tests
//!
//! End-to-end orchestrator behavior against scripted services: one verdict
//! per claim, failure containment, halting paths and progress reporting.

use std::sync::{Arc, Mutex};

use claimcheck::adapters::{MockReasoning, MockSearch, SearchHit, ServiceError};
use claimcheck::config::Settings;
use claimcheck::core::{Limits, Orchestrator, RetryPolicy};
use claimcheck::domain::{
    Claim, ClaimList, Document, ExtractedText, NoProgress, ProgressEvent, RunOutcome,
    VerdictStatus, NO_SOURCE, READ_ERROR_PREFIX,
};

fn settings() -> Settings {
    Settings {
        retry: RetryPolicy {
            initial_delay_ms: 0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn claims(n: usize) -> ClaimList {
    (0..n)
        .map(|i| Claim::parse(&format!("Plant {} produced 400 tonnes of steel in 2021.", i)).unwrap())
        .collect()
}

fn hits() -> Vec<SearchHit> {
    vec![
        SearchHit::new("https://steel.example.com/2021", "Output reached 400 tonnes in 2021."),
        SearchHit::new("https://news.example.org/plants", "Several plants expanded."),
    ]
}

fn verdict_json(status: &str) -> String {
    format!(
        r#"{{"status": "{}", "reason": "Compared with the 2021 figures.", "source_url": "https://steel.example.com/2021"}}"#,
        status
    )
}

/// Extraction requests start with "Text:", adjudication requests with "Claim:"
fn reasoning(claims_json: &'static str, status: &'static str) -> MockReasoning {
    MockReasoning::from_fn(move |_, user| {
        if user.starts_with("Text:") {
            Ok(claims_json.to_string())
        } else {
            Ok(verdict_json(status))
        }
    })
}

#[tokio::test]
async fn test_report_length_matches_claim_count() {
    for n in [0, 1, 10] {
        let orchestrator = Orchestrator::with_services(
            Arc::new(reasoning(r#"{"claims": []}"#, "Verified")),
            Arc::new(MockSearch::with_results(hits())),
            &settings(),
        );

        let report = orchestrator.verify_claims(&claims(n), &NoProgress).await;
        assert_eq!(report.len(), n);
        assert_eq!(report.tally.total(), n);
    }
}

#[tokio::test]
async fn test_zero_claims_halts_before_search() {
    let search = Arc::new(MockSearch::with_results(hits()));
    let orchestrator = Orchestrator::with_services(
        Arc::new(reasoning(r#"{"claims": []}"#, "Verified")),
        search.clone(),
        &settings(),
    );

    let outcome = orchestrator
        .verify_text(&ExtractedText::new("We are very excited about the future."), &NoProgress)
        .await;

    assert!(matches!(outcome, RunOutcome::NoClaims));
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn test_extraction_failure_halts_before_search() {
    let reasoning = Arc::new(MockReasoning::failing(ServiceError::transport(
        "openai",
        "connection refused",
    )));
    let search = Arc::new(MockSearch::with_results(hits()));
    let orchestrator = Orchestrator::with_services(reasoning.clone(), search.clone(), &settings());

    let outcome = orchestrator
        .verify_text(&ExtractedText::new("Company X revenue grew 12% in 2023."), &NoProgress)
        .await;

    match outcome {
        RunOutcome::ExtractionFailed { detail } => assert!(detail.contains("connection refused")),
        other => panic!("expected extraction failure, got {:?}", other),
    }
    assert_eq!(search.call_count(), 0);
    // Default policy retries once
    assert_eq!(reasoning.call_count(), 2);
}

#[tokio::test]
async fn test_search_failure_is_contained() {
    let search = MockSearch::from_fn(|query| {
        if query.starts_with("Plant 1 ") {
            Err(ServiceError::Http {
                service: "tavily".to_string(),
                status: 503,
                body: "unavailable".to_string(),
            })
        } else {
            Ok(hits())
        }
    });
    let orchestrator = Orchestrator::with_services(
        Arc::new(reasoning(r#"{"claims": []}"#, "Verified")),
        Arc::new(search),
        &settings(),
    );

    let report = orchestrator.verify_claims(&claims(3), &NoProgress).await;

    assert_eq!(report.len(), 3);
    assert_eq!(report.verdicts[0].status, VerdictStatus::Verified);
    assert_eq!(report.verdicts[1].status, VerdictStatus::Inaccurate);
    assert_eq!(report.verdicts[1].source_url, NO_SOURCE);
    assert!(!report.verdicts[1].reason.is_empty());
    assert_eq!(report.verdicts[2].status, VerdictStatus::Verified);
}

#[tokio::test]
async fn test_tally_sums_to_verdict_count() {
    let reasoning = MockReasoning::from_fn(|_, user| {
        let status = if user.contains("Plant 0 ") {
            "Verified"
        } else if user.contains("Plant 1 ") {
            "False"
        } else if user.contains("Plant 2 ") {
            "Unverified"
        } else {
            "Error"
        };
        Ok(verdict_json(status))
    });
    let orchestrator = Orchestrator::with_services(
        Arc::new(reasoning),
        Arc::new(MockSearch::with_results(hits())),
        &settings(),
    );

    let report = orchestrator.verify_claims(&claims(4), &NoProgress).await;

    assert_eq!(report.tally.verified, 1);
    assert_eq!(report.tally.false_, 1);
    // "Unverified" collapses into the closed set
    assert_eq!(report.tally.inaccurate, 1);
    // "Error" is not an adjudication label, so the claim ends as a local error
    assert_eq!(report.tally.error, 1);
    assert_eq!(report.tally.total(), report.len());
    assert!(report
        .verdicts
        .iter()
        .all(|v| VerdictStatus::ALL.contains(&v.status)));
}

#[tokio::test]
async fn test_concurrent_verification_keeps_claim_order() {
    let mut settings = settings();
    settings.limits = Limits {
        max_concurrent_claims: 4,
        ..Default::default()
    };

    let orchestrator = Orchestrator::with_services(
        Arc::new(reasoning(r#"{"claims": []}"#, "Verified")),
        Arc::new(MockSearch::with_results(hits())),
        &settings,
    );

    let input = claims(8);
    let report = orchestrator.verify_claims(&input, &NoProgress).await;

    let reported: Vec<&str> = report.verdicts.iter().map(|v| v.claim.as_str()).collect();
    let expected: Vec<&str> = input.iter().map(|c| c.as_str()).collect();
    assert_eq!(reported, expected);
}

#[tokio::test]
async fn test_progress_events_in_order() {
    let events: Mutex<Vec<ProgressEvent>> = Mutex::new(Vec::new());
    let observer = |event: &ProgressEvent| events.lock().unwrap().push(event.clone());

    let orchestrator = Orchestrator::with_services(
        Arc::new(reasoning(
            r#"{"claims": ["Company X revenue grew 12% in 2023.", "The product launched in March 2022."]}"#,
            "Verified",
        )),
        Arc::new(MockSearch::with_results(hits())),
        &settings(),
    );

    let outcome = orchestrator
        .verify_text(
            &ExtractedText::new("Company X revenue grew 12% in 2023. The product launched in March 2022."),
            &observer,
        )
        .await;
    assert_eq!(outcome.report().map(|r| r.len()), Some(2));

    let events = events.into_inner().unwrap();
    assert_eq!(events[0], ProgressEvent::ClaimsExtracted { count: 2 });
    assert_eq!(
        events[1..]
            .iter()
            .map(|e| e.fraction().unwrap())
            .collect::<Vec<_>>(),
        vec![0.5, 1.0]
    );
}

#[tokio::test]
async fn test_unreadable_document_is_surfaced_as_text() {
    let events: Mutex<Vec<ProgressEvent>> = Mutex::new(Vec::new());
    let observer = |event: &ProgressEvent| events.lock().unwrap().push(event.clone());

    let reasoning = Arc::new(reasoning(r#"{"claims": []}"#, "Verified"));
    let orchestrator = Orchestrator::with_services(
        reasoning.clone(),
        Arc::new(MockSearch::with_results(hits())),
        &settings(),
    );

    let outcome = orchestrator
        .run(Document::from_path("/nonexistent/annual-report.pdf"), &observer)
        .await;

    assert!(matches!(outcome, RunOutcome::NoClaims));
    // The error text still flows to claim extraction
    assert!(reasoning.user_prompts()[0].contains(READ_ERROR_PREFIX));

    let events = events.into_inner().unwrap();
    match &events[0] {
        ProgressEvent::TextExtracted {
            read_error: Some(error),
            ..
        } => assert!(error.starts_with(READ_ERROR_PREFIX)),
        other => panic!("expected read error event, got {:?}", other),
    }
}
