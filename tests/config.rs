//! Configuration Integration Tests
//!
//! Tests for config file loading, defaults and limit validation.

use std::path::Path;

use claimcheck::config::{load_config, parse_settings, Settings};
use claimcheck::core::{Limits, LimitsViolation, RetryPolicy};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

#[test]
fn test_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.reasoning.model, "gpt-4-turbo-preview");
    assert_eq!(settings.reasoning.temperature, 0.0);
    assert!(settings.reasoning.json_mode);
    assert_eq!(settings.limits.max_text_chars, 50_000);
    assert_eq!(settings.limits.max_claims, 10);
    assert_eq!(settings.limits.max_search_results, 3);
    assert_eq!(settings.limits.max_concurrent_claims, 1);
    assert_eq!(settings.retry, RetryPolicy::default());
}

#[test]
fn test_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("claimcheck.yaml");
    std::fs::write(
        &path,
        r#"
reasoning:
  model: gpt-4o
  endpoint: http://localhost:8080/v1
limits:
  max_claims: 4
  max_concurrent_claims: 2
retry:
  max_attempts: 1
"#,
    )
    .unwrap();

    let resolved = assert_ok!(load_config(Some(path.as_path())));
    assert_eq!(resolved.config_file.as_deref(), Some(path.as_path()));
    assert_eq!(resolved.settings.reasoning.model, "gpt-4o");
    assert_eq!(resolved.settings.reasoning.endpoint, "http://localhost:8080/v1");
    assert_eq!(resolved.settings.limits.max_claims, 4);
    assert_eq!(resolved.settings.limits.max_concurrent_claims, 2);
    assert_eq!(resolved.settings.retry.max_attempts, 1);
    // Untouched sections keep defaults
    assert_eq!(resolved.settings.search.endpoint, "https://api.tavily.com");
}

#[test]
fn test_missing_explicit_file_is_error() {
    assert_err!(load_config(Some(Path::new("/nonexistent/.claimcheck/config.yaml"))));
}

#[test]
fn test_invalid_yaml_is_error() {
    assert_err!(parse_settings("limits: [not, a, map"));
}

#[test]
fn test_concurrency_cannot_exceed_claims() {
    let limits = Limits {
        max_claims: 3,
        max_concurrent_claims: 5,
        ..Default::default()
    };

    assert_eq!(
        limits.validate(),
        Err(LimitsViolation::ConcurrencyExceedsClaims {
            concurrency: 5,
            max_claims: 3,
        })
    );
    assert_err!(parse_settings("limits:\n  max_claims: 3\n  max_concurrent_claims: 5\n"));
}

#[test]
fn test_truncation_counts_characters() {
    let limits = Limits {
        max_text_chars: 3,
        ..Default::default()
    };
    assert_eq!(limits.truncate_text("ünïcode"), "ünï");
    assert_eq!(limits.truncate_text("ab"), "ab");
}
