//! Terminal rendering for verification reports.

use std::fmt::Write as _;

use crate::domain::{ProgressEvent, Tally, Verdict, VerdictStatus, VerificationReport};

/// Marker shown beside each verdict
pub fn glyph(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Verified => "✔",
        VerdictStatus::Inaccurate => "⚠",
        VerdictStatus::False => "✘",
        VerdictStatus::Error => "⁉",
    }
}

/// One card per verdict, then the tally
pub fn render_report(report: &VerificationReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "═══════════════════════════════════════════════════════");
    let _ = writeln!(out, "  Verification report ({} claims)", report.len());
    let _ = writeln!(out, "═══════════════════════════════════════════════════════");

    for (idx, verdict) in report.verdicts.iter().enumerate() {
        let _ = writeln!(out);
        render_verdict(&mut out, idx + 1, verdict);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", render_tally(&report.tally));
    out
}

fn render_verdict(out: &mut String, number: usize, verdict: &Verdict) {
    let _ = writeln!(out, "{} [{}] {}. {}", glyph(verdict.status), verdict.status, number, verdict.claim);
    let _ = writeln!(out, "    Reason: {}", verdict.reason);
    if verdict.has_source() {
        let _ = writeln!(out, "    Source: {}", verdict.source_url);
    }
}

/// "Verified: 1 | Inaccurate: 0 | False: 1", with Error only when present
pub fn render_tally(tally: &Tally) -> String {
    VerdictStatus::ALL
        .iter()
        .filter(|status| status.is_adjudicated() || tally.count(**status) > 0)
        .map(|status| format!("{}: {}", status, tally.count(*status)))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Progress line for stderr
pub fn render_progress(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::TextExtracted {
            read_error: Some(error),
            ..
        } => format!("[{}]", error),
        ProgressEvent::TextExtracted {
            chars, truncated, ..
        } => {
            let note = if *truncated { " (truncated for analysis)" } else { "" };
            format!("Extracted {} characters{}", chars, note)
        }
        ProgressEvent::ClaimsExtracted { count } => format!("Found {} claims to verify", count),
        ProgressEvent::ExtractionFailed { detail } => format!("Claim extraction failed: {}", detail),
        ProgressEvent::ClaimVerified {
            completed, total, ..
        } => format!("Verified claim {}/{}", completed, total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn report(verdicts: Vec<Verdict>) -> VerificationReport {
        VerificationReport::new(Uuid::new_v4(), Utc::now(), verdicts)
    }

    #[test]
    fn test_tally_hides_error_when_absent() {
        let report = report(vec![Verdict::new(
            "Company X revenue grew 12% in 2023.",
            VerdictStatus::Verified,
            "Matches the annual report.",
            "https://x.example.com/ir",
        )]);
        assert_eq!(render_tally(&report.tally), "Verified: 1 | Inaccurate: 0 | False: 0");
    }

    #[test]
    fn test_tally_shows_error_when_present() {
        let report = report(vec![Verdict::error("The product launched in March 2022.", "timeout")]);
        assert_eq!(
            render_tally(&report.tally),
            "Verified: 0 | Inaccurate: 0 | False: 0 | Error: 1"
        );
    }

    #[test]
    fn test_report_omits_placeholder_sources() {
        let rendered = render_report(&report(vec![Verdict::search_failed(
            "The product launched in March 2022.",
            "HTTP 503",
        )]));
        assert!(rendered.contains("⚠ [Inaccurate] 1. The product launched in March 2022."));
        assert!(!rendered.contains("Source:"));
    }

    #[test]
    fn test_progress_lines() {
        let event = ProgressEvent::ClaimVerified {
            completed: 2,
            total: 5,
            status: VerdictStatus::False,
        };
        assert_eq!(render_progress(&event), "Verified claim 2/5");
        assert_eq!(
            render_progress(&ProgressEvent::ClaimsExtracted { count: 3 }),
            "Found 3 claims to verify"
        );
    }
}
