//! Text Extraction Integration Tests
//!
//! Drives the extractor against stand-in `pdftotext` scripts so both the
//! path and stream inputs are covered without a real PDF toolchain.

use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use claimcheck::core::TextExtractor;
use claimcheck::domain::{Document, READ_ERROR_PREFIX};
use tempfile::TempDir;

#[cfg(unix)]
fn fake_tool(dir: &Path, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("pdftotext");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[tokio::test]
async fn test_pages_joined_in_order() {
    let temp = TempDir::new().unwrap();
    let tool = fake_tool(temp.path(), r"printf 'Page one\n\fPage two\n\f'");
    let document = temp.path().join("report.pdf");
    std::fs::write(&document, b"%PDF-1.4").unwrap();

    let extractor = TextExtractor::new().with_binary_path(tool.to_string_lossy());
    let text = extractor.extract(Document::from_path(&document)).await;

    assert!(!text.is_read_error());
    assert_eq!(text.as_str(), "Page one\nPage two");
}

#[cfg(unix)]
#[test]
fn test_stream_is_rewound_before_reading() {
    let temp = TempDir::new().unwrap();
    // Arguments are: -enc UTF-8 <file> -
    let tool = fake_tool(temp.path(), r#"cat "$3""#);

    let mut cursor = Cursor::new(b"Revenue grew 12% in 2023.".to_vec());
    let mut consumed = [0u8; 8];
    cursor.read_exact(&mut consumed).unwrap();

    let extractor = TextExtractor::new().with_binary_path(tool.to_string_lossy());
    let text = tokio_test::block_on(extractor.extract(Document::from_reader(cursor)));

    assert_eq!(text.as_str(), "Revenue grew 12% in 2023.");
}

#[cfg(unix)]
#[tokio::test]
async fn test_tool_failure_becomes_payload() {
    let temp = TempDir::new().unwrap();
    let tool = fake_tool(temp.path(), "echo 'Syntax Error: May not be a PDF file' >&2\nexit 1");

    let extractor = TextExtractor::new().with_binary_path(tool.to_string_lossy());
    let text = extractor
        .extract(Document::from_bytes(b"not a pdf".to_vec()))
        .await;

    assert!(text.is_read_error());
    assert!(text.as_str().starts_with(READ_ERROR_PREFIX));
    assert!(text.as_str().contains("May not be a PDF file"));
}

#[tokio::test]
async fn test_missing_tool_becomes_payload() {
    let temp = TempDir::new().unwrap();
    let document = temp.path().join("report.pdf");
    std::fs::write(&document, b"%PDF-1.4").unwrap();

    let extractor = TextExtractor::new().with_binary_path("/nonexistent/bin/pdftotext");
    let text = extractor.extract(Document::from_path(&document)).await;

    assert!(text.is_read_error());
    assert!(text.as_str().contains("not found"));
}
