//! Text extraction from PDF documents.
//!
//! Shells out to poppler's `pdftotext`, which emits one form feed after
//! every page. A seekable stream is rewound and spooled to a temporary
//! file first so both inputs share one decoding path.

use std::io::{self, Seek, SeekFrom};
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::{Document, ExtractedText, ReadSeek};

const PAGE_BREAK: char = '\u{0C}';

/// Errors that can occur during text extraction
#[derive(Debug, Error)]
pub enum TextExtractionError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("external tool not found: {0}")]
    ToolNotFound(String),

    #[error("{tool} failed with exit code {code}: {stderr}")]
    ToolFailed {
        tool: String,
        code: i32,
        stderr: String,
    },

    #[error("{tool} timed out after {seconds}s")]
    Timeout { tool: String, seconds: u64 },
}

/// PDF text extractor using `pdftotext`
pub struct TextExtractor {
    /// Path to the pdftotext binary (default: "pdftotext")
    binary_path: String,
    timeout: Duration,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor {
    pub fn new() -> Self {
        Self {
            binary_path: "pdftotext".to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Use a custom binary path
    pub fn with_binary_path(mut self, binary_path: impl Into<String>) -> Self {
        self.binary_path = binary_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Extract text, turning any failure into a read-error payload
    pub async fn extract(&self, document: Document) -> ExtractedText {
        match self.try_extract(document).await {
            Ok(text) => ExtractedText::new(text),
            Err(e) => {
                warn!(error = %e, "Document could not be read");
                ExtractedText::read_error(e)
            }
        }
    }

    /// Extract text, propagating failures
    pub async fn try_extract(&self, document: Document) -> Result<String, TextExtractionError> {
        match document {
            Document::Path(path) => self.extract_path(&path).await,
            Document::Stream(mut reader) => {
                let spooled = spool(reader.as_mut())?;
                self.extract_path(spooled.path()).await
            }
        }
    }

    async fn extract_path(&self, path: &Path) -> Result<String, TextExtractionError> {
        // Surface a missing file as an I/O error rather than a tool failure
        tokio::fs::metadata(path).await?;

        debug!(path = %path.display(), "Extracting PDF text");

        let child = Command::new(&self.binary_path)
            .args(["-enc", "UTF-8"])
            .arg(path)
            .arg("-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => TextExtractionError::ToolNotFound(self.binary_path.clone()),
                _ => TextExtractionError::Io(e),
            })?;

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| TextExtractionError::Timeout {
                tool: self.binary_path.clone(),
                seconds: self.timeout.as_secs(),
            })??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TextExtractionError::ToolFailed {
                tool: self.binary_path.clone(),
                code: output.status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        let raw = String::from_utf8_lossy(&output.stdout);
        Ok(join_pages(&raw))
    }
}

/// Rewind `reader` and copy it into a temporary file
fn spool(reader: &mut dyn ReadSeek) -> io::Result<NamedTempFile> {
    reader.seek(SeekFrom::Start(0))?;

    let mut file = NamedTempFile::new()?;
    let bytes = io::copy(reader, file.as_file_mut())?;
    debug!(bytes, "Spooled document stream to temporary file");

    Ok(file)
}

/// Concatenate per-page text in document order, one line break between pages
pub fn join_pages(raw: &str) -> String {
    raw.split(PAGE_BREAK)
        .map(|page| page.trim_end())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
