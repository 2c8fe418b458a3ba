//! Document input and extracted text.

use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

/// Prefix of the payload returned in place of text for unreadable documents
pub const READ_ERROR_PREFIX: &str = "Error reading PDF: ";

/// Any seekable byte source
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// A document handed to the pipeline. Consumed once by the text extractor.
pub enum Document {
    /// A file on disk
    Path(PathBuf),

    /// An in-memory or otherwise seekable stream; may be partially consumed
    Stream(Box<dyn ReadSeek + Send>),
}

impl Document {
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    pub fn from_reader<R: Read + Seek + Send + 'static>(reader: R) -> Self {
        Self::Stream(Box::new(reader))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Plain text extracted from a document.
///
/// An unreadable document yields a payload starting with
/// [`READ_ERROR_PREFIX`] instead of an error; downstream stages treat it as
/// ordinary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Payload describing why the document could not be read
    pub fn read_error(detail: impl fmt::Display) -> Self {
        Self(format!("{}{}", READ_ERROR_PREFIX, detail))
    }

    pub fn is_read_error(&self) -> bool {
        self.0.starts_with(READ_ERROR_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Length in characters
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
