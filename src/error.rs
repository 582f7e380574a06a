//! Error types for pdf2word library.

use std::io;
use thiserror::Error;

/// Result type alias for pdf2word operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a PDF into a Word document.
///
/// Every stage propagates its first failure to the caller; no stage retries
/// or produces a partial document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a readable PDF structure.
    #[error("PDF parsing error: {0}")]
    Parse(String),

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// A page of an otherwise valid PDF could not be read.
    #[error("Cannot read page {page}: {detail}")]
    PageAccess {
        /// 1-based page number
        page: u32,
        /// Backend failure description
        detail: String,
    },

    /// The document contains no extractable text.
    #[error("No text found in document")]
    EmptyText,

    /// Building or serializing the output document failed.
    #[error("Document assembly error: {0}")]
    Assembly(String),

    /// The input exceeds the configured size limit.
    #[error("Input is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge {
        /// Input size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },
}

impl Error {
    /// Whether this is the terminal "no text found" condition rather than a failure.
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Error::EmptyText)
    }

    /// Wrap a backend failure for a specific page.
    pub(crate) fn page(page: u32, detail: impl ToString) -> Self {
        Error::PageAccess {
            page,
            detail: detail.to_string(),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Parse(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::EmptyText;
        assert_eq!(err.to_string(), "No text found in document");

        let err = Error::page(3, "missing Contents");
        assert_eq!(err.to_string(), "Cannot read page 3: missing Contents");

        let err = Error::FileTooLarge {
            size: 200,
            limit: 100,
        };
        assert_eq!(
            err.to_string(),
            "Input is 200 bytes, larger than the 100 byte limit"
        );
    }

    #[test]
    fn test_is_empty_text() {
        assert!(Error::EmptyText.is_empty_text());
        assert!(!Error::Parse("bad xref".into()).is_empty_text());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
