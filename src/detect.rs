//! PDF header detection and input validation.

use crate::error::{Error, Result};

/// Information read from the PDF file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of the `%PDF-` marker
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Readers accept junk before the header as long as it starts within the first 1 KiB.
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Default upper bound on accepted input size (100 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 100 * 1024 * 1024;

/// Locate and validate the PDF header.
///
/// # Returns
/// * `Ok(PdfHeader)` if a `%PDF-x.y` marker is found near the start
/// * `Err(Error::Parse)` if the data is not a PDF
/// * `Err(Error::UnsupportedVersion)` if the version string is malformed
pub fn detect_header(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_WINDOW)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or_else(|| Error::Parse("missing %PDF- header".to_string()))?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or_else(|| Error::Parse("truncated PDF header".to_string()))?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfHeader { version, offset })
}

/// Reject inputs larger than `limit` bytes.
pub fn check_size(data: &[u8], limit: usize) -> Result<()> {
    if data.len() > limit {
        return Err(Error::FileTooLarge {
            size: data.len(),
            limit,
        });
    }
    Ok(())
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == VERSION_LEN
        && bytes[0].is_ascii_digit()
        && bytes[1] == b'.'
        && bytes[2].is_ascii_digit()
}

/// Check if bytes start like a PDF document.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_header(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let header = detect_header(data).unwrap();
        assert_eq!(header.version, "1.7");
        assert_eq!(header.offset, 0);
    }

    #[test]
    fn test_detect_header_after_junk() {
        let mut data = b"\xef\xbb\xbfgarbage".to_vec();
        data.extend_from_slice(b"%PDF-1.4\n");
        let header = detect_header(&data).unwrap();
        assert_eq!(header.version, "1.4");
        assert_eq!(header.offset, 10);
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_header(b"<!DOCTYPE html><html></html>");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_detect_truncated() {
        assert!(matches!(detect_header(b"%PDF-"), Err(Error::Parse(_))));
        assert!(matches!(detect_header(b""), Err(Error::Parse(_))));
    }

    #[test]
    fn test_detect_bad_version() {
        let result = detect_header(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(b"12345", 5).is_ok());
        assert!(matches!(
            check_size(b"123456", 5),
            Err(Error::FileTooLarge { size: 6, limit: 5 })
        ));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }
}
