//! Text recovery for documents without extractable text.

use std::sync::Arc;

use crate::error::Result;
use crate::model::ExtractedContent;

use super::progress::ProgressReporter;

/// Notice emitted when OCR is requested but no engine is available.
pub const OCR_UNAVAILABLE_NOTICE: &str = "OCR is not yet implemented";

/// Recovers text from a document whose pages carry no text runs.
///
/// The converter only calls an engine when OCR is enabled and extraction
/// found no text, so plugging one in never changes conversions of
/// text-based PDFs.
pub trait OcrEngine: Send + Sync {
    /// Engine name for logs.
    fn name(&self) -> &str;

    /// Return `content` with recovered text runs added.
    ///
    /// `data` is the original PDF. Returning content that is still empty
    /// ends the conversion with [`Error::EmptyText`](crate::Error::EmptyText).
    fn recognize(
        &self,
        data: &[u8],
        content: ExtractedContent,
        progress: &dyn ProgressReporter,
    ) -> Result<ExtractedContent>;
}

/// Default engine: performs no recognition and tells the user so.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableOcr;

impl OcrEngine for UnavailableOcr {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn recognize(
        &self,
        _data: &[u8],
        content: ExtractedContent,
        progress: &dyn ProgressReporter,
    ) -> Result<ExtractedContent> {
        log::warn!("{}", OCR_UNAVAILABLE_NOTICE);
        progress.on_notice(OCR_UNAVAILABLE_NOTICE);
        Ok(content)
    }
}

/// Shared engine handle stored by the converter.
pub type SharedOcr = Arc<dyn OcrEngine>;
