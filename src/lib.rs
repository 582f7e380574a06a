//! # pdf2word
//!
//! Structural PDF to Word conversion for Rust.
//!
//! This library reads the positioned text of a PDF, rebuilds its logical
//! structure (paragraphs, headings, bulleted and numbered lists, page
//! breaks) with layout heuristics, and writes the result as a DOCX package.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf2word::convert_file;
//!
//! fn main() -> pdf2word::Result<()> {
//!     let output = convert_file("report.pdf")?;
//!     std::fs::write(&output.file_name, &output.bytes)?;
//!     println!("{} headings", output.stats.headings);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction**: text runs with position, font size and style per page
//! - **Hyphenation repair**: words split across line breaks are rejoined
//! - **Segmentation**: runs are grouped into paragraphs by vertical gap
//! - **Classification**: headings (levels 1-3) and list items are inferred
//! - **Assembly**: a block tree is built and serialized to DOCX
//!
//! Documents without extractable text end in [`Error::EmptyText`] unless an
//! OCR engine recovers text (see [`OcrEngine`]).

pub mod assemble;
pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod parser;
pub mod pipeline;

// Re-export commonly used types
pub use assemble::{to_json, DocumentAssembler, DocxWriter, JsonFormat};
pub use detect::{detect_header, is_pdf_bytes, PdfHeader};
pub use error::{Error, Result};
pub use layout::{
    repair_hyphenation, LayoutThresholds, ParagraphSegmenter, StructureClassifier,
};
pub use model::{
    Block, ExtractedContent, Formatting, HeadingLevel, ImageItem, ListKind, Metadata,
    PageContent, PageParagraphs, ParagraphKind, ProcessedParagraph, StructuredDocument, TextRun,
};
pub use pipeline::{
    output_file_name, ConversionOutput, ConversionStats, ConvertOptions, Converter,
    MonotonicProgress, NoopProgress, OcrEngine, ProgressReporter, UnavailableOcr,
};

use std::path::Path;
use std::sync::Arc;

use parser::{LopdfBackend, PageExtractor};

/// Convert PDF bytes to DOCX with default options.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("input.pdf").unwrap();
/// let output = pdf2word::convert_bytes(&data).unwrap();
/// std::fs::write("input.docx", output.bytes).unwrap();
/// ```
pub fn convert_bytes(data: &[u8]) -> Result<ConversionOutput> {
    Converter::default().convert_bytes(data)
}

/// Convert PDF bytes to DOCX with custom options.
pub fn convert_bytes_with_options(data: &[u8], options: ConvertOptions) -> Result<ConversionOutput> {
    Converter::new(options).convert_bytes(data)
}

/// Convert a PDF file to DOCX.
///
/// The output file name is the input's name with a `.docx` extension;
/// nothing is written to disk.
///
/// # Arguments
///
/// * `path` - Path to the PDF file
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConversionOutput> {
    convert_file_with_options(path, ConvertOptions::default())
}

/// Convert a PDF file to DOCX with custom options.
///
/// # Example
///
/// ```no_run
/// use pdf2word::{convert_file_with_options, ConvertOptions};
///
/// let options = ConvertOptions::new().with_ocr(true);
/// let output = convert_file_with_options("scan.pdf", options)?;
/// # Ok::<(), pdf2word::Error>(())
/// ```
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: ConvertOptions,
) -> Result<ConversionOutput> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    Converter::new(options).convert_named(&data, &path.to_string_lossy())
}

/// Convert a PDF file to DOCX, reading the file asynchronously.
///
/// Only the read suspends; the conversion runs on the calling task.
#[cfg(feature = "async")]
pub async fn convert_file_async<P: AsRef<Path>>(
    path: P,
    options: ConvertOptions,
) -> Result<ConversionOutput> {
    let path = path.as_ref();
    let data = tokio::fs::read(path).await?;
    Converter::new(options).convert_named(&data, &path.to_string_lossy())
}

/// Extract positioned text from PDF bytes without layout analysis.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("input.pdf").unwrap();
/// let content = pdf2word::extract_content(&data).unwrap();
/// println!("{} pages, {} runs", content.total_pages, content.run_count());
/// ```
pub fn extract_content(data: &[u8]) -> Result<ExtractedContent> {
    detect_header(data)?;
    let backend = LopdfBackend::load_bytes(data)?;
    PageExtractor::new(&backend).extract()
}

/// Read document metadata from PDF bytes.
pub fn extract_metadata(data: &[u8]) -> Result<Metadata> {
    detect_header(data)?;
    let backend = LopdfBackend::load_bytes(data)?;
    Ok(parser::read_metadata(&backend))
}

/// Builder for configuring and running conversions.
///
/// # Example
///
/// ```no_run
/// use pdf2word::Pdf2Word;
///
/// let output = Pdf2Word::new()
///     .with_ocr()
///     .layout_accurate()
///     .convert("document.pdf")?;
/// # Ok::<(), pdf2word::Error>(())
/// ```
pub struct Pdf2Word {
    options: ConvertOptions,
    ocr: Option<Arc<dyn OcrEngine>>,
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl Pdf2Word {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ConvertOptions::default(),
            ocr: None,
            progress: None,
        }
    }

    /// Enable the OCR fallback for documents without text.
    pub fn with_ocr(mut self) -> Self {
        self.options = self.options.with_ocr(true);
        self
    }

    /// Request layout-accurate mode.
    pub fn layout_accurate(mut self) -> Self {
        self.options = self.options.with_layout_accurate(true);
        self
    }

    /// Set the maximum input size in bytes.
    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.options = self.options.with_max_input_bytes(bytes);
        self
    }

    /// Set layout thresholds.
    pub fn with_thresholds(mut self, thresholds: LayoutThresholds) -> Self {
        self.options = self.options.with_thresholds(thresholds);
        self
    }

    /// Use a custom OCR engine.
    pub fn with_ocr_engine(mut self, engine: Arc<dyn OcrEngine>) -> Self {
        self.ocr = Some(engine);
        self
    }

    /// Attach a progress reporter.
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Build the configured converter.
    pub fn build(self) -> Converter {
        let mut converter = Converter::new(self.options);
        if let Some(engine) = self.ocr {
            converter = converter.with_ocr_engine(engine);
        }
        if let Some(progress) = self.progress {
            converter = converter.with_progress(progress);
        }
        converter
    }

    /// Convert a PDF file.
    pub fn convert<P: AsRef<Path>>(self, path: P) -> Result<ConversionOutput> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        self.build().convert_named(&data, &path.to_string_lossy())
    }

    /// Convert PDF bytes.
    pub fn convert_bytes(self, data: &[u8]) -> Result<ConversionOutput> {
        self.build().convert_bytes(data)
    }

    /// Extract and classify paragraphs per page without writing a DOCX.
    pub fn analyze(self, data: &[u8]) -> Result<Vec<PageParagraphs>> {
        self.build().analyze(data)
    }
}

impl Default for Pdf2Word {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_bytes_rejects_garbage() {
        let result = convert_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(Error::Parse(_))));
    }

    #[test]
    fn test_convert_file_missing() {
        let result = convert_file("/nonexistent/input.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_builder_applies_options() {
        let converter = Pdf2Word::new()
            .with_ocr()
            .layout_accurate()
            .with_max_input_bytes(2048)
            .build();

        assert!(converter.options().ocr_enabled);
        assert!(converter.options().layout_accurate);
        assert_eq!(converter.options().max_input_bytes, 2048);
    }

    #[test]
    fn test_extract_content_rejects_garbage() {
        assert!(extract_content(b"plain text").is_err());
        assert!(extract_metadata(b"plain text").is_err());
    }
}
