//! The conversion pipeline: extraction, layout analysis and assembly.

mod ocr;
mod options;
pub mod progress;

pub use ocr::{OcrEngine, SharedOcr, UnavailableOcr, OCR_UNAVAILABLE_NOTICE};
pub use options::ConvertOptions;
pub use progress::{MonotonicProgress, NoopProgress, ProgressReporter, SharedProgress};

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::assemble::{DocumentAssembler, DocxWriter};
use crate::detect::{check_size, detect_header};
use crate::error::{Error, Result};
use crate::layout::ParagraphSegmenter;
use crate::model::{ExtractedContent, Metadata, PageParagraphs, StructuredDocument};
use crate::parser::{read_metadata, LopdfBackend, PageExtractor};

use progress::{ASSEMBLE_RANGE, EXTRACT_RANGE, LAYOUT_RANGE};

/// File name used when the source has no usable name.
pub const DEFAULT_OUTPUT_NAME: &str = "document.docx";

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    /// DOCX package bytes
    pub bytes: Vec<u8>,

    /// Suggested output file name
    pub file_name: String,

    /// The assembled block tree
    pub document: StructuredDocument,

    /// Source document metadata
    pub metadata: Metadata,

    /// Summary counts
    pub stats: ConversionStats,
}

/// Counts describing a finished conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Pages in the source PDF
    pub pages: u32,
    /// Text blocks emitted (headings, list items and paragraphs)
    pub paragraphs: usize,
    /// Heading blocks
    pub headings: usize,
    /// List item blocks
    pub list_items: usize,
    /// Page breaks
    pub page_breaks: usize,
    /// Size of the DOCX package
    pub output_bytes: usize,
}

impl ConversionStats {
    fn collect(pages: u32, document: &StructuredDocument, output_bytes: usize) -> Self {
        Self {
            pages,
            paragraphs: document.text_block_count(),
            headings: document.heading_count(),
            list_items: document.list_item_count(),
            page_breaks: document.page_break_count(),
            output_bytes,
        }
    }
}

/// Runs the PDF to DOCX pipeline.
///
/// Each call is independent: no state carries over between conversions,
/// and the first failing stage ends the conversion.
pub struct Converter {
    options: ConvertOptions,
    ocr: SharedOcr,
    progress: SharedProgress,
}

impl Converter {
    /// Create a converter with the given options.
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            ocr: Arc::new(UnavailableOcr),
            progress: Arc::new(NoopProgress),
        }
    }

    /// Replace the OCR engine used for text-less documents.
    pub fn with_ocr_engine(mut self, engine: SharedOcr) -> Self {
        self.ocr = engine;
        self
    }

    /// Attach a progress reporter.
    pub fn with_progress(mut self, progress: SharedProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Options in use.
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert PDF bytes, naming the output [`DEFAULT_OUTPUT_NAME`].
    pub fn convert_bytes(&self, data: &[u8]) -> Result<ConversionOutput> {
        self.convert_named(data, "")
    }

    /// Convert PDF bytes read from `source_name`, naming the output after it.
    pub fn convert_named(&self, data: &[u8], source_name: &str) -> Result<ConversionOutput> {
        let progress = MonotonicProgress::new(self.progress.as_ref());
        progress.on_progress(0, "Reading PDF");

        let (backend, content) = self.load(data, &progress)?;
        let content = self.apply_text_policy(data, content, &progress)?;

        let pages = self.segment(&content, &progress);

        progress.on_progress(ASSEMBLE_RANGE.0, "Assembling document");
        let document = DocumentAssembler::new().build(&pages);
        progress.report_within(ASSEMBLE_RANGE, 1, 2, "Writing DOCX");
        let bytes = DocxWriter::new().serialize(&document)?;
        progress.on_progress(ASSEMBLE_RANGE.1, "Finalizing");

        let stats = ConversionStats::collect(content.total_pages, &document, bytes.len());
        log::info!(
            "Converted {} pages: {} headings, {} list items, {} paragraphs",
            stats.pages,
            stats.headings,
            stats.list_items,
            stats.paragraphs
        );

        let output = ConversionOutput {
            bytes,
            file_name: output_file_name(source_name),
            document,
            metadata: read_metadata(&backend),
            stats,
        };
        progress.on_progress(100, "Done");
        Ok(output)
    }

    /// Extract and classify paragraphs without assembling a document.
    ///
    /// The empty-text policy does not apply; a text-less document yields
    /// pages without paragraphs.
    pub fn analyze(&self, data: &[u8]) -> Result<Vec<PageParagraphs>> {
        let progress = MonotonicProgress::new(self.progress.as_ref());
        let (_, content) = self.load(data, &progress)?;
        Ok(self.segment(&content, &progress))
    }

    /// Validate the input and extract positioned text.
    fn load(
        &self,
        data: &[u8],
        progress: &MonotonicProgress<'_>,
    ) -> Result<(LopdfBackend, ExtractedContent)> {
        check_size(data, self.options.max_input_bytes)?;
        let header = detect_header(data)?;
        log::debug!("PDF {} header at offset {}", header.version, header.offset);

        if self.options.layout_accurate {
            log::debug!("Layout-accurate mode requested; using standard layout analysis");
        }

        let backend = LopdfBackend::load_bytes(data)?;
        let content = PageExtractor::new(&backend).extract_with_progress(|done, total| {
            progress.report_within(
                EXTRACT_RANGE,
                done,
                total,
                &format!("Extracted page {} of {}", done, total),
            )
        })?;

        log::info!(
            "Extracted {} runs from {} pages",
            content.run_count(),
            content.total_pages
        );
        Ok((backend, content))
    }

    /// Stop on text-less content unless the OCR engine recovers some.
    fn apply_text_policy(
        &self,
        data: &[u8],
        content: ExtractedContent,
        progress: &MonotonicProgress<'_>,
    ) -> Result<ExtractedContent> {
        if !content.is_text_empty() {
            return Ok(content);
        }

        if !self.options.ocr_enabled {
            log::info!("No extractable text and OCR disabled");
            return Err(Error::EmptyText);
        }

        log::info!("No extractable text; running OCR engine '{}'", self.ocr.name());
        progress.on_progress(EXTRACT_RANGE.1, "Running OCR");
        let recovered = self.ocr.recognize(data, content, progress)?;
        if recovered.is_text_empty() {
            return Err(Error::EmptyText);
        }
        Ok(recovered)
    }

    fn segment(
        &self,
        content: &ExtractedContent,
        progress: &MonotonicProgress<'_>,
    ) -> Vec<PageParagraphs> {
        let segmenter = ParagraphSegmenter::with_thresholds(self.options.thresholds);
        let total = content.pages.len() as u32;

        content
            .pages
            .iter()
            .enumerate()
            .map(|(index, page)| {
                let paragraphs = segmenter.segment(&page.runs);
                progress.report_within(
                    LAYOUT_RANGE,
                    index as u32 + 1,
                    total,
                    "Analyzing layout",
                );
                PageParagraphs::new(page.page_number, paragraphs)
            })
            .collect()
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

/// Output name for a source file: its file name with a `.docx` extension.
pub fn output_file_name(source_name: &str) -> String {
    Path::new(source_name)
        .file_name()
        .map(|name| Path::new(name).with_extension("docx"))
        .and_then(|name| name.to_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_OUTPUT_NAME.to_string())
}
