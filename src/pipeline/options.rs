//! Conversion options and configuration.

use crate::detect::DEFAULT_MAX_INPUT_BYTES;
use crate::layout::LayoutThresholds;

/// Options for converting a PDF to DOCX.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Layout-accurate mode. Accepted and recorded; layout analysis is the
    /// same either way.
    pub layout_accurate: bool,

    /// Run the OCR engine when the document has no extractable text
    pub ocr_enabled: bool,

    /// Largest accepted input in bytes
    pub max_input_bytes: usize,

    /// Segmentation and classification thresholds
    pub thresholds: LayoutThresholds,
}

impl ConvertOptions {
    /// Create new convert options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable layout-accurate mode.
    pub fn with_layout_accurate(mut self, enabled: bool) -> Self {
        self.layout_accurate = enabled;
        self
    }

    /// Enable or disable the OCR fallback.
    pub fn with_ocr(mut self, enabled: bool) -> Self {
        self.ocr_enabled = enabled;
        self
    }

    /// Set the maximum input size in bytes.
    pub fn with_max_input_bytes(mut self, bytes: usize) -> Self {
        self.max_input_bytes = bytes;
        self
    }

    /// Set layout thresholds.
    pub fn with_thresholds(mut self, thresholds: LayoutThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            layout_accurate: false,
            ocr_enabled: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            thresholds: LayoutThresholds::default(),
        }
    }
}
