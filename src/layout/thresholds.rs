//! Heuristic thresholds for segmentation and classification.

use serde::{Deserialize, Serialize};

/// Runs whose baselines differ by less than this share a line.
pub const SAME_LINE_TOLERANCE: f32 = 5.0;

/// A vertical gap above this multiple of the font size starts a new paragraph.
pub const PARAGRAPH_GAP_FACTOR: f32 = 1.5;

/// A same-line gap wider than this fraction of the average character width
/// separates words.
pub const WORD_GAP_FACTOR: f32 = 0.2;

/// Headings are shorter than this many characters.
pub const HEADING_MAX_CHARS: usize = 100;

/// Text larger than this (in points) reads as a heading.
pub const HEADING_MIN_FONT_SIZE: f32 = 14.0;

/// Headings larger than this are level 2.
pub const H2_FONT_SIZE: f32 = 16.0;

/// Headings larger than this are level 1.
pub const H1_FONT_SIZE: f32 = 18.0;

/// All-uppercase text needs more than this many characters to be a heading.
pub const UPPERCASE_HEADING_MIN_CHARS: usize = 3;

/// Tunable layout thresholds.
///
/// Font sizes are absolute, not relative to the document's body text, so
/// documents set in unusually large type over-classify headings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutThresholds {
    /// Same-line baseline tolerance in points
    pub same_line_tolerance: f32,

    /// Paragraph gap as a multiple of font size
    pub paragraph_gap_factor: f32,

    /// Word gap as a fraction of the average character width
    pub word_gap_factor: f32,

    /// Exclusive upper bound on heading length in characters
    pub heading_max_chars: usize,

    /// Exclusive lower bound on heading font size
    pub heading_min_font_size: f32,

    /// Exclusive lower bound for level 2
    pub h2_font_size: f32,

    /// Exclusive lower bound for level 1
    pub h1_font_size: f32,

    /// Exclusive lower bound on uppercase heading length
    pub uppercase_min_chars: usize,
}

impl LayoutThresholds {
    /// Create thresholds with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the same-line tolerance.
    pub fn with_same_line_tolerance(mut self, tolerance: f32) -> Self {
        self.same_line_tolerance = tolerance;
        self
    }

    /// Set the paragraph gap factor.
    pub fn with_paragraph_gap_factor(mut self, factor: f32) -> Self {
        self.paragraph_gap_factor = factor;
        self
    }

    /// Set the word gap factor.
    pub fn with_word_gap_factor(mut self, factor: f32) -> Self {
        self.word_gap_factor = factor;
        self
    }

    /// Set the maximum heading length.
    pub fn with_heading_max_chars(mut self, chars: usize) -> Self {
        self.heading_max_chars = chars;
        self
    }

    /// Set the heading font size bounds (minimum, level 2, level 1).
    pub fn with_heading_sizes(mut self, min: f32, h2: f32, h1: f32) -> Self {
        self.heading_min_font_size = min;
        self.h2_font_size = h2;
        self.h1_font_size = h1;
        self
    }
}

impl Default for LayoutThresholds {
    fn default() -> Self {
        Self {
            same_line_tolerance: SAME_LINE_TOLERANCE,
            paragraph_gap_factor: PARAGRAPH_GAP_FACTOR,
            word_gap_factor: WORD_GAP_FACTOR,
            heading_max_chars: HEADING_MAX_CHARS,
            heading_min_font_size: HEADING_MIN_FONT_SIZE,
            h2_font_size: H2_FONT_SIZE,
            h1_font_size: H1_FONT_SIZE,
            uppercase_min_chars: UPPERCASE_HEADING_MIN_CHARS,
        }
    }
}
