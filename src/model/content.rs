//! Positioned text extracted from PDF pages.

use serde::{Deserialize, Serialize};

/// A run of glyphs sharing one font, with position in top-down page space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position of the baseline, measured downward from the top of the page
    pub y: f32,
    /// Estimated width of the run
    pub width: f32,
    /// Height of the run (equal to the font size)
    pub height: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Whether the font name suggests a bold face
    pub bold: bool,
    /// Whether the font name suggests an italic face
    pub italic: bool,
}

impl TextRun {
    /// Create a run, inferring bold/italic from the font name.
    ///
    /// The inference is a case-insensitive substring match on "bold" and
    /// "italic"; fonts that do not follow that naming are not detected.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32, font_name: &str) -> Self {
        let text = text.into();
        let lower = font_name.to_lowercase();
        let width = text.chars().count() as f32 * font_size * 0.5;

        Self {
            text,
            x,
            y,
            width,
            height: font_size,
            font_name: font_name.to_string(),
            font_size,
            bold: lower.contains("bold"),
            italic: lower.contains("italic"),
        }
    }

    /// Right edge of the run.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

/// An image painted on a page.
///
/// Extraction recognizes image painting operations but does not yet
/// materialize them, so pages never carry any `ImageItem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    /// XObject resource name
    pub name: String,
    /// X position
    pub x: f32,
    /// Y position (top-down)
    pub y: f32,
    /// Width in points
    pub width: f32,
    /// Height in points
    pub height: f32,
}

/// Text extracted from a single page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Text runs in content-stream order
    pub runs: Vec<TextRun>,
    /// Images on the page (always empty, see [`ImageItem`])
    pub images: Vec<ImageItem>,
}

impl PageContent {
    /// Create an empty page with the given dimensions.
    pub fn new(page_number: u32, width: f32, height: f32) -> Self {
        Self {
            page_number,
            width,
            height,
            runs: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Plain text of the page, runs separated by spaces.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check whether the page has any non-whitespace text.
    pub fn has_text(&self) -> bool {
        self.runs.iter().any(|r| !r.text.trim().is_empty())
    }
}

/// The whole-document extraction result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Concatenated plain text of all pages
    pub text: String,
    /// Pages in source order
    pub pages: Vec<PageContent>,
    /// Page count reported by the source PDF
    pub total_pages: u32,
}

impl ExtractedContent {
    /// Build from extracted pages, deriving the concatenated text.
    pub fn from_pages(pages: Vec<PageContent>, total_pages: u32) -> Self {
        let text = pages
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            text,
            pages,
            total_pages,
        }
    }

    /// Check whether the document has no extractable text at all.
    pub fn is_text_empty(&self) -> bool {
        !self.pages.iter().any(PageContent::has_text)
    }

    /// Total number of text runs across all pages.
    pub fn run_count(&self) -> usize {
        self.pages.iter().map(|p| p.runs.len()).sum()
    }
}
