//! Classified paragraph types.

use serde::{Deserialize, Serialize};

/// A logical paragraph inferred from positioned text runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedParagraph {
    /// Paragraph text (list markers stripped for list items)
    pub text: String,

    /// Structural classification
    pub kind: ParagraphKind,

    /// Emphasis seen anywhere in the paragraph
    pub formatting: Formatting,

    /// Font size of the last run folded into the paragraph
    pub font_size: f32,
}

impl ProcessedParagraph {
    /// Create a plain paragraph.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ParagraphKind::Plain,
            formatting: Formatting::default(),
            font_size: 12.0,
        }
    }

    /// Create a heading paragraph.
    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        Self {
            kind: ParagraphKind::Heading(level),
            ..Self::plain(text)
        }
    }

    /// Create a list item paragraph.
    pub fn list_item(text: impl Into<String>, kind: ListKind) -> Self {
        Self {
            kind: ParagraphKind::ListItem(kind),
            ..Self::plain(text)
        }
    }

    /// Set the formatting flags.
    pub fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self.kind, ParagraphKind::Heading(_))
    }

    /// Get the heading level (1-3) or None.
    pub fn heading_level(&self) -> Option<u8> {
        match self.kind {
            ParagraphKind::Heading(level) => Some(level.as_u8()),
            _ => None,
        }
    }

    /// Check if this is a list item.
    pub fn is_list(&self) -> bool {
        matches!(self.kind, ParagraphKind::ListItem(_))
    }

    /// Get the list kind or None.
    pub fn list_type(&self) -> Option<ListKind> {
        match self.kind {
            ParagraphKind::ListItem(kind) => Some(kind),
            _ => None,
        }
    }

    /// Check if the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The classified paragraphs of one source page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageParagraphs {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Paragraphs in reading order
    pub paragraphs: Vec<ProcessedParagraph>,
}

impl PageParagraphs {
    /// Create a page of paragraphs.
    pub fn new(page_number: u32, paragraphs: Vec<ProcessedParagraph>) -> Self {
        Self {
            page_number,
            paragraphs,
        }
    }
}

/// Structural role of a paragraph. Exactly one role holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ParagraphKind {
    /// A heading with its level
    Heading(HeadingLevel),
    /// A bulleted or numbered list item
    ListItem(ListKind),
    /// Regular body text
    Plain,
}

/// Heading prominence, 1 being the most prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric level (1-3).
    pub fn as_u8(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// List marker family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bullet glyph or dash marker
    Bullet,
    /// Decimal or single-letter marker
    Number,
}

/// Bold/italic flags for a whole paragraph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formatting {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl Formatting {
    /// Fold another run's flags in; once set, a flag stays set.
    pub fn absorb(&mut self, bold: bool, italic: bool) {
        self.bold |= bold;
        self.italic |= italic;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_accessors() {
        let h = ProcessedParagraph::heading("Title", HeadingLevel::H1);
        assert!(h.is_heading());
        assert!(!h.is_list());
        assert_eq!(h.heading_level(), Some(1));
        assert_eq!(h.list_type(), None);
    }

    #[test]
    fn test_list_accessors() {
        let item = ProcessedParagraph::list_item("First", ListKind::Number);
        assert!(item.is_list());
        assert!(!item.is_heading());
        assert_eq!(item.list_type(), Some(ListKind::Number));
        assert_eq!(item.heading_level(), None);
    }

    #[test]
    fn test_heading_level_numbers() {
        assert_eq!(HeadingLevel::H1.as_u8(), 1);
        assert_eq!(HeadingLevel::H3.as_u8(), 3);
    }

    #[test]
    fn test_formatting_is_sticky() {
        let mut f = Formatting::default();
        f.absorb(true, false);
        f.absorb(false, false);
        assert!(f.bold);
        assert!(!f.italic);
        f.absorb(false, true);
        assert!(f.bold && f.italic);
    }

    #[test]
    fn test_kind_serialization() {
        let p = ProcessedParagraph::list_item("x", ListKind::Bullet);
        let json = serde_json::to_string(&p.kind).unwrap();
        assert_eq!(json, r#"{"type":"list_item","value":"bullet"}"#);
    }
}
