//! Document assembly: turning classified paragraphs into the output
//! document tree and serializing it.

mod docx;
mod json;

pub use docx::{DocxWriter, HeadingStyle};
pub use json::{to_json, JsonFormat};

use crate::model::{Block, PageParagraphs, ParagraphKind, StructuredDocument};

/// Builds a [`StructuredDocument`] from per-page paragraphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Create an assembler.
    pub fn new() -> Self {
        Self
    }

    /// Build the block tree.
    ///
    /// Every page but the first is preceded by a page break, so N pages
    /// always yield N-1 breaks, even when a page has no text. Blank
    /// paragraphs produce no block.
    pub fn build(&self, pages: &[PageParagraphs]) -> StructuredDocument {
        let mut doc = StructuredDocument::new();

        for (index, page) in pages.iter().enumerate() {
            if index > 0 {
                doc.push(Block::PageBreak);
            }

            for paragraph in page.paragraphs.iter().filter(|p| !p.is_blank()) {
                let text = paragraph.text.trim().to_string();
                let formatting = paragraph.formatting;
                doc.push(match paragraph.kind {
                    ParagraphKind::Heading(level) => Block::Heading {
                        level,
                        text,
                        formatting,
                    },
                    ParagraphKind::ListItem(kind) => Block::ListItem {
                        kind,
                        text,
                        formatting,
                    },
                    ParagraphKind::Plain => Block::Paragraph { text, formatting },
                });
            }
        }

        log::debug!(
            "Assembled {} blocks from {} pages",
            doc.blocks.len(),
            pages.len()
        );
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, ListKind, ProcessedParagraph};

    fn page(number: u32, paragraphs: Vec<ProcessedParagraph>) -> PageParagraphs {
        PageParagraphs::new(number, paragraphs)
    }

    #[test]
    fn test_page_breaks_between_pages() {
        let pages: Vec<PageParagraphs> = (1..=4)
            .map(|n| page(n, vec![ProcessedParagraph::plain(format!("Page {}", n))]))
            .collect();

        let doc = DocumentAssembler::new().build(&pages);
        assert_eq!(doc.page_break_count(), 3);
        assert!(!doc.blocks[0].is_page_break());
        assert!(!doc.blocks.last().unwrap().is_page_break());

        for (index, blocks) in doc.pages().iter().enumerate() {
            assert_eq!(blocks[0].text(), Some(format!("Page {}", index + 1).as_str()));
        }
    }

    #[test]
    fn test_single_page_has_no_break() {
        let doc = DocumentAssembler::new().build(&[page(1, vec![ProcessedParagraph::plain("x")])]);
        assert_eq!(doc.page_break_count(), 0);
    }

    #[test]
    fn test_empty_pages_still_get_breaks() {
        let doc = DocumentAssembler::new().build(&[page(1, vec![]), page(2, vec![])]);
        assert_eq!(doc.blocks, vec![Block::PageBreak]);
    }

    #[test]
    fn test_block_kinds_and_blank_skipping() {
        let pages = vec![page(
            1,
            vec![
                ProcessedParagraph::heading("Title", HeadingLevel::H1),
                ProcessedParagraph::plain("   "),
                ProcessedParagraph::list_item("Point one", ListKind::Bullet),
                ProcessedParagraph::plain("Body"),
            ],
        )];

        let doc = DocumentAssembler::new().build(&pages);
        assert_eq!(doc.blocks.len(), 3);
        assert!(matches!(
            doc.blocks[0],
            Block::Heading {
                level: HeadingLevel::H1,
                ..
            }
        ));
        assert!(matches!(
            doc.blocks[1],
            Block::ListItem {
                kind: ListKind::Bullet,
                ..
            }
        ));
        assert_eq!(doc.blocks[2].text(), Some("Body"));
    }
}
