//! DOCX serialization of the block tree.

use std::io::Cursor;

use docx_rs::{
    AbstractNumbering, BreakType, Docx, IndentLevel, Level, LevelJc, LevelOverride, LevelText,
    NumberFormat, Numbering, NumberingId, Paragraph, Run, SpecialIndentType, Start, Style,
    StyleType,
};

use crate::error::{Error, Result};
use crate::model::{Block, Formatting, HeadingLevel, ListKind, StructuredDocument};

const BULLET_NUMBERING_ID: usize = 1;
const DECIMAL_NUMBERING_ID: usize = 2;

/// Paragraph style declared for one heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadingStyle {
    /// Style id referenced from paragraphs
    pub id: &'static str,
    /// Display name in the style gallery
    pub name: &'static str,
    /// Font size in half-points
    pub half_points: usize,
}

impl HeadingStyle {
    /// Style for a heading level.
    pub fn for_level(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => Self {
                id: "Heading1",
                name: "Heading 1",
                half_points: 32,
            },
            HeadingLevel::H2 => Self {
                id: "Heading2",
                name: "Heading 2",
                half_points: 28,
            },
            HeadingLevel::H3 => Self {
                id: "Heading3",
                name: "Heading 3",
                half_points: 24,
            },
        }
    }
}

/// Writes a [`StructuredDocument`] as a DOCX package.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxWriter;

impl DocxWriter {
    /// Create a writer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize the document to DOCX bytes.
    ///
    /// Each run of consecutive numbered items counts from 1; any block other
    /// than a numbered item or a page break ends the run.
    pub fn serialize(&self, doc: &StructuredDocument) -> Result<Vec<u8>> {
        let mut docx = self.base_document();
        let mut lists = NumberedLists::new();

        for block in &doc.blocks {
            let decimal_id = match block {
                Block::ListItem {
                    kind: ListKind::Number,
                    ..
                } => {
                    let (id, restarted) = lists.item();
                    if restarted {
                        docx = docx.add_numbering(
                            Numbering::new(id, DECIMAL_NUMBERING_ID)
                                .add_override(LevelOverride::new(0).start(1)),
                        );
                    }
                    id
                }
                Block::PageBreak => DECIMAL_NUMBERING_ID,
                _ => {
                    lists.interrupt();
                    DECIMAL_NUMBERING_ID
                }
            };
            docx = docx.add_paragraph(render_block(block, decimal_id));
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|e| Error::Assembly(format!("DOCX packaging error: {}", e)))?;

        let bytes = buffer.into_inner();
        log::debug!("Serialized {} blocks into {} bytes", doc.blocks.len(), bytes.len());
        Ok(bytes)
    }

    /// Empty document with heading styles and list numbering declared.
    fn base_document(&self) -> Docx {
        let docx = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]
            .into_iter()
            .map(HeadingStyle::for_level)
            .fold(Docx::new(), |docx, style| {
                docx.add_style(
                    Style::new(style.id, StyleType::Paragraph)
                        .name(style.name)
                        .size(style.half_points)
                        .bold(),
                )
            });

        docx.add_abstract_numbering(list_definition(BULLET_NUMBERING_ID, "bullet", "•"))
            .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
            .add_abstract_numbering(list_definition(DECIMAL_NUMBERING_ID, "decimal", "%1."))
            .add_numbering(Numbering::new(DECIMAL_NUMBERING_ID, DECIMAL_NUMBERING_ID))
    }
}

/// Numbering instances for separate numbered lists.
///
/// The first list uses the declared decimal instance; later lists get fresh
/// instances that restart at 1.
struct NumberedLists {
    current: Option<usize>,
    next_id: usize,
}

impl NumberedLists {
    fn new() -> Self {
        Self {
            current: None,
            next_id: DECIMAL_NUMBERING_ID,
        }
    }

    /// Instance for the next numbered item, and whether it starts a new list.
    fn item(&mut self) -> (usize, bool) {
        if let Some(id) = self.current {
            return (id, false);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(id);
        (id, id != DECIMAL_NUMBERING_ID)
    }

    fn interrupt(&mut self) {
        self.current = None;
    }
}

fn list_definition(id: usize, format: &str, text: &str) -> AbstractNumbering {
    AbstractNumbering::new(id).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new(format),
            LevelText::new(text),
            LevelJc::new("left"),
        )
        .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
    )
}

fn render_block(block: &Block, decimal_id: usize) -> Paragraph {
    match block {
        Block::Heading {
            level,
            text,
            formatting,
        } => Paragraph::new()
            .add_run(text_run(text, *formatting))
            .style(HeadingStyle::for_level(*level).id),
        Block::ListItem {
            kind,
            text,
            formatting,
        } => {
            let id = match kind {
                ListKind::Bullet => BULLET_NUMBERING_ID,
                ListKind::Number => decimal_id,
            };
            Paragraph::new()
                .add_run(text_run(text, *formatting))
                .numbering(NumberingId::new(id), IndentLevel::new(0))
        }
        Block::Paragraph { text, formatting } => {
            Paragraph::new().add_run(text_run(text, *formatting))
        }
        Block::PageBreak => Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
    }
}

/// A single run; line breaks kept by hyphenation repair become soft breaks.
fn text_run(text: &str, formatting: Formatting) -> Run {
    let mut run = Run::new();
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    if formatting.bold {
        run = run.bold();
    }
    if formatting.italic {
        run = run.italic();
    }
    run
}
