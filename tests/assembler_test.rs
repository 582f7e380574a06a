//! Tests for the DOCX package produced by the assembler.

mod common;

use common::{docx_part, one_line_per_page, PdfBuilder};
use pdf2word::{
    convert_bytes, Block, DocxWriter, Formatting, HeadingLevel, ListKind, StructuredDocument,
};

fn block_doc() -> StructuredDocument {
    StructuredDocument {
        blocks: vec![
            Block::Heading {
                level: HeadingLevel::H2,
                text: "Scope".into(),
                formatting: Formatting::default(),
            },
            Block::Paragraph {
                text: "Kept line\nNext line".into(),
                formatting: Formatting {
                    bold: false,
                    italic: true,
                },
            },
            Block::PageBreak,
            Block::ListItem {
                kind: ListKind::Bullet,
                text: "Bulleted".into(),
                formatting: Formatting::default(),
            },
            Block::ListItem {
                kind: ListKind::Number,
                text: "Numbered".into(),
                formatting: Formatting::default(),
            },
        ],
    }
}

#[test]
fn test_document_xml_structure() {
    let bytes = DocxWriter::new().serialize(&block_doc()).unwrap();
    let xml = docx_part(&bytes, "word/document.xml");

    assert!(xml.contains("Heading2"));
    assert!(xml.contains("Scope"));
    assert!(xml.contains("Kept line"));
    assert!(xml.contains("Next line"));
    assert!(xml.contains("textWrapping"));
    assert!(xml.contains("<w:i ") || xml.contains("<w:i/>"));
    assert_eq!(xml.matches(r#"w:type="page""#).count(), 1);
    assert!(xml.contains("Bulleted"));
    assert!(xml.contains("Numbered"));
    assert!(xml.contains("w:numPr"));
}

#[test]
fn test_styles_and_numbering_declared() {
    let bytes = DocxWriter::new().serialize(&block_doc()).unwrap();

    let styles = docx_part(&bytes, "word/styles.xml");
    assert!(styles.contains("Heading1"));
    assert!(styles.contains("Heading 2"));
    assert!(styles.contains("Heading3"));

    let numbering = docx_part(&bytes, "word/numbering.xml");
    assert!(numbering.contains("bullet"));
    assert!(numbering.contains("decimal"));
}

fn numbered(text: &str) -> Block {
    Block::ListItem {
        kind: ListKind::Number,
        text: text.into(),
        formatting: Formatting::default(),
    }
}

#[test]
fn test_separate_numbered_lists_restart() {
    let doc = StructuredDocument {
        blocks: vec![
            numbered("First a"),
            numbered("First b"),
            Block::Paragraph {
                text: "Between the lists".into(),
                formatting: Formatting::default(),
            },
            numbered("Second a"),
        ],
    };
    let bytes = DocxWriter::new().serialize(&doc).unwrap();

    let xml = docx_part(&bytes, "word/document.xml");
    assert_eq!(xml.matches(r#"w:numId w:val="2""#).count(), 2);
    assert_eq!(xml.matches(r#"w:numId w:val="3""#).count(), 1);

    let numbering = docx_part(&bytes, "word/numbering.xml");
    assert!(numbering.contains("w:startOverride"));
}

#[test]
fn test_numbered_list_continues_across_page_break() {
    let doc = StructuredDocument {
        blocks: vec![numbered("One"), Block::PageBreak, numbered("Two")],
    };
    let bytes = DocxWriter::new().serialize(&doc).unwrap();

    let xml = docx_part(&bytes, "word/document.xml");
    assert_eq!(xml.matches(r#"w:numId w:val="2""#).count(), 2);
    assert!(!docx_part(&bytes, "word/numbering.xml").contains("w:startOverride"));
}

#[test]
fn test_converted_pdf_page_breaks_in_package() {
    let pdf = one_line_per_page(&["One", "Two", "Three"]);
    let output = convert_bytes(&pdf).unwrap();
    let xml = docx_part(&output.bytes, "word/document.xml");

    assert_eq!(xml.matches(r#"w:type="page""#).count(), 2);
    assert!(xml.find("One").unwrap() < xml.find("Two").unwrap());
    assert!(xml.find("Two").unwrap() < xml.find("Three").unwrap());
}

#[test]
fn test_converted_heading_uses_style() {
    let pdf = PdfBuilder::new()
        .page()
        .text("Results", 72.0, 700.0, 24.0)
        .text("Plain sentence of body text.", 72.0, 660.0, 12.0)
        .build();

    let output = convert_bytes(&pdf).unwrap();
    let xml = docx_part(&output.bytes, "word/document.xml");
    assert!(xml.contains("Heading1"));
    assert!(xml.contains("Results"));
    assert!(xml.contains("Plain sentence of body text."));
}
