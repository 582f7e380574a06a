//! In-memory PDF fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// A line of text placed with PDF (bottom-up) coordinates.
struct PlacedText {
    text: String,
    x: f32,
    y: f32,
    size: f32,
    bold: bool,
}

/// Builds small PDFs with Helvetica text.
#[derive(Default)]
pub struct PdfBuilder {
    pages: Vec<Vec<PlacedText>>,
    title: Option<String>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new page.
    pub fn page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Add regular text to the current page; `y` is the PDF baseline.
    pub fn text(self, text: &str, x: f32, y: f32, size: f32) -> Self {
        self.place(text, x, y, size, false)
    }

    /// Add bold text to the current page.
    pub fn bold(self, text: &str, x: f32, y: f32, size: f32) -> Self {
        self.place(text, x, y, size, true)
    }

    /// Set the Info dictionary title.
    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    fn place(mut self, text: &str, x: f32, y: f32, size: f32, bold: bool) -> Self {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        if let Some(page) = self.pages.last_mut() {
            page.push(PlacedText {
                text: text.to_string(),
                x,
                y,
                size,
                bold,
            });
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id: ObjectId = doc.new_object_id();

        let regular_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => regular_id,
                "F2" => bold_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for texts in &self.pages {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Resources" => resources_id,
            };

            if !texts.is_empty() {
                let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(texts)));
                page.set("Contents", content_id);
            }

            kids.push(doc.add_object(page).into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(title) = &self.title {
            let info_id = doc.add_object(dictionary! {
                "Title" => Object::string_literal(title.as_str()),
                "CreationDate" => Object::string_literal("D:20240115103045Z"),
            });
            doc.trailer.set("Info", info_id);
        }

        let mut buf = Vec::new();
        doc.save_to(&mut buf).expect("failed to save test PDF");
        buf
    }
}

fn page_content(texts: &[PlacedText]) -> Vec<u8> {
    let mut operations = Vec::new();
    for placed in texts {
        let font = if placed.bold { "F2" } else { "F1" };
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![font.into(), placed.size.into()]));
        operations.push(Operation::new("Td", vec![placed.x.into(), placed.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(placed.text.as_str())],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
        .encode()
        .expect("failed to encode content stream")
}

/// Blank pages only: a valid PDF with no text at all.
pub fn blank_pdf(pages: usize) -> Vec<u8> {
    (0..pages)
        .fold(PdfBuilder::new(), |builder, _| builder.page())
        .build()
}

/// One page per entry, each with a single line of body text.
pub fn one_line_per_page(lines: &[&str]) -> Vec<u8> {
    lines
        .iter()
        .fold(PdfBuilder::new(), |builder, line| {
            builder.page().text(line, 72.0, 700.0, 12.0)
        })
        .build()
}

/// Read a part of a DOCX package as text.
pub fn docx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("DOCX is a zip archive");
    let mut part = archive.by_name(name).expect("part exists");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("part is UTF-8");
    xml
}
