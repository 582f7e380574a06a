//! Positioned text extraction from PDF content streams.
//!
//! Interprets the text operators of each page's content stream, tracking the
//! text and graphics matrices, and emits one [`TextRun`] per shown string
//! with its position flipped into top-down page space.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{is_spaceless_script_char, ExtractedContent, PageContent, TextRun};

use super::backend::{decode_text_simple, ContentOp, FontDecoder, PageId, PdfBackend, PdfValue};

/// TJ adjustments beyond this (in thousandths of text space) read as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.5;

/// Extracts positioned text runs from every page of a document.
pub struct PageExtractor<'a, B: PdfBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: PdfBackend + ?Sized> PageExtractor<'a, B> {
    /// Create an extractor over a backend.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Extract all pages in order.
    pub fn extract(&self) -> Result<ExtractedContent> {
        self.extract_with_progress(|_, _| {})
    }

    /// Extract all pages, calling `on_page(done, total)` after each page.
    ///
    /// The first unreadable page aborts the whole extraction.
    pub fn extract_with_progress<F>(&self, mut on_page: F) -> Result<ExtractedContent>
    where
        F: FnMut(u32, u32),
    {
        let pages = self.backend.pages();
        let total_pages = pages.len() as u32;
        let mut extracted = Vec::with_capacity(pages.len());

        for (done, (page_num, page_id)) in pages.into_iter().enumerate() {
            let page = self.extract_page(page_num, page_id)?;
            log::debug!(
                "Page {}: {} runs, {}x{}pt",
                page_num,
                page.runs.len(),
                page.width,
                page.height
            );
            extracted.push(page);
            on_page(done as u32 + 1, total_pages);
        }

        Ok(ExtractedContent::from_pages(extracted, total_pages))
    }

    /// Extract a single page.
    pub fn extract_page(&self, page_num: u32, page_id: PageId) -> Result<PageContent> {
        let (width, height) = self
            .backend
            .page_size(page_id)
            .map_err(|e| Error::page(page_num, e))?;

        let fonts = self
            .backend
            .page_fonts(page_id)
            .map_err(|e| Error::page(page_num, e))?;

        let data = self
            .backend
            .page_content(page_id)
            .map_err(|e| Error::page(page_num, e))?;

        let ops = self
            .backend
            .decode_content(&data)
            .map_err(|e| Error::page(page_num, e))?;

        let mut interpreter = TextInterpreter::new(self.backend, page_id, height, |resource| {
            fonts
                .iter()
                .find(|f| f.name == resource)
                .map(|f| f.base_font.clone())
        });
        interpreter.run(&ops);

        if interpreter.image_ops > 0 {
            log::debug!(
                "Page {}: {} image operations not extracted",
                page_num,
                interpreter.image_ops
            );
        }

        let mut page = PageContent::new(page_num, width, height);
        page.runs = interpreter.runs;
        Ok(page)
    }
}

/// 2D affine matrix [a b c d e f].
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_op(op: &ContentOp) -> Self {
        Self {
            a: op.number(0, 1.0),
            b: op.number(1, 0.0),
            c: op.number(2, 0.0),
            d: op.number(3, 1.0),
            e: op.number(4, 0.0),
            f: op.number(5, 0.0),
        }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other`
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Content stream interpreter state for text operators.
struct TextInterpreter<'a, B: PdfBackend + ?Sized, R: Fn(&[u8]) -> Option<String>> {
    backend: &'a B,
    page_id: PageId,
    page_height: f32,
    resolve_font: R,
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font_resource: Vec<u8>,
    /// Decoders resolved so far on this page, keyed by font resource name
    decoders: HashMap<Vec<u8>, Box<dyn FontDecoder + 'a>>,
    font_name: String,
    font_size: f32,
    in_text_block: bool,
    runs: Vec<TextRun>,
    image_ops: usize,
}

impl<'a, B, R> TextInterpreter<'a, B, R>
where
    B: PdfBackend + ?Sized,
    R: Fn(&[u8]) -> Option<String>,
{
    fn new(backend: &'a B, page_id: PageId, page_height: f32, resolve_font: R) -> Self {
        Self {
            backend,
            page_id,
            page_height,
            resolve_font,
            ctm: Matrix::IDENTITY,
            ctm_stack: Vec::new(),
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font_resource: Vec::new(),
            decoders: HashMap::new(),
            font_name: String::new(),
            font_size: 12.0,
            in_text_block: false,
            runs: Vec::new(),
            image_ops: 0,
        }
    }

    fn run(&mut self, ops: &[ContentOp]) {
        for op in ops {
            match op.operator.as_str() {
                "q" => self.ctm_stack.push(self.ctm),
                "Q" => {
                    if let Some(ctm) = self.ctm_stack.pop() {
                        self.ctm = ctm;
                    }
                }
                "cm" if op.operands.len() >= 6 => {
                    self.ctm = Matrix::from_op(op).then(&self.ctm);
                }
                "BT" => {
                    self.in_text_block = true;
                    self.text_matrix = Matrix::IDENTITY;
                    self.line_matrix = Matrix::IDENTITY;
                }
                "ET" => self.in_text_block = false,
                "Tf" if op.operands.len() >= 2 => {
                    if let PdfValue::Name(resource) = &op.operands[0] {
                        self.font_name = (self.resolve_font)(resource.as_slice())
                            .unwrap_or_else(|| String::from_utf8_lossy(resource).to_string());
                        let (backend, page_id) = (self.backend, self.page_id);
                        self.decoders
                            .entry(resource.clone())
                            .or_insert_with(|| backend.font_decoder(page_id, resource));
                        self.font_resource = resource.clone();
                    }
                    self.font_size = op.number(1, 12.0);
                }
                "TL" => self.leading = op.number(0, 0.0),
                "Td" if op.operands.len() >= 2 => {
                    self.move_line(op.number(0, 0.0), op.number(1, 0.0));
                }
                "TD" if op.operands.len() >= 2 => {
                    let ty = op.number(1, 0.0);
                    self.leading = -ty;
                    self.move_line(op.number(0, 0.0), ty);
                }
                "Tm" if op.operands.len() >= 6 => {
                    self.line_matrix = Matrix::from_op(op);
                    self.text_matrix = self.line_matrix;
                }
                "T*" => self.next_line(),
                "Tj" => {
                    if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                        let text = self.decode(bytes);
                        self.show(text);
                    }
                }
                "TJ" => {
                    if let Some(PdfValue::Array(items)) = op.operands.first() {
                        let text = self.decode_array(items);
                        self.show(text);
                    }
                }
                "'" => {
                    self.next_line();
                    if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                        let text = self.decode(bytes);
                        self.show(text);
                    }
                }
                "\"" => {
                    self.next_line();
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                        let text = self.decode(bytes);
                        self.show(text);
                    }
                }
                "Do" | "BI" => self.image_ops += 1,
                _ => {}
            }
        }
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).then(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        // Unset leading falls back to single spacing
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    /// Decode with the current font, or the fallback before any `Tf`.
    fn decode(&self, bytes: &[u8]) -> String {
        match self.decoders.get(&self.font_resource) {
            Some(decoder) => decoder.decode(bytes),
            None => decode_text_simple(bytes),
        }
    }

    /// Decode a TJ array; large negative adjustments become word spaces.
    fn decode_array(&self, items: &[PdfValue]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                PdfValue::Str(bytes) => combined.push_str(&self.decode(bytes)),
                other => {
                    let adjustment = -other.as_number().unwrap_or(0.0);
                    let needs_space = adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if needs_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }

    fn show(&mut self, text: String) {
        if !self.in_text_block {
            return;
        }

        let char_count = text.chars().count() as f32;
        if !text.trim().is_empty() {
            let placed = self.text_matrix.then(&self.ctm);
            let size = self.font_size * placed.vertical_scale();
            let text: String = text.nfc().collect();
            let y = self.page_height - placed.f;
            self.runs
                .push(TextRun::new(text, placed.e, y, size, &self.font_name));
        }

        let advance = char_count * self.font_size * GLYPH_ADVANCE;
        self.text_matrix = Matrix::translation(advance, 0.0).then(&self.text_matrix);
    }
}
