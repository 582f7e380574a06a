//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for PDF operations, isolating
//! the concrete PDF library (lopdf) from the extraction logic.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Encoding, Object, ObjectId};

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// US Letter, used when a page has no usable MediaBox.
pub const DEFAULT_PAGE_SIZE: (f32, f32) = (612.0, 792.0);

/// Font information returned by the backend.
#[derive(Debug, Clone)]
pub struct BackendFontInfo {
    /// Font resource name (key in the page's font dictionary).
    pub name: Vec<u8>,
    /// Base font name (e.g., "Helvetica-Bold").
    pub base_font: String,
}

/// A value from a PDF content stream operand.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfValue {
    Integer(i64),
    Real(f32),
    Name(Vec<u8>),
    Str(Vec<u8>),
    Array(Vec<PdfValue>),
    Other,
}

impl PdfValue {
    /// Numeric value of an integer or real operand.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            PdfValue::Integer(i) => Some(*i as f32),
            PdfValue::Real(r) => Some(*r),
            _ => None,
        }
    }
}

/// A single operation from a PDF content stream.
#[derive(Debug, Clone)]
pub struct ContentOp {
    pub operator: String,
    pub operands: Vec<PdfValue>,
}

impl ContentOp {
    /// Build an operation from an operator and operands.
    pub fn new(operator: &str, operands: Vec<PdfValue>) -> Self {
        Self {
            operator: operator.to_string(),
            operands,
        }
    }

    /// Numeric operand at `index`, or `default` when absent or not a number.
    pub fn number(&self, index: usize, default: f32) -> f32 {
        self.operands
            .get(index)
            .and_then(PdfValue::as_number)
            .unwrap_or(default)
    }
}

/// Abstract interface for PDF document access.
///
/// Implementations provide page enumeration, page geometry, font info,
/// content stream decoding and text decoding without exposing any concrete
/// PDF library types.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId).
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Return (width, height) of a page in points.
    fn page_size(&self, page: PageId) -> Result<(f32, f32)>;

    /// Return font info for a given page.
    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>>;

    /// Return the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page: PageId) -> Result<Vec<u8>>;

    /// Parse raw content stream bytes into a sequence of operations.
    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>>;

    /// Resolve the decoder for a font resource on the given page.
    ///
    /// Resolving may parse the font's encoding or ToUnicode CMap, so callers
    /// keep the decoder for every string shown with that font. Fonts without
    /// a usable encoding get a [`FallbackDecoder`].
    fn font_decoder<'d>(&'d self, page: PageId, font_name: &[u8]) -> Box<dyn FontDecoder + 'd>;
}

/// Turns string operands shown with one font into text.
pub trait FontDecoder {
    /// Decode the bytes of a string operand.
    fn decode(&self, bytes: &[u8]) -> String;
}

/// Decoder for fonts whose encoding is unknown; see [`decode_text_simple`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackDecoder;

impl FontDecoder for FallbackDecoder {
    fn decode(&self, bytes: &[u8]) -> String {
        decode_text_simple(bytes)
    }
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    // Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

// ---------------------------------------------------------------------------
// LopdfBackend: concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Parse(e.to_string()),
        })?;

        if doc.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }

        Ok(Self { doc })
    }

    /// Direct access to the underlying `lopdf::Document`.
    ///
    /// Escape hatch for operations not covered by `PdfBackend`
    /// (metadata, trailer inspection).
    pub fn raw_doc(&self) -> &LopdfDocument {
        &self.doc
    }

    /// Number of pages in the page tree.
    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn stream_content(&self, id: ObjectId) -> Result<Vec<u8>> {
        match self.doc.get_object(id)? {
            Object::Stream(s) => s
                .decompressed_content()
                .or_else(|_| Ok(s.content.clone())),
            _ => Err(Error::Parse(format!(
                "object {} {} is not a content stream",
                id.0, id.1
            ))),
        }
    }

    /// Look up MediaBox on the page or any ancestor in the page tree.
    fn inherited_media_box(&self, page: PageId) -> Option<Vec<f32>> {
        let mut current = self.doc.get_dictionary(page).ok()?;
        // Depth guard against cyclic Parent links
        for _ in 0..32 {
            if let Ok(media_box) = current.get(b"MediaBox") {
                let array = match media_box {
                    Object::Reference(r) => self.doc.get_object(*r).ok()?.as_array().ok()?,
                    other => other.as_array().ok()?,
                };
                return array.iter().map(|o| o.as_float().ok()).collect();
            }
            let parent = current.get(b"Parent").ok()?.as_reference().ok()?;
            current = self.doc.get_dictionary(parent).ok()?;
        }
        None
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_size(&self, page: PageId) -> Result<(f32, f32)> {
        self.doc.get_dictionary(page)?;

        match self.inherited_media_box(page) {
            Some(b) if b.len() >= 4 => {
                let width = (b[2] - b[0]).abs();
                let height = (b[3] - b[1]).abs();
                if width > 0.0 && height > 0.0 {
                    Ok((width, height))
                } else {
                    Ok(DEFAULT_PAGE_SIZE)
                }
            }
            _ => Ok(DEFAULT_PAGE_SIZE),
        }
    }

    fn page_fonts(&self, page: PageId) -> Result<Vec<BackendFontInfo>> {
        let lopdf_fonts = self.doc.get_page_fonts(page)?;

        let mut result = Vec::with_capacity(lopdf_fonts.len());
        for (name, font_dict) in &lopdf_fonts {
            let base_font = font_dict
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
            result.push(BackendFontInfo {
                name: name.clone(),
                base_font,
            });
        }
        Ok(result)
    }

    fn page_content(&self, page_id: PageId) -> Result<Vec<u8>> {
        let page_dict = self.doc.get_dictionary(page_id)?;

        // A page without Contents is blank, not broken
        let contents = match page_dict.get(b"Contents") {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r)? {
                Object::Array(arr) => self.concat_streams(arr),
                _ => self.stream_content(*r),
            },
            Object::Array(arr) => self.concat_streams(arr),
            _ => Err(Error::Parse("invalid Contents entry".to_string())),
        }
    }

    fn decode_content(&self, data: &[u8]) -> Result<Vec<ContentOp>> {
        let content = lopdf::content::Content::decode(data)?;

        Ok(content
            .operations
            .into_iter()
            .map(|op| ContentOp {
                operator: op.operator,
                operands: op.operands.iter().map(convert_object).collect(),
            })
            .collect())
    }

    fn font_decoder<'d>(&'d self, page: PageId, font_name: &[u8]) -> Box<dyn FontDecoder + 'd> {
        let encoding = self
            .doc
            .get_page_fonts(page)
            .ok()
            .and_then(|fonts| fonts.get(font_name).copied())
            .and_then(|font_dict| font_dict.get_font_encoding(&self.doc).ok());

        match encoding {
            Some(encoding) => Box::new(EncodingDecoder { encoding }),
            None => {
                log::debug!(
                    "No encoding for font {}; using fallback decoding",
                    String::from_utf8_lossy(font_name)
                );
                Box::new(FallbackDecoder)
            }
        }
    }
}

/// Decoder holding a font encoding resolved by lopdf.
struct EncodingDecoder<'d> {
    encoding: Encoding<'d>,
}

impl FontDecoder for EncodingDecoder<'_> {
    fn decode(&self, bytes: &[u8]) -> String {
        LopdfDocument::decode_text(&self.encoding, bytes)
            .unwrap_or_else(|_| decode_text_simple(bytes))
    }
}

impl LopdfBackend {
    fn concat_streams(&self, refs: &[Object]) -> Result<Vec<u8>> {
        let mut content = Vec::new();
        for obj in refs {
            let id = obj.as_reference()?;
            content.extend_from_slice(&self.stream_content(id)?);
            content.push(b'\n');
        }
        Ok(content)
    }
}

/// Convert a `lopdf::Object` to [`PdfValue`].
fn convert_object(obj: &Object) -> PdfValue {
    match obj {
        Object::Integer(i) => PdfValue::Integer(*i),
        Object::Real(r) => PdfValue::Real(*r),
        Object::Name(n) => PdfValue::Name(n.clone()),
        Object::String(b, _) => PdfValue::Str(b.clone()),
        Object::Array(arr) => PdfValue::Array(arr.iter().map(convert_object).collect()),
        _ => PdfValue::Other,
    }
}
