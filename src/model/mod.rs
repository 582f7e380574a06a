//! Document model types for the PDF to Word pipeline.
//!
//! Extraction produces [`ExtractedContent`], layout analysis turns it into
//! [`ProcessedParagraph`]s, and assembly emits a [`StructuredDocument`].
//! All types are plain values created and consumed within one conversion.

mod block;
mod content;
mod metadata;
mod paragraph;

pub use block::{Block, StructuredDocument};
pub(crate) use content::is_spaceless_script_char;
pub use content::{ExtractedContent, ImageItem, PageContent, TextRun};
pub use metadata::Metadata;
pub use paragraph::{
    Formatting, HeadingLevel, ListKind, PageParagraphs, ParagraphKind, ProcessedParagraph,
};
