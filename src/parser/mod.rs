//! PDF reading: backend access, positioned text extraction and metadata.

pub mod backend;
mod extractor;
mod metadata;

pub use backend::{FallbackDecoder, FontDecoder, LopdfBackend, PdfBackend};
pub use extractor::PageExtractor;
pub use metadata::{parse_pdf_date, read_metadata};
