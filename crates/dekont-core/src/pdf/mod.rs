//! PDF text extraction.
//!
//! The receipt pipeline only consumes text. This module turns PDF bytes into
//! that text blob; scanned (image-only) receipts have no text layer and are
//! rejected at the boundary with [`PdfError::Empty`].

mod extractor;

pub use extractor::{PdfExtractor, read_receipt_text};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from the entire PDF, pages separated by newlines.
    fn extract_text(&self) -> Result<String>;
}
