//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::{DekontError, PdfError};
use crate::models::config::PdfConfig;

/// PDF text extractor backed by lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    max_pages: usize,
}

impl PdfExtractor {
    /// Create a new PDF extractor with default limits.
    pub fn new() -> Self {
        Self::with_config(&PdfConfig::default())
    }

    /// Create an extractor using the given limits.
    pub fn with_config(config: &PdfConfig) -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            max_pages: config.max_pages,
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        let mut rewritten = false;

        // Bank receipts are often "encrypted" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
            rewritten = true;
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        if self.max_pages > 0 && page_count > self.max_pages {
            let extra: Vec<u32> = ((self.max_pages as u32 + 1)..=page_count as u32).collect();
            doc.delete_pages(&extra);
            debug!("Dropped {} pages beyond the limit of {}", extra.len(), self.max_pages);
            rewritten = true;
        }

        // pdf-extract reads bytes, so hand it the decrypted/trimmed document
        if rewritten {
            let mut buffer = Vec::new();
            doc.save_to(&mut buffer)
                .map_err(|e| PdfError::Parse(format!("Failed to save rewritten PDF: {}", e)))?;
            self.raw_data = buffer;
        } else {
            self.raw_data = data.to_vec();
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Read a receipt PDF from disk and return its text.
///
/// This is the boundary of the pipeline: a missing file, an unreadable PDF
/// or a PDF without a text layer is an error here and never reaches the
/// extractor.
pub fn read_receipt_text(path: &Path, config: &PdfConfig) -> crate::Result<String> {
    let data = std::fs::read(path)?;

    let mut extractor = PdfExtractor::with_config(config);
    extractor.load(&data)?;

    let text = extractor.extract_text()?;
    if text.trim().chars().count() < config.min_text_length {
        return Err(DekontError::Pdf(PdfError::Empty));
    }

    debug!(
        "Extracted {} chars from {} pages of {}",
        text.len(),
        extractor.page_count(),
        path.display()
    );
    Ok(text)
}
