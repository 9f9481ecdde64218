//! Error types for the dekont-core library.
//!
//! Only boundary failures live here. Problems inside the extraction pipeline
//! (unknown layout, missing fields, unparseable amounts) are never errors;
//! they degrade to neutral field values and are reported as
//! [`ExtractionIssue`]s.

use std::fmt;

use thiserror::Error;

/// Main error type for the dekont library.
#[derive(Error, Debug)]
pub enum DekontError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// The PDF has pages but no extractable text (scanned receipt).
    #[error("PDF contains no extractable text")]
    Empty,
}

/// Non-fatal issues met while extracting a single receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionIssue {
    /// No bank predicate matched; the generic strategy was used.
    ClassificationMiss,
    /// A field's patterns did not match; the field keeps its neutral value.
    FieldMiss(&'static str),
}

impl fmt::Display for ExtractionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionIssue::ClassificationMiss => {
                write!(f, "bank not recognized, used generic extraction")
            }
            ExtractionIssue::FieldMiss(field) => write!(f, "could not extract {field}"),
        }
    }
}

/// Result type for the dekont library.
pub type Result<T> = std::result::Result<T, DekontError>;
