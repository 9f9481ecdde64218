//! Core library for Turkish bank receipt (dekont) processing.
//!
//! This crate provides:
//! - PDF text extraction (the text blob the pipeline consumes)
//! - Text normalization and bank/format classification
//! - Per-bank field extraction (sender, receiver, IBANs, amount, date, transfer kind)
//! - The transaction record model and pipeline configuration

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod pdf;
pub mod receipt;

pub use diagnostics::{CollectingSink, DiagnosticEvent, DiagnosticsSink, NoopSink, TracingSink};
pub use error::{DekontError, Result};
pub use models::config::DekontConfig;
pub use models::record::{Diagnostics, FormatTag, Party, TransactionRecord, TransferKind};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use receipt::{ReceiptDispatcher, ReceiptStrategy, classify, extract_receipt};
