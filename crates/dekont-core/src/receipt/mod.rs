//! Receipt understanding: classification and per-bank field extraction.

pub mod banks;
mod classifier;
mod dispatcher;
pub mod rules;

pub use classifier::classify;
pub use dispatcher::{ReceiptDispatcher, extract_receipt};

use crate::models::record::{FormatTag, TransactionRecord};

/// Field extraction for one receipt layout.
///
/// Implementations are total: a pattern that does not match leaves the
/// corresponding field at its neutral value.
pub trait ReceiptStrategy: Send + Sync {
    /// Layout this strategy handles.
    fn tag(&self) -> FormatTag;

    /// Short name recorded in diagnostics.
    fn name(&self) -> &'static str;

    /// Extract a record from normalized receipt text.
    fn extract(&self, text: &str) -> TransactionRecord;
}
