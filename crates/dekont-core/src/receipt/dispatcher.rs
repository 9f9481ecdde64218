//! Receipt pipeline: normalize, classify, run the bank strategy, finalize.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::diagnostics::{DiagnosticEvent, DiagnosticsSink, NoopSink};
use crate::error::ExtractionIssue;
use crate::models::config::ExtractionConfig;
use crate::models::record::{FormatTag, Party, TransactionRecord};

use super::banks::strategy_for;
use super::classifier::classify;
use super::rules::{normalize_text, turkish_upper};

/// Turns raw receipt text into a [`TransactionRecord`].
///
/// Stateless apart from its configuration and sink; one dispatcher can be
/// shared across threads.
#[derive(Clone)]
pub struct ReceiptDispatcher {
    config: ExtractionConfig,
    sink: Arc<dyn DiagnosticsSink>,
}

impl Default for ReceiptDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReceiptDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptDispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReceiptDispatcher {
    /// Create a dispatcher with default settings and no diagnostics output.
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            sink: Arc::new(NoopSink),
        }
    }

    /// Use the given extraction settings.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Report pipeline events to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Extract transfer fields from the full text of one receipt.
    ///
    /// Never fails: unrecognized layouts and missing fields leave neutral
    /// values and are listed in `diagnostics.warnings`.
    pub fn extract(&self, text: &str) -> TransactionRecord {
        let normalized = normalize_text(text);
        self.sink.record(&DiagnosticEvent::Normalized {
            raw_length: text.chars().count(),
            normalized_length: normalized.chars().count(),
        });

        let tag = classify(&normalized);
        self.sink.record(&DiagnosticEvent::Classified { tag });

        let strategy = strategy_for(tag);
        self.sink.record(&DiagnosticEvent::StrategySelected {
            tag,
            strategy: strategy.name(),
        });
        debug!("extracting {} receipt with {} strategy", tag, strategy.name());

        let mut record = strategy.extract(&normalized);
        self.finalize(&mut record, tag, strategy.name(), &normalized);
        record
    }

    fn finalize(&self, record: &mut TransactionRecord, tag: FormatTag, strategy: &str, text: &str) {
        record.bank = tag;

        if self.config.enforce_iban_shape {
            enforce_iban(&mut record.sender);
            enforce_iban(&mut record.receiver);
        }
        record.sender.name = turkish_upper(record.sender.name.trim());
        record.receiver.name = turkish_upper(record.receiver.name.trim());

        let mut issues = Vec::new();
        if !tag.is_known() {
            issues.push(ExtractionIssue::ClassificationMiss);
        }
        let missing = record.missing_fields();
        issues.extend(missing.iter().copied().map(ExtractionIssue::FieldMiss));

        for issue in &issues {
            trace!("{}: {}", tag, issue);
            self.sink.record(&DiagnosticEvent::Issue(issue.clone()));
        }

        let diagnostics = &mut record.diagnostics;
        diagnostics.source_length = text.chars().count();
        diagnostics.format_tag = tag;
        diagnostics.strategy = strategy.to_string();
        diagnostics.raw_excerpt = text.chars().take(self.config.excerpt_chars).collect();
        diagnostics.warnings = if self.config.record_warnings {
            issues.iter().map(ToString::to_string).collect()
        } else {
            Vec::new()
        };

        self.sink.record(&DiagnosticEvent::Completed {
            tag,
            missing_fields: missing.len(),
        });
        debug!("{} receipt done, {} fields missing", tag, missing.len());
    }
}

/// Keep the IBAN only when it is `TR` followed by digits.
fn enforce_iban(party: &mut Party) {
    if party.iban.is_empty() {
        return;
    }
    let raw = std::mem::take(&mut party.iban);
    party.set_iban(&raw);
    if party.iban.is_empty() {
        debug!("dropped malformed IBAN capture {:?}", raw);
    }
}

/// Extract a record with the default dispatcher.
pub fn extract_receipt(text: &str) -> TransactionRecord {
    ReceiptDispatcher::new().extract(text)
}
