//! Pluggable diagnostics for the extraction pipeline.
//!
//! The dispatcher reports what it did to a [`DiagnosticsSink`]. The default
//! sink discards everything, so the core keeps no global state; callers that
//! want a trace pass [`TracingSink`] or collect events with
//! [`CollectingSink`].

use std::sync::Mutex;

use tracing::debug;

use crate::error::ExtractionIssue;
use crate::models::record::FormatTag;

/// Something the dispatcher observed while processing one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Input normalized; lengths are in characters.
    Normalized { raw_length: usize, normalized_length: usize },
    /// Classifier result.
    Classified { tag: FormatTag },
    /// Strategy selected for the tag.
    StrategySelected { tag: FormatTag, strategy: &'static str },
    /// A non-fatal issue.
    Issue(ExtractionIssue),
    /// Record assembled.
    Completed { tag: FormatTag, missing_fields: usize },
}

/// Receiver of pipeline diagnostics.
pub trait DiagnosticsSink: Send + Sync {
    fn record(&self, event: &DiagnosticEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticsSink for NoopSink {
    fn record(&self, _event: &DiagnosticEvent) {}
}

/// Sink that forwards events to `tracing` at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::Normalized {
                raw_length,
                normalized_length,
            } => debug!("normalized {} chars into {}", raw_length, normalized_length),
            DiagnosticEvent::Classified { tag } => debug!("classified receipt as {}", tag),
            DiagnosticEvent::StrategySelected { tag, strategy } => {
                debug!("using {} strategy for {}", strategy, tag)
            }
            DiagnosticEvent::Issue(issue) => debug!("{}", issue),
            DiagnosticEvent::Completed {
                tag,
                missing_fields,
            } => debug!("{} receipt done, {} fields missing", tag, missing_fields),
        }
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticsSink for CollectingSink {
    fn record(&self, event: &DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
