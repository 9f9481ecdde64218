//! IBAN capture.

use regex::Regex;

use super::FieldExtractor;
use super::labels::first_capture;
use super::patterns::{IBAN_LOOSE, IBAN_RUN};
use crate::models::record::TR_IBAN_LEN;

/// Remove every whitespace character from a captured IBAN.
pub fn compact_iban(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// First labeled IBAN among `patterns`, whitespace removed.
pub fn capture_iban(patterns: &[&Regex], text: &str) -> Option<String> {
    first_capture(patterns, text)
        .map(|raw| compact_iban(&raw))
        .filter(|iban| !iban.is_empty())
}

/// Finds every `TR…` digit run in a text.
///
/// Runs are compacted and cut at [`TR_IBAN_LEN`], so digits from a
/// neighbouring field never extend an IBAN.
#[derive(Debug, Clone, Copy)]
pub struct IbanExtractor {
    pattern: &'static Regex,
}

impl IbanExtractor {
    /// `TR`, a digit, then 20 to 34 digits or spaces.
    pub fn new() -> Self {
        Self { pattern: &IBAN_RUN }
    }

    /// Case-insensitive `TR` followed by 10 to 34 digits or spaces.
    ///
    /// Catches IBANs split across two lines, whose first half is short.
    pub fn loose() -> Self {
        Self {
            pattern: &IBAN_LOOSE,
        }
    }
}

impl Default for IbanExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IbanExtractor {
    type Output = String;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                let mut iban = compact_iban(m.as_str()).to_uppercase();
                iban.truncate(TR_IBAN_LEN);
                iban
            })
            .collect()
    }
}
