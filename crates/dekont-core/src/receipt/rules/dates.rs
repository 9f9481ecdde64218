//! Transaction date capture.

use regex::Regex;

use super::labels::first_capture;
use super::patterns::DATE_DMY;
use super::FieldExtractor;

/// Rewrite `/` separators to `.`, giving `DD.MM.YYYY`.
pub fn normalize_date(raw: &str) -> String {
    raw.trim().replace('/', ".")
}

/// First date captured by `patterns`, normalized.
pub fn capture_date(patterns: &[&Regex], text: &str) -> Option<String> {
    first_capture(patterns, text).map(|raw| normalize_date(&raw))
}

/// Finds bare `DD.MM.YYYY` / `DD/MM/YYYY` dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for DateExtractor {
    type Output = String;

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE_DMY
            .captures_iter(text)
            .map(|caps| format!("{}.{}.{}", &caps[1], &caps[2], &caps[3]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_date() {
        let found = DateExtractor::new().extract("Basım 01/12/2025, işlem 30.11.2025");
        assert_eq!(found, Some("01.12.2025".to_string()));
    }

    #[test]
    fn test_ignores_longer_digit_runs() {
        assert!(DateExtractor::new().extract("123.45.678901").is_none());
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date(" 04/11/2025 "), "04.11.2025");
    }
}
