//! Helpers for label-driven field capture.

use regex::Regex;

/// Run candidate patterns in order; return the first non-empty group 1.
///
/// Later patterns are never tried once an earlier one produced a value.
pub fn first_capture(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Cut `s` at the earliest occurrence of any stop word.
pub fn cut_at_any<'a>(s: &'a str, stops: &[&str]) -> &'a str {
    let end = stops
        .iter()
        .filter_map(|stop| s.find(stop))
        .min()
        .unwrap_or(s.len());
    s[..end].trim()
}

/// True when `haystack` contains any of `needles`.
pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Trimmed, non-empty lines of `text`.
pub fn non_empty_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_capture_respects_order() {
        let labeled = Regex::new(r"TUTAR\s*:\s*(\S+)").unwrap();
        let loose = Regex::new(r"(\d+)\s*TL").unwrap();
        let text = "99 TL\nTUTAR: 10";

        assert_eq!(first_capture(&[&labeled, &loose], text), Some("10".to_string()));
        assert_eq!(first_capture(&[&loose, &labeled], text), Some("99".to_string()));
        assert_eq!(first_capture(&[&labeled], "nothing"), None);
    }

    #[test]
    fn test_cut_at_any() {
        assert_eq!(cut_at_any("ALİ VELİ AÇIKLAMA: kira", &["AÇIKLAMA", "IBAN"]), "ALİ VELİ");
        assert_eq!(cut_at_any("ALİ IBAN x AÇIKLAMA", &["AÇIKLAMA", "IBAN"]), "ALİ");
        assert_eq!(cut_at_any("ALİ", &["IBAN"]), "ALİ");
    }

    #[test]
    fn test_non_empty_lines() {
        assert_eq!(non_empty_lines(" a \n\n b\n"), vec!["a", "b"]);
    }
}
