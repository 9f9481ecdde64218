//! Cleanup of person and company names captured from receipts.

use lazy_static::lazy_static;
use regex::Regex;

use super::patterns::WHITESPACE_RUN;

/// Longest name kept, in whitespace-separated tokens.
const MAX_NAME_TOKENS: usize = 8;

lazy_static! {
    static ref MASK_PAIR: Regex = Regex::new(r"\*{2,}\s*/\s*\*{2,}").unwrap();
    static ref MASK_RUN: Regex = Regex::new(r"\*{2,}").unwrap();
    static ref CUSTOMER_NUMBER: Regex = Regex::new(
        r"(?i)\bM[ÜU][ŞS]TER[İIı](?:\s*NUMARASI|\s*NO)?\s*[:\-]?\s*\d+\b"
    ).unwrap();
    static ref ID_LABEL: Regex = Regex::new(
        r"(?i)\b(?:TCKN|TC|VKN|SIRA\s*NO|SIRA)\b\s*[:\-]?\s*[\w\-/]*\d[\w\-/]*"
    ).unwrap();
    static ref LEADING_RESIDUE: Regex = Regex::new(r"^[\*\s/\-\d]+").unwrap();
    static ref ACCOUNT_TOKEN: Regex = Regex::new(r"\b\d{2,6}\s*/\s*\d{3,10}\b").unwrap();
    static ref ADDRESS_KEYWORD: Regex = Regex::new(
        r"(?i)\b(?:MAH|SOK|CAD|SK|NO|KAPI|BULVAR|BLV|APT|DA[İIı]RE)\b"
    ).unwrap();
    static ref IBAN_TAIL: Regex = Regex::new(r"(?i)\bIBAN\b").unwrap();
    static ref TRAILING_PUNCT: Regex = Regex::new(r"[\s,.;:/\-]+$").unwrap();

    static ref LABEL_SUFFIX: Regex = Regex::new(
        r"(?i)\b(?:TC\s+K[İIı]ML[İIı]K(?:\s+NUMARASI)?|S[İIı]C[İIı]L(?:\s+NUMARASI)?)\b.*$"
    ).unwrap();
    static ref TRAILING_SEPARATORS: Regex = Regex::new(r"[,:;/]+$").unwrap();

    static ref TRAILING_JUNK: Regex = Regex::new(r"[^\w\s.]+$").unwrap();
    static ref DANGLING_LETTER: Regex = Regex::new(r"\s+\p{Lu}$").unwrap();
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Clean a captured name field.
///
/// Removes masking asterisks, customer/ID numbers, account tokens, address
/// tails and anything after `IBAN`, then keeps at most eight tokens.
pub fn clean_name(raw: &str) -> String {
    let mut s = collapse_whitespace(raw);
    if s.is_empty() {
        return s;
    }

    s = MASK_PAIR.replace_all(&s, " ").into_owned();
    s = MASK_RUN.replace_all(&s, " ").into_owned();
    s = CUSTOMER_NUMBER.replace_all(&s, " ").into_owned();
    s = ID_LABEL.replace_all(&s, " ").into_owned();
    s = LEADING_RESIDUE.replace(&s, "").into_owned();
    s = ACCOUNT_TOKEN.replace_all(&s, " ").into_owned();

    if let Some(m) = ADDRESS_KEYWORD.find(&s) {
        s.truncate(m.start());
    }
    if let Some(m) = IBAN_TAIL.find(&s) {
        s.truncate(m.start());
    }

    let tokens: Vec<&str> = s.split_whitespace().take(MAX_NAME_TOKENS).collect();
    let joined = tokens.join(" ");
    let trimmed = TRAILING_PUNCT.replace(&joined, "");
    let cleaned = LEADING_RESIDUE.replace(&trimmed, "");
    collapse_whitespace(&cleaned)
}

/// Drop trailing `TC KİMLİK…`/`SİCİL…` tails and dangling separators.
pub fn strip_label_suffix(raw: &str) -> String {
    let s = collapse_whitespace(raw);
    let s = LABEL_SUFFIX.replace(&s, "");
    let s = TRAILING_SEPARATORS.replace(s.trim(), "");
    s.trim().to_string()
}

/// Drop trailing junk characters and a dangling single-letter token.
///
/// Handles names cut mid-word at a column edge, e.g. `AHMET YILMAZ G`.
pub fn trim_fragment(raw: &str) -> String {
    let s = raw.trim();
    let s = TRAILING_JUNK.replace(s, "");
    let s = DANGLING_LETTER.replace(&s, "");
    s.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean_name_masks_and_numbers() {
        assert_eq!(clean_name("**/** AHMET YILMAZ"), "AHMET YILMAZ");
        assert_eq!(clean_name("AHMET YILMAZ MÜŞTERİ NO: 12345678"), "AHMET YILMAZ");
        assert_eq!(clean_name("AYŞE KAYA TCKN: 12345678901"), "AYŞE KAYA");
        assert_eq!(clean_name("1234/5678901 MEHMET DEMİR"), "MEHMET DEMİR");
        assert_eq!(clean_name("ACME LTD 0123/4567890 ŞTİ"), "ACME LTD ŞTİ");
    }

    #[test]
    fn test_clean_name_cuts_address_and_iban() {
        assert_eq!(clean_name("ALİ VELİ ATATÜRK MAH. 12 SOK"), "ALİ VELİ ATATÜRK");
        assert_eq!(clean_name("ALİ VELİ IBAN TR12 0001"), "ALİ VELİ");
        assert_eq!(clean_name("NOYAN ÇELİK"), "NOYAN ÇELİK");
    }

    #[test]
    fn test_clean_name_truncates_tokens() {
        assert_eq!(
            clean_name("A B C D E F G H I J"),
            "A B C D E F G H"
        );
    }

    #[test]
    fn test_clean_name_is_idempotent() {
        for raw in [
            "",
            "  ***  ",
            "**/** AHMET YILMAZ, ",
            "TC 12345678901 - ZEYNEP ÖZ /",
            "ÖRNEK GIDA SANAYİ VE TİCARET ANONİM ŞİRKETİ İSTANBUL ŞUBESİ MERKEZ",
            "12 34 ALİ ** VELİ 1234/56789 NO: 5",
            "SIRAÇ YILDIZ",
        ] {
            let once = clean_name(raw);
            assert_eq!(clean_name(&once), once, "{raw:?}");
        }
    }

    #[test]
    fn test_clean_name_keeps_words_starting_like_labels() {
        assert_eq!(clean_name("SIRAÇ YILDIZ"), "SIRAÇ YILDIZ");
        assert_eq!(clean_name("TCHAIKOVSKY MÜZİK"), "TCHAIKOVSKY MÜZİK");
    }

    #[test]
    fn test_strip_label_suffix() {
        assert_eq!(strip_label_suffix("ECE BİÇER TC KİMLİK NUMARASI 123"), "ECE BİÇER");
        assert_eq!(strip_label_suffix("ECE BİÇER SİCİL 99"), "ECE BİÇER");
        assert_eq!(strip_label_suffix("ECE BİÇER,"), "ECE BİÇER");
    }

    #[test]
    fn test_trim_fragment() {
        assert_eq!(trim_fragment("AHMET YILMAZ G"), "AHMET YILMAZ");
        assert_eq!(trim_fragment("AHMET YILMAZ ##"), "AHMET YILMAZ");
        assert_eq!(trim_fragment("ACME A.Ş."), "ACME A.Ş.");
    }
}
