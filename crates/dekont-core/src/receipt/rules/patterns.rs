//! Regex patterns shared by several receipt layouts.
//!
//! Turkish dotted/dotless I does not case-fold in `regex`, so labels spell
//! it as the class `[İIıi]` instead of relying on `(?i)`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dates
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{2})[./](\d{2})[./](\d{4})\b"
    ).unwrap();

    pub static ref DATE_ANY: Regex = Regex::new(
        r"\b(\d{2}[./]\d{2}[./]\d{4})\b"
    ).unwrap();

    pub static ref DATE_WITH_TIME: Regex = Regex::new(
        r"(\d{2}[./]\d{2}[./]\d{4})\s+[0-2]\d:[0-5]\d"
    ).unwrap();

    pub static ref TRANSACTION_DATE: Regex = Regex::new(
        r"(?i)[İIıi][ŞS]LEM\s*TAR[İIıi]H[İIıi](?:\s*/\s*SAAT[İIıi])?(?:\s+VE\s+SAAT[İIıi])?\s*:?\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();

    pub static ref ANY_DATE_LABEL: Regex = Regex::new(
        r"(?i)\bTAR[İIıi]H[İIıi]?\s*:?\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();

    // IBANs: a run of digits and single spaces after the TR prefix
    pub static ref IBAN_RUN: Regex = Regex::new(
        r"TR[0-9][0-9 ]{20,34}"
    ).unwrap();

    pub static ref IBAN_LOOSE: Regex = Regex::new(
        r"(?i)TR[0-9 ]{10,34}"
    ).unwrap();

    pub static ref IBAN_LABELED: Regex = Regex::new(
        r"IBAN\s*:?\s*(TR[0-9 ]{20,34})"
    ).unwrap();

    pub static ref IBAN_MASKED: Regex = Regex::new(
        r"TR[0-9 ]*\*+"
    ).unwrap();

    pub static ref DIGITS_ONLY_LINE: Regex = Regex::new(
        r"^[0-9 ]+$"
    ).unwrap();

    // Amounts
    pub static ref AMOUNT_BEFORE_TL: Regex = Regex::new(
        r"([0-9][0-9.,]*)\s*TL\b"
    ).unwrap();

    // Names on greeting lines ("Sayın AHMET YILMAZ")
    pub static ref SAYIN_LINE: Regex = Regex::new(
        r"(?i)SAYIN\s+([^\n\r]+)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_date_variants() {
        for text in [
            "İşlem Tarihi: 04.11.2025",
            "İŞLEM TARİHİ : 04/11/2025",
            "ISLEM TARIHI 04.11.2025",
            "İşlem tarihi ve saati :04.11.2025 12:58",
            "İşlem Tarihi/Saati : 04.11.2025 - 10:11",
        ] {
            let caps = TRANSACTION_DATE.captures(text).expect(text);
            assert_eq!(&caps[1].replace('/', "."), "04.11.2025", "{text}");
        }
    }

    #[test]
    fn test_iban_run_stops_at_letters() {
        let m = IBAN_RUN
            .find("IBAN: TR33 0006 1005 1978 6457 8413 26 ALICI")
            .unwrap();
        assert_eq!(m.as_str().trim(), "TR33 0006 1005 1978 6457 8413 26");
    }

    #[test]
    fn test_masked_iban() {
        assert!(IBAN_MASKED.is_match("TR12 0006 **** **** 1234"));
        assert!(!IBAN_MASKED.is_match("TR12 0006 1234 5678 1234"));
    }
}
