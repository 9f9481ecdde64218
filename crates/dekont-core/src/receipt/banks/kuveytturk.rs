//! Kuveyt Türk receipts.
//!
//! Text extracted from these PDFs usually has no spaces between label and
//! value (`GönderenKişi`, `İşlemTarihi`), and long names wrap mid-word.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    capture_iban, first_capture, parse_turkish_amount, turkish_upper,
};

/// Lines a wrapped name may span.
const NAME_MAX_LINES: usize = 4;

lazy_static! {
    static ref SENDER_START: Regex = Regex::new(r"(?i)^G[ÖO]NDERENK[İIıi][ŞS][İIıi]\s*(.*)$").unwrap();
    static ref RECEIVER_START: Regex = Regex::new(r"(?i)^AL[Iıi]C[Iıi]\s*(.*)$").unwrap();
    static ref RECEIVER_END: Regex = Regex::new(r"(?i)^G[ÖO]NDER[İIıi]LEN\s*IBAN").unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(
        r"(?i)G[ÖO]NDER[İIıi]LEN\s*IBAN\s*(TR[0-9 ]+)"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"(?i)Tutar\s*([\d.,]+)").unwrap();
    static ref DATE: Regex = Regex::new(r"(?i)[İIi][şs]lem\s*Tar[İIıi]h[İIıi]\s*([0-9.]+)").unwrap();
}

/// Join the value after `start` with up to [`NAME_MAX_LINES`] lines, stopping
/// before the first line matching `end`. Wrapped pieces are glued without a
/// separator.
fn wrapped_value(lines: &[&str], start: &Regex, end: &Regex) -> String {
    let Some((index, head)) = lines
        .iter()
        .enumerate()
        .find_map(|(i, line)| start.captures(line).map(|caps| (i, caps)))
    else {
        return String::new();
    };

    let mut value = head.get(1).map_or("", |m| m.as_str()).trim().to_string();
    for line in lines.iter().skip(index + 1).take(NAME_MAX_LINES - 1) {
        if end.is_match(line) {
            break;
        }
        value.push_str(line);
    }
    value.trim().to_string()
}

/// Re-dot an 8 digit `ddmmyyyy` date.
fn normalize_glued_date(raw: &str) -> String {
    let raw = raw.trim_matches('.');
    if raw.len() == 8 && raw.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}.{}.{}", &raw[0..2], &raw[2..4], &raw[4..])
    } else {
        raw.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KuveytTurkStrategy;

impl ReceiptStrategy for KuveytTurkStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::KuveytTurk
    }

    fn name(&self) -> &'static str {
        "kuveytturk"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        record.transfer_kind.is_fast = true;
        record.transfer_kind.is_outgoing = true;

        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        record.sender.name = turkish_upper(&wrapped_value(&lines, &SENDER_START, &RECEIVER_START));
        record.receiver.name = turkish_upper(&wrapped_value(&lines, &RECEIVER_START, &RECEIVER_END));
        record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();

        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_turkish_amount(&raw));
        record.transaction_date = first_capture(&[&DATE], text)
            .map(|raw| normalize_glued_date(&raw))
            .unwrap_or_default();

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const GLUED: &str = "KUVEYTTÜRK
İşlemTarihi 07.11.2025
GönderenKişi AHMET YIL
MAZ
Alici MEHMET
DEMİR
GönderilenIBAN TR45 0020 5000 0001 2345 6789 01
Tutar 2.500,00";

    #[test]
    fn test_glued_layout() {
        let record = KuveytTurkStrategy.extract(GLUED);

        assert!(record.transfer_kind.is_fast);
        assert!(record.transfer_kind.is_outgoing);
        assert_eq!(record.sender.name, "AHMET YILMAZ");
        assert_eq!(record.receiver.name, "MEHMETDEMİR");
        assert_eq!(record.receiver.iban, "TR450020500000012345678901");
        assert_eq!(record.amount, Some(Decimal::new(250000, 2)));
        assert_eq!(record.transaction_date, "07.11.2025");
    }

    #[test]
    fn test_bare_digit_date() {
        assert_eq!(normalize_glued_date("07112025"), "07.11.2025");
        assert_eq!(normalize_glued_date("07.11.2025"), "07.11.2025");
    }

    #[test]
    fn test_name_lookahead_is_bounded() {
        let text = "GönderenKişi A\nB\nC\nD\nE\nF";
        let record = KuveytTurkStrategy.extract(text);
        assert_eq!(record.sender.name, "ABCD");
    }
}
