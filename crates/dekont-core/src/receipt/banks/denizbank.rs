//! DenizBank receipts.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    FieldExtractor, IbanExtractor, capture_date, contains_any, first_capture, fold_ascii,
    parse_amount, turkish_upper,
};

/// Lines below the `Adı Soyadı` label that may continue the sender name.
const SENDER_CONTINUATION_LINES: usize = 3;

/// Column headers printed next to the sender name, compared ASCII-folded.
const STOP_WORDS: &[&str] = &[
    "ISLEM", "TURU", "GIDEN", "TARIH", "TARIHI", "FAST", "MASRAF", "IBAN", "VKN", "TUTAR",
    "VALOR", "ACIKLAMA", "TCKN",
];

lazy_static! {
    static ref NAME_LABEL: Regex = Regex::new(r"(?i)AD[Iıi]\s+SOYAD[Iıi]").unwrap();
    static ref RECEIVER: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi]\s+AD[Iıi]\s+SOYAD[Iıi]\s+([^\n]+)"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"(?i)Tutar\s+([\d.,]+)\s*TL").unwrap();
    static ref DATE: Regex = Regex::new(
        r"(?i)[İIi][şs]lem\s+Tar[İIıi]h[İIıi]\s+(\d{2}\.\d{2}\.\d{4})"
    ).unwrap();
    static ref UPPER_WORD: Regex = Regex::new(r"^[A-ZÇĞİÖŞÜ]+$").unwrap();
}

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&fold_ascii(token).as_str())
}

/// Sender name: the rest of the first non-receiver `Adı Soyadı` line, plus
/// following lines made of upper-case words only.
fn sender_name(text: &str) -> String {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let Some(start) = lines.iter().position(|line| {
        NAME_LABEL.is_match(line) && !contains_any(&fold_ascii(line), &["ALICI"])
    }) else {
        return String::new();
    };

    let mut parts = Vec::new();
    let label_end = NAME_LABEL
        .find_iter(lines[start])
        .last()
        .map_or(0, |m| m.end());
    let first: Vec<&str> = lines[start][label_end..]
        .split_whitespace()
        .filter(|token| !is_stop_word(token))
        .collect();
    if !first.is_empty() {
        parts.push(first.join(" "));
    }

    for line in lines.iter().skip(start + 1).take(SENDER_CONTINUATION_LINES) {
        let tokens: Vec<&str> = line
            .split_whitespace()
            .filter(|token| !is_stop_word(token))
            .collect();
        if tokens.is_empty() || !tokens.iter().all(|token| UPPER_WORD.is_match(token)) {
            break;
        }
        parts.push(tokens.join(" "));
    }

    parts.join(" ")
}

/// DenizBank layout: outgoing FAST unless stated otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenizbankStrategy;

impl ReceiptStrategy for DenizbankStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Denizbank
    }

    fn name(&self) -> &'static str {
        "denizbank"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        record.transfer_kind.is_fast = true;
        record.transfer_kind.is_outgoing = true;
        record.transfer_kind.is_maas = contains_any(&folded, &["STAJ", "MAAS"]);

        record.sender.name = turkish_upper(&sender_name(text));

        let mut ibans = IbanExtractor::new().extract_all(text).into_iter();
        record.sender.iban = ibans.next().unwrap_or_default();
        record.receiver.iban = ibans.next().unwrap_or_default();

        record.receiver.name = first_capture(&[&RECEIVER], text)
            .map(|name| turkish_upper(&name))
            .unwrap_or_default();
        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_amount(&raw));
        record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();

        record
    }
}
