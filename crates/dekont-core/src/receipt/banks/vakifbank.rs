//! VakıfBank receipts.
//!
//! Three layouts are seen in practice and are tried in this order:
//! 1. masked sender: the sender's IBAN is printed with `*` and the sender
//!    name sits on the line above it;
//! 2. account table: an IBAN-only line followed by an `ADSOYAD/UNVAN1` line;
//! 3. labeled: `ALICI` / `GONDEREN` labels next to names and IBANs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::iban::compact_iban;
use crate::receipt::rules::patterns::{AMOUNT_BEFORE_TL, DIGITS_ONLY_LINE, IBAN_MASKED};
use crate::receipt::rules::{
    FieldExtractor, IbanExtractor, capture_date, capture_iban, first_capture,
    fold_ascii, non_empty_lines, parse_amount, strip_label_suffix, turkish_upper,
};

/// Lines after an IBAN head that may hold its digit continuation.
const IBAN_TAIL_LOOKAHEAD: usize = 2;

lazy_static! {
    static ref HAVALE: Regex = Regex::new(r"\bHAVALE\b").unwrap();
    static ref EFT: Regex = Regex::new(r"\bEFT\b").unwrap();
    static ref MAAS: Regex = Regex::new(r"\bMAAS\b").unwrap();
    static ref GELEN: Regex = Regex::new(r"\bGELEN\b").unwrap();
    static ref GIDEN: Regex = Regex::new(r"\bGIDEN\b").unwrap();

    static ref DATE: Regex = Regex::new(
        r"(?i)[İI]ŞLEM(?:\s+TAR[İI]H[İI])?\s*:*\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(
        r"(?i)[İI]ŞLEM\s*TUTARI\s*[:\-]?\s*([0-9.,]+)\s*TL"
    ).unwrap();

    static ref IBAN_HEAD_LINE: Regex = Regex::new(r"^TR[0-9 ]{10,34}$").unwrap();
    static ref ACCOUNT_IBAN_LINE: Regex = Regex::new(r"^TR\d[\d ]+$").unwrap();
    static ref RECEIVER_LABELED_NAME: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi] AD SOYAD/UNVAN\s+([A-ZÇĞİÖŞÜa-zçğıöşü ]+)"
    ).unwrap();
    static ref ACCOUNT_LABELS: Regex = Regex::new(
        r"(?i)HESAP NUMARASI|ADSOYAD/UNVAN1|ADSOYAD|UNVAN1"
    ).unwrap();

    static ref RECEIVER_IBAN: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi][^\n]*?IBAN\s*[:\-]?\s*(TR[0-9 ]{10,34})"
    ).unwrap();
    static ref SENDER_IBAN: Regex = Regex::new(
        r"(?i)G[ÖO]NDEREN[^\n]*?IBAN\s*[:\-]?\s*(TR[0-9 ]{10,34})"
    ).unwrap();
    static ref RECEIVER_NAME: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi](?:\s+(?:AD\s*SOYAD(?:/UNVAN)?|AD[Iıi]|UNVAN[Iıi]?))?\s*:\s*([^\n]+)"
    ).unwrap();
    static ref SENDER_NAME: Regex = Regex::new(
        r"(?i)G[ÖO]NDEREN(?:\s+(?:AD\s*SOYAD(?:/UNVAN)?|AD[Iıi]|UNVAN[Iıi]?))?\s*:\s*([^\n]+)"
    ).unwrap();
    static ref IBAN_WITH_TEXT: Regex = Regex::new(
        r"(?i)(TR[0-9 ]{10,34})\s+(\p{L}[^\n]*)"
    ).unwrap();
    static ref NAME_BREAK: Regex = Regex::new(
        r"(?i),|/|HESAP|AL[Iıi]C[Iıi]|G[ÖO]NDEREN"
    ).unwrap();
    static ref CUSTOMER_TITLE: Regex = Regex::new(
        r"(?i)M[ÜU][ŞS]TER[İI]\s+[ÜU]NVANI\s*[:\-]?\s*([^\n\r]+)"
    ).unwrap();
    static ref OWN_ACCOUNT_IBAN: Regex = Regex::new(
        r"(?i)(?:VADES[İI]Z|G[ÜU]NL[ÜU]K)\s+TL\s+(TR[0-9 ]{10,34})"
    ).unwrap();
}

fn has_letters(s: &str) -> bool {
    s.chars().any(char::is_alphabetic)
}

/// First piece of `rest` before a separator or another label.
fn name_candidate(rest: &str) -> Option<String> {
    let end = NAME_BREAK.find(rest).map(|m| m.start()).unwrap_or(rest.len());
    let candidate = rest[..end].trim();
    (!candidate.is_empty()).then(|| candidate.to_string())
}

/// Head IBAN line joined with its digit-only continuation.
fn joined_iban(lines: &[&str], head: usize) -> String {
    let mut iban = compact_iban(lines[head]);
    if let Some(tail) = lines
        .iter()
        .skip(head + 1)
        .take(IBAN_TAIL_LOOKAHEAD)
        .find(|line| DIGITS_ONLY_LINE.is_match(line))
    {
        iban.push_str(&compact_iban(tail));
    }
    iban
}

fn extract_masked(text: &str, lines: &[&str], masked_at: usize, record: &mut TransactionRecord) {
    if let Some(prev) = masked_at.checked_sub(1).map(|i| lines[i]) {
        if has_letters(prev) {
            record.sender.name = prev.to_string();
        }
    }
    record.sender.clear_iban();

    if let Some(name) = first_capture(&[&RECEIVER_LABELED_NAME], text) {
        record.receiver.name = name;
    }
    if let Some(head) = lines.iter().position(|line| IBAN_HEAD_LINE.is_match(line)) {
        record.receiver.iban = joined_iban(lines, head);
    }
}

fn find_account_table(lines: &[&str]) -> Option<usize> {
    lines.iter().enumerate().position(|(i, line)| {
        ACCOUNT_IBAN_LINE.is_match(line)
            && lines
                .get(i + 1)
                .is_some_and(|next| next.to_uppercase().contains("ADSOYAD"))
    })
}

fn extract_account_table(lines: &[&str], head: usize, record: &mut TransactionRecord) {
    let name = ACCOUNT_LABELS.replace_all(lines[head + 1], "");
    record.sender.name = name.trim().to_string();

    let mut iban = compact_iban(lines[head]);
    if let Some(tail) = lines.get(head + 2).filter(|l| DIGITS_ONLY_LINE.is_match(l)) {
        iban.push_str(&compact_iban(tail));
    }
    record.sender.iban = iban;
}

fn extract_labeled(text: &str, lines: &[&str], incoming: bool, record: &mut TransactionRecord) {
    record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();
    record.sender.iban = capture_iban(&[&SENDER_IBAN], text).unwrap_or_default();

    for line in lines {
        let Some(caps) = IBAN_WITH_TEXT.captures(line) else {
            continue;
        };
        let iban = compact_iban(&caps[1]).to_uppercase();
        let rest = caps[2].trim().trim_end_matches(',');
        let folded = fold_ascii(line);

        let party = if folded.contains("ALICI") {
            &mut record.receiver
        } else if folded.contains("GONDEREN") {
            &mut record.sender
        } else if record.receiver.iban.is_empty() {
            &mut record.receiver
        } else if record.sender.iban.is_empty() {
            &mut record.sender
        } else {
            continue;
        };
        party.iban = iban;
        if party.name.is_empty() {
            party.name = name_candidate(rest).unwrap_or_default();
        }
    }

    let assigned = [record.receiver.iban.clone(), record.sender.iban.clone()];
    let mut leftovers = IbanExtractor::loose()
        .extract_all(text)
        .into_iter()
        .filter(|iban| !assigned.contains(iban));
    if record.receiver.iban.is_empty() {
        record.receiver.iban = leftovers.next().unwrap_or_default();
    }
    if record.sender.iban.is_empty() {
        record.sender.iban = leftovers.next().unwrap_or_default();
    }

    if record.receiver.name.is_empty() {
        record.receiver.name = first_capture(&[&RECEIVER_NAME], text)
            .and_then(|raw| name_candidate(&raw))
            .unwrap_or_default();
    }
    if record.sender.name.is_empty() {
        record.sender.name = first_capture(&[&SENDER_NAME], text)
            .and_then(|raw| name_candidate(&raw))
            .unwrap_or_default();
    }

    if incoming {
        if let Some(name) = first_capture(&[&CUSTOMER_TITLE], text) {
            record.receiver.name = name;
        }
        if record.sender.iban.is_empty() {
            record.sender.iban = capture_iban(&[&OWN_ACCOUNT_IBAN], text).unwrap_or_default();
        }
    }
}

/// VakıfBank layouts; see the module docs for how one is chosen.
#[derive(Debug, Clone, Copy, Default)]
pub struct VakifbankStrategy;

impl ReceiptStrategy for VakifbankStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Vakifbank
    }

    fn name(&self) -> &'static str {
        "vakifbank"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        let kind = &mut record.transfer_kind;
        kind.is_havale = HAVALE.is_match(&folded);
        kind.is_eft = EFT.is_match(&folded);
        kind.is_maas = MAAS.is_match(&folded);
        kind.is_incoming = GELEN.is_match(&folded);
        kind.is_outgoing = GIDEN.is_match(&folded);

        if let Some(date) = capture_date(&[&DATE], text) {
            record.transaction_date = date;
        }
        record.amount = first_capture(&[&AMOUNT, &AMOUNT_BEFORE_TL], text)
            .and_then(|raw| parse_amount(&raw));

        let lines = non_empty_lines(text);
        if let Some(masked_at) = lines.iter().position(|line| IBAN_MASKED.is_match(line)) {
            extract_masked(text, &lines, masked_at, &mut record);
        } else if let Some(head) = find_account_table(&lines) {
            extract_account_table(&lines, head, &mut record);
        } else {
            let incoming = record.transfer_kind.is_incoming;
            extract_labeled(text, &lines, incoming, &mut record);
        }

        record.sender.name = turkish_upper(&strip_label_suffix(&record.sender.name));
        record.receiver.name = turkish_upper(&strip_label_suffix(&record.receiver.name));
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const MASKED: &str = "T. VAKIFLAR BANKASI T.A.O.
HAVALE DEKONTU
İŞLEM TARİHİ : 12.08.2025
KEMAL SUNAL
TR12 0001 5001 **** **** 1234 56
ALICI AD SOYAD/UNVAN ECE BİÇER
TR98 0001 5001 5800 7300
001234
İŞLEM TUTARI : 6.631,40 TL";

    const ACCOUNT_TABLE: &str = "VAKIFBANK
EFT GİDEN
İŞLEM TARİHİ : 01.07.2025
TR45 0001 5001 5800 7312
ADSOYAD/UNVAN1 İNCİ HOLDİNG AŞ HESAP NUMARASI
345678
İŞLEM TUTARI : 12.500,00 TL";

    const LABELED: &str = "VAKIFBANK
GELEN HAVALE
İŞLEM TARİHİ : 03.03.2025
GÖNDEREN AD SOYAD : MURAT BOZ TC KİMLİK NUMARASI 11111111111
GÖNDEREN IBAN : TR11 0001 5001 5800 7300 1111 11
MÜŞTERİ ÜNVANI : Doğuş Efe
1.000,00 TL";

    #[test]
    fn test_masked_sender_layout() {
        let record = VakifbankStrategy.extract(MASKED);

        assert!(record.transfer_kind.is_havale);
        assert_eq!(record.transaction_date, "12.08.2025");
        assert_eq!(record.amount, Some(Decimal::new(663140, 2)));
        assert_eq!(record.sender.name, "KEMAL SUNAL");
        assert_eq!(record.sender.iban, "");
        assert_eq!(record.receiver.name, "ECE BİÇER");
        assert_eq!(record.receiver.iban, "TR980001500158007300001234");
    }

    #[test]
    fn test_account_table_layout() {
        let record = VakifbankStrategy.extract(ACCOUNT_TABLE);

        assert!(record.transfer_kind.is_eft);
        assert!(record.transfer_kind.is_outgoing);
        assert_eq!(record.sender.name, "İNCİ HOLDİNG AŞ");
        assert_eq!(record.sender.iban, "TR450001500158007312345678");
        assert_eq!(record.receiver.name, "");
        assert_eq!(record.receiver.iban, "");
        assert_eq!(record.amount, Some(Decimal::new(1250000, 2)));
    }

    #[test]
    fn test_labeled_incoming_layout() {
        let record = VakifbankStrategy.extract(LABELED);

        assert!(record.transfer_kind.is_incoming);
        assert!(record.transfer_kind.is_havale);
        assert_eq!(record.transaction_date, "03.03.2025");
        assert_eq!(record.sender.name, "MURAT BOZ");
        assert_eq!(record.sender.iban, "TR110001500158007300111111");
        assert_eq!(record.receiver.name, "DOĞUŞ EFE");
        assert_eq!(record.receiver.iban, "");
        assert_eq!(record.amount, Some(Decimal::new(100000, 2)));
    }
}
