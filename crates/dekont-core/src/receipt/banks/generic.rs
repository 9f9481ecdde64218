//! Bank-agnostic extraction for receipts the classifier does not recognize.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::patterns::{AMOUNT_BEFORE_TL, ANY_DATE_LABEL, TRANSACTION_DATE};
use crate::receipt::rules::{
    DateExtractor, FieldExtractor, IbanExtractor, capture_date, capture_iban, clean_name,
    first_capture, fold_ascii, fold_name_case, parse_amount,
};

lazy_static! {
    // Flags, matched on ASCII-folded text
    static ref FAST: Regex = Regex::new(r"\bFAST\b").unwrap();
    static ref HAVALE: Regex = Regex::new(r"\bHAVALE\b").unwrap();
    static ref EFT: Regex = Regex::new(r"\bEFT\b").unwrap();
    static ref SALARY: Regex = Regex::new(r"\bMAAS").unwrap();
    static ref INCOMING: Regex = Regex::new(r"\bGELEN\b").unwrap();
    static ref OUTGOING: Regex = Regex::new(r"\bGIDEN\b").unwrap();

    static ref AMOUNT_LABELED: Regex = Regex::new(
        r"(?i)\b(?:[İIıi][ŞS]LEM\s+TUTAR[Iıi]|TUTAR|TOPLAM)\s*:?\s*([+-]?[0-9][0-9.,]*)"
    ).unwrap();

    static ref SENDER: Regex = Regex::new(
        r"(?i)G[ÖO]NDEREN(?:\s+(?:AD[Iıi]\s+SOYAD[Iıi]|AD\s+SOYAD|AD[Iıi]|[ÜU]NVAN[Iıi]))?\s*:\s*([^\n]+)"
    ).unwrap();
    static ref RECEIVER: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi](?:\s+(?:AD[Iıi]\s+SOYAD[Iıi]|AD\s+SOYAD|AD[Iıi]|[ÜU]NVAN[Iıi]))?\s*:\s*([^\n]+)"
    ).unwrap();
    static ref CREDITOR: Regex = Regex::new(r"(?i)ALACAKL[Iıi]\s*:\s*([^\n]+)").unwrap();

    static ref SENDER_IBAN: Regex = Regex::new(
        r"(?i)G[ÖO]NDEREN\s+IBAN\s*:?\s*(TR[0-9 ]+)"
    ).unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi]\s+IBAN\s*:?\s*(TR[0-9 ]+)"
    ).unwrap();

    // Any label that can follow a name on the same line
    static ref NEXT_LABEL: Regex = Regex::new(
        r"(?i)\b(?:G[ÖO]NDEREN|AL[Iıi]C[Iıi]|ALACAKL[Iıi]|IBAN|TUTAR|TOPLAM|A[ÇC][Iıi]KLAMA|[İIıi][ŞS]LEM\s+TAR[İIıi]H[İIıi])\b"
    ).unwrap();
}

/// Labeled name, cut at the next label and cleaned.
fn party_name(patterns: &[&Regex], text: &str) -> String {
    let Some(raw) = first_capture(patterns, text) else {
        return String::new();
    };
    let cut = match NEXT_LABEL.find(&raw) {
        Some(m) => &raw[..m.start()],
        None => raw.as_str(),
    };
    fold_name_case(&clean_name(cut))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GenericStrategy;

impl ReceiptStrategy for GenericStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Unknown
    }

    fn name(&self) -> &'static str {
        "generic"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        let kind = &mut record.transfer_kind;
        kind.is_fast = FAST.is_match(&folded);
        kind.is_havale = HAVALE.is_match(&folded);
        kind.is_eft = EFT.is_match(&folded);
        kind.is_maas = SALARY.is_match(&folded);
        kind.is_incoming = INCOMING.is_match(&folded);
        kind.is_outgoing = OUTGOING.is_match(&folded);

        record.transaction_date = capture_date(&[&TRANSACTION_DATE, &ANY_DATE_LABEL], text)
            .or_else(|| DateExtractor::new().extract(text))
            .unwrap_or_default();
        record.amount = first_capture(&[&AMOUNT_LABELED, &AMOUNT_BEFORE_TL], text)
            .and_then(|raw| parse_amount(&raw));

        record.sender.name = party_name(&[&SENDER], text);
        record.receiver.name = party_name(&[&RECEIVER, &CREDITOR], text);

        record.sender.iban = capture_iban(&[&SENDER_IBAN], text).unwrap_or_default();
        record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();
        if record.receiver.iban.is_empty() {
            let unlabeled: Vec<String> = IbanExtractor::new()
                .extract_all(text)
                .into_iter()
                .filter(|iban| *iban != record.sender.iban)
                .collect();
            if let [only] = unlabeled.as_slice() {
                record.receiver.iban = only.clone();
            }
        }

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    #[test]
    fn test_labeled_receipt() {
        let text = "İşlem Tarihi: 04.11.2025\nTUTAR: 1.234,56 TL\nGÖNDEREN: ALI VELI\nALICI IBAN: TR330006100519786457841326";
        let record = GenericStrategy.extract(text);

        assert_eq!(record.transaction_date, "04.11.2025");
        assert_eq!(record.amount, Some(Decimal::new(123456, 2)));
        assert_eq!(record.sender.name, "ALİ VELİ");
        assert_eq!(record.receiver.iban, "TR330006100519786457841326");
        assert_eq!(record.sender.iban, "");
    }

    #[test]
    fn test_name_cut_at_next_label() {
        let text = "Gönderen Adı Soyadı: Zeynep Kaya Alıcı Adı: Can Er\nAlacaklı : yok";
        let record = GenericStrategy.extract(text);

        assert_eq!(record.sender.name, "ZEYNEP KAYA");
        assert_eq!(record.receiver.name, "CAN ER");
    }

    #[test]
    fn test_single_unlabeled_iban_goes_to_receiver() {
        let text = "Havale\nTR12 0006 2000 0000 0000 0000 01\n15/10/2025\n250 TL";
        let record = GenericStrategy.extract(text);

        assert!(record.transfer_kind.is_havale);
        assert_eq!(record.receiver.iban, "TR120006200000000000000001");
        assert_eq!(record.transaction_date, "15.10.2025");
        assert_eq!(record.amount, Some(Decimal::new(250, 0)));
    }

    #[test]
    fn test_flags_use_word_boundaries() {
        let record = GenericStrategy.extract("GELEN FAST\nBREAKFAST");
        assert!(record.transfer_kind.is_incoming);
        assert!(record.transfer_kind.is_fast);
        assert!(!record.transfer_kind.is_outgoing);

        let record = GenericStrategy.extract("BREAKFAST MENÜSÜ");
        assert!(!record.transfer_kind.is_fast);
    }
}
