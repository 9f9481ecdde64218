//! ING receipts. Only the receiving side is printed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    capture_date, capture_iban, first_capture, fold_ascii, parse_amount, turkish_upper,
};

lazy_static! {
    static ref DATE: Regex = Regex::new(
        r"(?i)[İI]ŞLEM TAR[İI]H[İI]\s*:\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"(?i)[İI]ŞLEM TUTARI\s*:\s*([\d.,]+)").unwrap();
    static ref RECEIVER: Regex = Regex::new(
        r"(?i)SAY[Iıi]N\s+([A-ZÇĞİÖŞÜa-zçğıöşü ]+)"
    ).unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(r"(?i)IBAN:\s*(TR[0-9 ]+)").unwrap();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IngStrategy;

impl ReceiptStrategy for IngStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Ing
    }

    fn name(&self) -> &'static str {
        "ing"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());

        record.transfer_kind.is_outgoing = true;
        record.transfer_kind.is_maas = fold_ascii(text).contains("MAAS");

        record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();
        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_amount(&raw));
        record.receiver.name = first_capture(&[&RECEIVER], text)
            .map(|name| turkish_upper(&name))
            .unwrap_or_default();
        record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();

        record
    }
}
