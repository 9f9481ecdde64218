//! Halkbank receipts.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    capture_date, capture_iban, contains_any, first_capture, fold_ascii, parse_amount,
    turkish_upper,
};

lazy_static! {
    static ref DATE: Regex = Regex::new(
        r"[İI]ŞLEM TAR[İI]H[İI]\s*:\s*(\d{2}[/.]\d{2}[/.]\d{4})"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(
        r"(?i)[İI]ŞLEM TUTARI\s*\(TL\)\s*:\s*([\d.,]+)"
    ).unwrap();
    static ref SENDER: Regex = Regex::new(r"GÖNDEREN\s*:\s*([^\n]+)").unwrap();
    static ref SENDER_IBAN: Regex = Regex::new(r"GÖNDEREN IBAN\s*:\s*(TR[0-9 ]+)").unwrap();
    static ref RECEIVER: Regex = Regex::new(r"ALICI\s*:\s*([^\n]+)").unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(r"ALICI IBAN\s*:\s*(TR[0-9 ]+)").unwrap();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HalkbankStrategy;

impl ReceiptStrategy for HalkbankStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Halkbank
    }

    fn name(&self) -> &'static str {
        "halkbank"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        let kind = &mut record.transfer_kind;
        kind.is_fast = folded.contains("FAST");
        kind.is_havale = contains_any(&folded, &["PARA TRANSFERI", "HAVALE"]);
        kind.is_outgoing = kind.is_fast || kind.is_havale;

        record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();
        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_amount(&raw));

        record.sender.name = first_capture(&[&SENDER], text)
            .map(|name| turkish_upper(&name))
            .unwrap_or_default();
        record.sender.iban = capture_iban(&[&SENDER_IBAN], text).unwrap_or_default();
        record.receiver.name = first_capture(&[&RECEIVER], text)
            .map(|name| turkish_upper(&name))
            .unwrap_or_default();
        record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();

        record
    }
}
