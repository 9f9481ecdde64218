//! İş Bankası receipts (e-dekont and İşCep).

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    capture_date, capture_iban, first_capture, fold_ascii, parse_amount, turkish_upper,
};

lazy_static! {
    static ref DATE: Regex = Regex::new(
        r"(?i)[İI]şlem Zam\./Val[öo]r\s*:\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();
    // Sender printed left of the `İŞLEM YERİ` column.
    static ref SENDER_SAME_LINE: Regex = Regex::new(
        r"(?im)^([A-Za-zÇĞİÖŞÜçğıiöşü0-9 .\-]+?)[ \t]+[İI]ŞLEM YER[İI]"
    ).unwrap();
    // Sender wrapped onto the line above the column.
    static ref SENDER_PREVIOUS_LINE: Regex = Regex::new(
        r"(?im)^([A-Za-zÇĞİÖŞÜçğıiöşü0-9 .\-]+)\n[ \t]*[İI]ŞLEM YER[İI]"
    ).unwrap();
    static ref SENDER_IBAN: Regex = Regex::new(r"(?i)IBAN\s*:\s*(TR[0-9 ]+)").unwrap();
    static ref RECEIVER: Regex = Regex::new(
        r"(?i)Al[ıi]c[ıi]\s+[İIi]sim\s*/\s*Unvan\s*:\s*([^\n]+)"
    ).unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(
        r"(?i)Al[ıi]c[ıi] IBAN\s*:\s*(TR[0-9 ]+)"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"(?i)[İI]şlem Tutar[ıi]\s*:\s*([\d.,]+)").unwrap();
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IsbankStrategy;

impl ReceiptStrategy for IsbankStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Isbank
    }

    fn name(&self) -> &'static str {
        "isbank"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());

        record.transfer_kind.is_outgoing = true;
        record.transfer_kind.is_fast = fold_ascii(text).contains("FAST");

        record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();
        record.sender.name = first_capture(&[&SENDER_SAME_LINE, &SENDER_PREVIOUS_LINE], text)
            .map(|name| turkish_upper(&name))
            .unwrap_or_default();
        record.sender.iban = capture_iban(&[&SENDER_IBAN], text).unwrap_or_default();
        record.receiver.name = first_capture(&[&RECEIVER], text)
            .map(|name| turkish_upper(&name))
            .unwrap_or_default();
        record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();
        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_amount(&raw));

        record
    }
}
