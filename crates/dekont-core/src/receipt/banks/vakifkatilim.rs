//! Vakıf Katılım receipts. These carry no IBANs.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    first_capture, normalize_date, parse_turkish_amount, trim_fragment, turkish_upper,
};

lazy_static! {
    static ref SENDER: Regex = Regex::new(r"(?i)G[öo]nderen Ki[şs]i\s*:\s*([^\n]+)").unwrap();
    static ref RECEIVER: Regex = Regex::new(
        r"(?i)G[öo]nderilen Ki[şs]i\s*:\s*([^\n]+)"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"Tutar\s*([\d.,]+)\s*TL").unwrap();
    static ref DATE: Regex = Regex::new(r"[İI]şlem\s*Tarihi\s*:?\s*([0-9/.:\s]+)").unwrap();
    static ref DATE_SHORT: Regex = Regex::new(r"[İI]şlem\s*:\s*([0-9/.]+)").unwrap();
}

fn party_name(pattern: &Regex, text: &str) -> String {
    first_capture(&[pattern], text)
        .map(|name| trim_fragment(&turkish_upper(&name)))
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct VakifKatilimStrategy;

impl ReceiptStrategy for VakifKatilimStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::VakifKatilim
    }

    fn name(&self) -> &'static str {
        "vakifkatilim"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        record.transfer_kind.is_havale = true;
        record.transfer_kind.is_outgoing = true;

        record.sender.name = party_name(&SENDER, text);
        record.receiver.name = party_name(&RECEIVER, text);

        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_turkish_amount(&raw));
        record.transaction_date = first_capture(&[&DATE, &DATE_SHORT], text)
            .and_then(|raw| raw.split_whitespace().next().map(normalize_date))
            .unwrap_or_default();

        record
    }
}
