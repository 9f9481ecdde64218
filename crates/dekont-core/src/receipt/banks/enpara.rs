//! Enpara / QNB Finansbank receipts.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::patterns::{DATE_ANY, DATE_WITH_TIME};
use crate::receipt::rules::{
    capture_date, capture_iban, cut_at_any, first_capture, fold_ascii, parse_minor_units,
    turkish_upper,
};

lazy_static! {
    static ref DATE_LABELED: Regex = Regex::new(
        r"(?i)[İIıi][şs]lem\s+tar[İIıi]h[İIıi](?:\s+ve\s+saat[İIıi])?\s*:\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"TL\s*([\d.,]+)").unwrap();
    static ref SENDER: Regex = Regex::new(r"GÖNDEREN\s*:\s*([^\n]+)").unwrap();
    static ref RECEIVER: Regex = Regex::new(r"ALICI ÜNVANI\s*:\s*([^\n]+)").unwrap();
    static ref TRAILING_RECEIVER_LABEL: Regex = Regex::new(
        r"(?i)[,.\s]*\bAL[Iıi]C[Iıi]\b[,.\s]*$"
    ).unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(r"ALICI IBAN\s*:\s*(TR[0-9 ]+)").unwrap();
    static ref SENDER_IBAN: Regex = Regex::new(
        r"(?s)MÜŞTERİ ÜNVANI.*?IBAN\s*:\s*(TR[0-9 ]+)"
    ).unwrap();
    static ref BRANCH_LINE: Regex = Regex::new(r"(?i)[ŞS]ube\s+ad[ıi]\s*:([^\n]+)").unwrap();
    static ref SAYIN: Regex = Regex::new(r"(?i)SAY[Iıi]N\s+(.+)").unwrap();
    static ref CURRENT_ACCOUNT_IBAN: Regex = Regex::new(r"Vadesiz TL\s+(TR[0-9 ]+)").unwrap();
    static ref ANY_ACCOUNT_IBAN: Regex = Regex::new(
        r"(?:Vadesiz|Günlük)\s+TL\s+(TR[0-9 ]+)"
    ).unwrap();
}

/// Enpara layout: `GÖNDEREN :` / `ALICI ÜNVANI :` labels, amounts as
/// `TL 6,660.00`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnparaStrategy;

impl ReceiptStrategy for EnparaStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Enpara
    }

    fn name(&self) -> &'static str {
        "enpara"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        let kind = &mut record.transfer_kind;
        kind.is_fast = folded.contains("FAST");
        kind.is_havale = folded.contains("EFT");
        kind.is_outgoing = folded.contains("GIDEN");
        kind.is_incoming = folded.contains("GELEN");
        kind.is_maas = folded.contains("MAAS");

        if let Some(date) = capture_date(&[&DATE_LABELED, &DATE_WITH_TIME, &DATE_ANY], text) {
            record.transaction_date = date;
        }

        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_minor_units(&raw));

        if let Some(sender) = first_capture(&[&SENDER], text) {
            record.sender.name = cut_at_any(&sender, &["AÇIKLAMA"]).to_string();
        }

        if let Some(receiver) = first_capture(&[&RECEIVER], text) {
            let name = cut_at_any(&receiver, &["IBAN"]);
            record.receiver.name = TRAILING_RECEIVER_LABEL.replace(name, "").trim().to_string();
        }

        record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();
        record.sender.iban = capture_iban(&[&SENDER_IBAN], text).unwrap_or_default();

        if record.transfer_kind.is_incoming {
            if let Some(name) = first_capture(&[&BRANCH_LINE], text)
                .and_then(|line| first_capture(&[&SAYIN], &line))
            {
                record.receiver.name = name;
            }
            record.receiver.clear_iban();
            if let Some(iban) = capture_iban(&[&CURRENT_ACCOUNT_IBAN, &ANY_ACCOUNT_IBAN], text) {
                record.sender.iban = iban;
            }
        }

        record.sender.name = turkish_upper(&record.sender.name);
        record.receiver.name = turkish_upper(&record.receiver.name);
        record
    }
}
