//! Garanti BBVA receipts: FAST, salary and havale variants.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TR_IBAN_LEN, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::iban::compact_iban;
use crate::receipt::rules::patterns::{IBAN_LABELED, SAYIN_LINE, TRANSACTION_DATE};
use crate::receipt::rules::{
    capture_date, capture_iban, clean_name, contains_any, first_capture, fold_ascii,
    parse_turkish_amount, turkish_upper,
};

lazy_static! {
    static ref AMOUNT: Regex = Regex::new(r"TUTAR\s*:?\s*[+\- ]*\s*([\d.,]+)").unwrap();
    static ref CREDITOR: Regex = Regex::new(r"(?i)ALACAKL[Iıi]\s*:\s*([^\n\r]+)").unwrap();
    static ref CREDITOR_IBAN: Regex = Regex::new(r"ALACAKLI IBAN\s*:\s*(TR[0-9 ]+)").unwrap();
    static ref CREDITOR_ACCOUNT: Regex = Regex::new(
        r"(?i)ALACAKL[Iıi] HESAP\s*:\s*([^\n\r]+)"
    ).unwrap();
    static ref DEBTOR_ACCOUNT: Regex = Regex::new(
        r"(?i)BOR[ÇC]LU HESAP\s*:\s*([^\n\r]+)"
    ).unwrap();
    static ref DEBTOR_IBAN: Regex = Regex::new(r"(?i)BOR[ÇC]LU IBAN\s*:\s*(TR[0-9 *]+)").unwrap();
    static ref INSTITUTION: Regex = Regex::new(r"(?i)KURUM\s*:\s*([^\n\r]+)").unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(r"ALICI\s*IBAN\s*:\s*(TR[0-9 ]+)").unwrap();
}

/// Which Garanti receipt this is, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Fast,
    Salary,
    HavaleDebtor,
    HavaleCreditor,
    Havale,
    Other,
}

fn detect(folded: &str) -> Variant {
    let has_debtor = contains_any(folded, &["BORCLU HESAP"]);
    let is_salary = folded.contains("MAAS") && contains_any(folded, &["KURUM", "MAAS ODEMESI"]);

    if folded.contains("FAST") {
        Variant::Fast
    } else if is_salary {
        Variant::Salary
    } else if folded.contains("HAVALE") {
        if has_debtor {
            Variant::HavaleDebtor
        } else if folded.contains("ALACAKLI") {
            Variant::HavaleCreditor
        } else {
            Variant::Havale
        }
    } else {
        Variant::Other
    }
}

fn cleaned_capture(pattern: &Regex, text: &str) -> String {
    first_capture(&[pattern], text)
        .map(|raw| clean_name(&raw))
        .unwrap_or_default()
}

/// Garanti layout. The greeting line (`SAYIN …`) names the account owner
/// and the first labeled IBAN belongs to that account.
#[derive(Debug, Clone, Copy, Default)]
pub struct GarantiStrategy;

impl ReceiptStrategy for GarantiStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Garanti
    }

    fn name(&self) -> &'static str {
        "garanti"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);
        let variant = detect(&folded);

        let top_iban = capture_iban(&[&IBAN_LABELED], text).unwrap_or_default();
        let owner = first_capture(&[&SAYIN_LINE], text)
            .map(|line| clean_name(&line))
            .unwrap_or_default();

        if let Some(date) = capture_date(&[&TRANSACTION_DATE], text) {
            record.transaction_date = date;
        }
        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_turkish_amount(&raw));

        if variant != Variant::HavaleDebtor {
            record.sender.iban = top_iban.clone();
        }

        let kind = &mut record.transfer_kind;
        match variant {
            Variant::Fast => {
                kind.is_fast = true;
                kind.is_outgoing = true;
                record.sender.name = owner;
                record.receiver.name = cleaned_capture(&CREDITOR, text);
                record.receiver.iban = capture_iban(&[&CREDITOR_IBAN], text).unwrap_or(top_iban);
            }
            Variant::Salary => {
                kind.is_maas = true;
                kind.is_incoming = true;
                record.receiver.name = owner;
                record.sender.name = cleaned_capture(&INSTITUTION, text);
                record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or(top_iban);
                record.sender.clear_iban();
            }
            Variant::HavaleDebtor => {
                kind.is_havale = true;
                kind.is_outgoing = true;
                record.sender.name = cleaned_capture(&DEBTOR_ACCOUNT, text);
                record.sender.clear_iban();
                record.receiver.name = owner;
                record.receiver.iban = top_iban;
            }
            Variant::HavaleCreditor => {
                kind.is_havale = true;
                kind.is_outgoing = true;
                record.receiver.name = cleaned_capture(&CREDITOR_ACCOUNT, text);
                record.receiver.iban = capture_iban(&[&CREDITOR_IBAN], text).unwrap_or(top_iban);
                record.sender.name = owner;
                if let Some(masked) = first_capture(&[&DEBTOR_IBAN], text) {
                    let unmasked = compact_iban(&masked).replace('*', "");
                    record.sender.iban = if unmasked.len() >= TR_IBAN_LEN {
                        unmasked
                    } else {
                        String::new()
                    };
                }
            }
            Variant::Havale => {
                kind.is_havale = true;
                record.receiver.name = owner;
                record.receiver.iban = top_iban;
            }
            Variant::Other => {}
        }

        record.sender.name = turkish_upper(&record.sender.name);
        record.receiver.name = turkish_upper(&record.receiver.name);
        record
    }
}
