//! Ziraat Bankası receipts: account-to-account havale and FAST.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TR_IBAN_LEN, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    capture_date, capture_iban, contains_any, first_capture, fold_ascii, parse_amount,
    turkish_upper,
};

/// Tokens kept from a branch line without a `ŞUBESİ` marker.
const BRANCH_FALLBACK_TOKENS: usize = 4;

lazy_static! {
    static ref DATE: Regex = Regex::new(
        r"(?i)[İI]ŞLEM TAR[İI]H[İI]\s*:\s*(\d{2}[./]\d{2}[./]\d{4})"
    ).unwrap();
    static ref HAVALE_AMOUNT: Regex = Regex::new(
        r"(?i)HAVALE TUTAR[Iıi]\s*:\s*([\d.,]+)"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"(?i)[İIi]ŞLEM TUTAR[Iıi]\s*:\s*([\d.,]+)").unwrap();

    static ref CREDITOR: Regex = Regex::new(
        r"(?i)ALACAKL[Iıi] AD[Iıi] SOYAD[Iıi]\s*:\s*([^\n]+)"
    ).unwrap();
    static ref CREDITOR_IBAN: Regex = Regex::new(
        r"(?i)ALACAKL[Iıi] IBAN\s*:\s*(TR[0-9 ]+)"
    ).unwrap();

    static ref SENDER_IBAN: Regex = Regex::new(r"(?i)IBAN\s*:\s*(TR[0-9 ]{24,34})").unwrap();
    static ref SENDER: Regex = Regex::new(r"(?i)G[ÖO]NDEREN\s*:\s*([^\n]+)").unwrap();
    static ref RECEIVER: Regex = Regex::new(r"(?i)AL[Iıi]C[Iıi]\s*:\s*([^\n]+)").unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi] HESAP\s*:\s*(TR[0-9 ]+)"
    ).unwrap();
}

/// Sender of a havale: the account holder printed after the branch name on
/// the `ŞUBE KODU/ADI` line.
fn branch_line_sender(text: &str) -> Option<String> {
    let line = text
        .lines()
        .find(|line| fold_ascii(line).contains("SUBE KODU/ADI"))?;
    let right = line.split_once(':').map_or(line, |(_, right)| right).trim();
    let upper = turkish_upper(right);

    let holder = match upper.split_once("ŞUBESİ") {
        Some((_, holder)) => holder.trim().to_string(),
        None => {
            let tokens: Vec<&str> = upper.split_whitespace().collect();
            let from = tokens.len().saturating_sub(BRANCH_FALLBACK_TOKENS);
            tokens[from..].join(" ")
        }
    };
    (!holder.is_empty()).then_some(holder)
}

/// Ziraat layout. Both variants are outgoing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZiraatStrategy;

impl ReceiptStrategy for ZiraatStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Ziraat
    }

    fn name(&self) -> &'static str {
        "ziraat"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        let is_fast = folded.contains("FAST");
        let is_havale = contains_any(&folded, &["HESAPTAN HESABA HAVALE", "HAVALE TUTARI"]);
        record.transfer_kind.is_fast = is_fast;
        record.transfer_kind.is_havale = is_havale;
        record.transfer_kind.is_outgoing = is_fast || is_havale;

        record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();
        let amount_pattern: &Regex = if is_havale { &HAVALE_AMOUNT } else { &AMOUNT };
        record.amount = first_capture(&[amount_pattern], text).and_then(|raw| parse_amount(&raw));

        if is_havale {
            record.sender.name = branch_line_sender(text).unwrap_or_default();
            record.receiver.name = first_capture(&[&CREDITOR], text).unwrap_or_default();
            record.receiver.iban = capture_iban(&[&CREDITOR_IBAN], text).unwrap_or_default();
        }

        if is_fast {
            if let Some(mut iban) = capture_iban(&[&SENDER_IBAN], text) {
                iban.truncate(TR_IBAN_LEN);
                record.sender.iban = iban;
            }
            if let Some(sender) = first_capture(&[&SENDER], text) {
                record.sender.name = sender;
            }
            if let Some(receiver) = first_capture(&[&RECEIVER], text) {
                record.receiver.name = receiver;
            }
            if let Some(iban) = capture_iban(&[&RECEIVER_IBAN], text) {
                record.receiver.iban = iban;
            }
        }

        record.sender.name = turkish_upper(&record.sender.name);
        record.receiver.name = turkish_upper(&record.receiver.name);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const FAST: &str = "T.C. ZİRAAT BANKASI A.Ş.
HESAPTAN FAST
İŞLEM TARİHİ : 20.10.2025
IBAN : TR33 0001 0000 1234 5678 9012 34 5001
GÖNDEREN : Ahmet Yılmaz
Alıcı : Mehmet Demir
Alıcı Hesap : TR12 0006 2000 0000 0000 0000 01
İşlem Tutarı : 2.500,00";

    const HAVALE: &str = "ZİRAAT BANKASI
HESAPTAN HESABA HAVALE
İŞLEM TARİHİ : 21.10.2025
ŞUBE KODU/ADI : 1204/KAHRAMANLAR/İZMİR ŞUBESİ YKS YANGIN KORUMA SİSTEMLERİ
Alacaklı Adı Soyadı : Ayşe Kaya
Alacaklı IBAN : TR44 0001 0012 3456 7890 1234 56
Havale Tutarı : 10.000,00";

    #[test]
    fn test_fast_truncates_sender_iban() {
        let record = ZiraatStrategy.extract(FAST);

        assert!(record.transfer_kind.is_fast);
        assert!(record.transfer_kind.is_outgoing);
        assert!(!record.transfer_kind.is_havale);
        assert_eq!(record.transaction_date, "20.10.2025");
        assert_eq!(record.amount, Some(Decimal::new(250000, 2)));
        assert_eq!(record.sender.iban, "TR330001000012345678901234");
        assert_eq!(record.sender.name, "AHMET YILMAZ");
        assert_eq!(record.receiver.name, "MEHMET DEMİR");
        assert_eq!(record.receiver.iban, "TR120006200000000000000001");
    }

    #[test]
    fn test_havale_sender_from_branch_line() {
        let record = ZiraatStrategy.extract(HAVALE);

        assert!(record.transfer_kind.is_havale);
        assert!(record.transfer_kind.is_outgoing);
        assert_eq!(record.sender.name, "YKS YANGIN KORUMA SİSTEMLERİ");
        assert_eq!(record.sender.iban, "");
        assert_eq!(record.receiver.name, "AYŞE KAYA");
        assert_eq!(record.receiver.iban, "TR440001001234567890123456");
        assert_eq!(record.amount, Some(Decimal::new(1000000, 2)));
    }

    #[test]
    fn test_branch_line_without_marker_keeps_last_tokens() {
        let text = "ŞUBE KODU/ADI : 0001 MERKEZ ACME GIDA SAN LTD";
        assert_eq!(branch_line_sender(text), Some("ACME GIDA SAN LTD".to_string()));
    }
}
