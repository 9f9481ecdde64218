//! Yapı Kredi receipts: salary credit advice and outgoing FAST.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    capture_date, capture_iban, contains_any, cut_at_any, first_capture, fold_ascii,
    parse_amount, turkish_upper,
};

/// Lines merged with the `AÇIKLAMA` line when looking for the salary receiver.
const DESCRIPTION_CONTINUATION: usize = 1;

lazy_static! {
    static ref DATE: Regex = Regex::new(
        r"(?i)[İI]ŞLEM TAR[İI]H[İI]\s*:\s*(\d{2}\.\d{2}\.\d{4})"
    ).unwrap();

    // Salary
    static ref PAYER: Regex = Regex::new(
        r"(?i)ÖDEME YAPAN [İI]S[İI]M/ÜNVAN\s*:\s*([^\n]+)"
    ).unwrap();
    static ref PAYER_IBAN: Regex = Regex::new(r"IBAN NO\s*:\s*(TR[0-9 ]+)").unwrap();
    static ref SALARY_AMOUNT: Regex = Regex::new(r"TUTAR\s*:\s*([\d.,]+)").unwrap();
    static ref COMMERCIAL_TAIL: Regex = Regex::new(
        r"(?i)\b(?:T[İI]CAR[İI]|UNVAN|VD\b|VERG[İI]|BANKASI|A\.Ş)"
    ).unwrap();

    // FAST
    static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"(?i)TOPLAM TAHS[İI]LAT TUTARI\s*:\s*-?([\d.,]+)"
    ).unwrap();
    static ref SENDER_IBAN: Regex = Regex::new(r"IBAN *: *(TR[0-9 ]{10,})").unwrap();
    static ref SENDER: Regex = Regex::new(r"(?i)G[ÖO]NDEREN ADI *: *([^\n]+)").unwrap();
    static ref RECEIVER_IBAN: Regex = Regex::new(
        r"(?i)AL[Iıi]C[Iıi] HESAP *: *(TR[0-9 ]+)"
    ).unwrap();
    static ref RECEIVER: Regex = Regex::new(r"(?i)AL[Iıi]C[Iıi] ADI *: *([^\n]+)").unwrap();
}

/// Receiver of a salary payment, read from the description lines.
///
/// The description ends with `…/<receiver name>`, sometimes wrapped onto
/// the next line and followed by the payer's trade details.
fn salary_receiver(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| fold_ascii(line.trim()).starts_with("ACIKLAMA"))?;
    let end = (start + 1 + DESCRIPTION_CONTINUATION).min(lines.len());
    let merged = lines[start..end].join(" ");

    let (_, tail) = merged.rsplit_once('/')?;
    let tail = tail.trim();
    let end = COMMERCIAL_TAIL.find(tail).map(|m| m.start()).unwrap_or(tail.len());
    let name = tail[..end].trim();
    name.chars()
        .any(char::is_alphabetic)
        .then(|| name.to_string())
}

/// Yapı Kredi layouts. Anything that is neither a salary advice nor a FAST
/// transfer yields an empty record.
#[derive(Debug, Clone, Copy, Default)]
pub struct YapiKrediStrategy;

impl ReceiptStrategy for YapiKrediStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Yapikredi
    }

    fn name(&self) -> &'static str {
        "yapikredi"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        if contains_any(&folded, &["MAAS ALACAK DEKONTU", "ODEME YAPAN ISIM"]) {
            record.transfer_kind.is_maas = true;
            record.transfer_kind.is_incoming = true;

            record.sender.name = first_capture(&[&PAYER], text).unwrap_or_default();
            record.sender.iban = capture_iban(&[&PAYER_IBAN], text).unwrap_or_default();
            record.amount =
                first_capture(&[&SALARY_AMOUNT], text).and_then(|raw| parse_amount(&raw));
            record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();
            record.receiver.name = salary_receiver(text).unwrap_or_default();
        } else if contains_any(&folded, &["FAST GONDERIMI", "GIDEN FAST"]) {
            record.transfer_kind.is_fast = true;
            record.transfer_kind.is_outgoing = true;

            record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();
            record.amount =
                first_capture(&[&TOTAL_AMOUNT], text).and_then(|raw| parse_amount(&raw));
            record.sender.iban = capture_iban(&[&SENDER_IBAN], text).unwrap_or_default();
            if let Some(sender) = first_capture(&[&SENDER], text) {
                record.sender.name = cut_at_any(&sender, &["ÖDEMENİN", "KAYNAĞI"]).to_string();
            }
            record.receiver.iban = capture_iban(&[&RECEIVER_IBAN], text).unwrap_or_default();
            record.receiver.name = first_capture(&[&RECEIVER], text).unwrap_or_default();
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

    const SALARY: &str = "YAPI VE KREDİ BANKASI A.Ş.
MAAŞ ALACAK DEKONTU
ÖDEME YAPAN İSİM/ÜNVAN : Acme Yazılım
IBAN NO : TR67 0006 7010 0000 0012 3456 78
İŞLEM TARİHİ : 30.09.2025
TUTAR : 42.500,00
AÇIKLAMA : MAAŞ ÖDEMESİ/ACME YAZILIM TİCARİ
LTD/AHMET YILMAZ VD 123";

    const FAST: &str = "YAPI KREDİ
GİDEN FAST
İŞLEM TARİHİ : 15.10.2025
IBAN : TR67 0006 7010 0000 0012 3456 78
GÖNDEREN ADI : AHMET YILMAZ ÖDEMENİN KAYNAĞI : MAAŞ
ALICI HESAP : TR12 0001 0000 0000 0000 0000 01
ALICI ADI : mehmet demir
TOPLAM TAHSİLAT TUTARI : -1.505,25";

    #[test]
    fn test_salary_advice() {
        let record = YapiKrediStrategy.extract(SALARY);

        assert!(record.transfer_kind.is_maas);
        assert!(record.transfer_kind.is_incoming);
        assert_eq!(record.sender.name, "ACME YAZILIM");
        assert_eq!(record.sender.iban, "TR670006701000000012345678");
        assert_eq!(record.amount, Some(Decimal::new(4250000, 2)));
        assert_eq!(record.transaction_date, "30.09.2025");
        assert_eq!(record.receiver.name, "AHMET YILMAZ");
    }

    #[test]
    fn test_outgoing_fast() {
        let record = YapiKrediStrategy.extract(FAST);

        assert!(record.transfer_kind.is_fast);
        assert!(record.transfer_kind.is_outgoing);
        assert_eq!(record.transaction_date, "15.10.2025");
        assert_eq!(record.amount, Some(Decimal::new(150525, 2)));
        assert_eq!(record.sender.name, "AHMET YILMAZ");
        assert_eq!(record.sender.iban, "TR670006701000000012345678");
        assert_eq!(record.receiver.name, "MEHMET DEMİR");
        assert_eq!(record.receiver.iban, "TR120001000000000000000001");
    }

    #[test]
    fn test_salary_receiver_name_containing_vd() {
        let text = SALARY.replace("AHMET YILMAZ VD 123", "DAVUT AVDAN VD 123");
        let record = YapiKrediStrategy.extract(&text);

        assert_eq!(record.receiver.name, "DAVUT AVDAN");
    }

    #[test]
    fn test_unknown_layout_is_empty() {
        let record = YapiKrediStrategy.extract("YAPI KREDİ\nHESAP ÖZETİ");
        assert_eq!(record, TransactionRecord::new(FormatTag::Yapikredi));
    }
}
