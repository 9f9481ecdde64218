//! Akbank receipts.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::{FormatTag, TransactionRecord};
use crate::receipt::ReceiptStrategy;
use crate::receipt::rules::{
    FieldExtractor, IbanExtractor, capture_date, first_capture, fold_ascii, parse_amount,
    turkish_upper,
};

/// A line starting with one of these is never a name continuation.
const NOT_CONTINUATION: &[&str] = &[
    "Adres", "TR", "ÜRN", "Hesap", "Borçlu", "Alacaklı", "Müşteri",
];

lazy_static! {
    static ref DATE: Regex = Regex::new(
        r"(?i)[İIi][şs]lem\s+Tar[İIıi]h[İIıi]\s*/\s*Saat[İIıi]\s*:\s*(\d{2}\.\d{2}\.\d{4})"
    ).unwrap();
    static ref AMOUNT: Regex = Regex::new(r"(?i)TOPLAM\s*([\d.,]+)\s*TL").unwrap();
    static ref NAME_LABEL: Regex = Regex::new(r"(?i)Ad[ıi]\s+Soyad[ıi]\s*/\s*Unvan\s*:").unwrap();
}

fn continues_name(line: &str) -> bool {
    !line.is_empty()
        && !NOT_CONTINUATION.iter().any(|prefix| line.starts_with(prefix))
        && !NAME_LABEL.is_match(line)
}

/// Names in order of appearance. A line may carry one or two labeled
/// names; a company title may wrap onto the following line.
fn labeled_names(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut names = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !NAME_LABEL.is_match(line) {
            continue;
        }
        let mut parts: Vec<String> = NAME_LABEL
            .split(line)
            .skip(1)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();

        if let (Some(first), Some(next)) = (parts.first_mut(), lines.get(i + 1)) {
            if continues_name(next) {
                first.push(' ');
                first.push_str(next);
            }
        }
        names.append(&mut parts);
    }
    names
}

/// Akbank layout: `Adı Soyadı/Unvan :` names, unlabeled IBANs in
/// sender-then-receiver order.
#[derive(Debug, Clone, Copy, Default)]
pub struct AkbankStrategy;

impl ReceiptStrategy for AkbankStrategy {
    fn tag(&self) -> FormatTag {
        FormatTag::Akbank
    }

    fn name(&self) -> &'static str {
        "akbank"
    }

    fn extract(&self, text: &str) -> TransactionRecord {
        let mut record = TransactionRecord::new(self.tag());
        let folded = fold_ascii(text);

        record.transfer_kind.is_outgoing = true;
        record.transfer_kind.is_maas = folded.contains("MAAS ODEMESI");

        record.transaction_date = capture_date(&[&DATE], text).unwrap_or_default();
        record.amount = first_capture(&[&AMOUNT], text).and_then(|raw| parse_amount(&raw));

        let mut names = labeled_names(text).into_iter();
        record.sender.name = turkish_upper(&names.next().unwrap_or_default());
        record.receiver.name = turkish_upper(&names.next().unwrap_or_default());

        let joined = text.replace('\n', " ");
        let mut ibans = IbanExtractor::new().extract_all(&joined).into_iter();
        record.sender.iban = ibans.next().unwrap_or_default();
        record.receiver.iban = ibans.next().unwrap_or_default();

        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    const TRANSFER: &str = "AKBANK T.A.Ş.
Genel Müdürlük: Sabancı Center
İşlem Tarihi/Saati : 05.11.2025 14:22
Adı Soyadı/Unvan : Acme Gıda Sanayi ve Ticaret
LTD. ŞTİ.
Adres: Levent İstanbul
TR04 0004 6000 1234 5678 9012 34
Adı Soyadı/Unvan : Mehmet Demir
TR55 0006 2000 0000 0000 0000 01
TOPLAM 3.250,75 TL";

    #[test]
    fn test_names_and_ibans_in_order() {
        let record = AkbankStrategy.extract(TRANSFER);

        assert!(record.transfer_kind.is_outgoing);
        assert!(!record.transfer_kind.is_maas);
        assert_eq!(record.transaction_date, "05.11.2025");
        assert_eq!(record.amount, Some(Decimal::new(325075, 2)));
        assert_eq!(record.sender.name, "ACME GIDA SANAYİ VE TİCARET LTD. ŞTİ.");
        assert_eq!(record.sender.iban, "TR040004600012345678901234");
        assert_eq!(record.receiver.name, "MEHMET DEMİR");
        assert_eq!(record.receiver.iban, "TR550006200000000000000001");
    }

    #[test]
    fn test_two_names_on_one_line() {
        let text = "Akbank\nAdı Soyadı/Unvan : Ali Veli Adı Soyadı/Unvan : Ayşe Kaya\nHesap No : 1234\nMaaş Ödemesi";
        let record = AkbankStrategy.extract(text);

        assert!(record.transfer_kind.is_maas);
        assert_eq!(record.sender.name, "ALİ VELİ");
        assert_eq!(record.receiver.name, "AYŞE KAYA");
    }
}
