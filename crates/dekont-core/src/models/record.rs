//! Transaction record extracted from a single bank receipt.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Recognized receipt layouts, one per issuing bank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    /// Türkiye İş Bankası (İşCep / e-dekont).
    Isbank,
    /// Akbank.
    Akbank,
    /// Vakıf Katılım.
    VakifKatilim,
    /// Kuveyt Türk.
    KuveytTurk,
    /// DenizBank.
    Denizbank,
    /// Enpara / QNB Finansbank.
    Enpara,
    /// Garanti BBVA.
    Garanti,
    /// VakıfBank.
    Vakifbank,
    /// Yapı Kredi.
    Yapikredi,
    /// Ziraat Bankası.
    Ziraat,
    /// Halkbank.
    Halkbank,
    /// ING Bank.
    Ing,
    /// No bank-identifying token found.
    #[default]
    Unknown,
}

impl FormatTag {
    /// Every tag, `Unknown` last.
    pub const ALL: [FormatTag; 13] = [
        FormatTag::Isbank,
        FormatTag::Akbank,
        FormatTag::VakifKatilim,
        FormatTag::KuveytTurk,
        FormatTag::Denizbank,
        FormatTag::Enpara,
        FormatTag::Garanti,
        FormatTag::Vakifbank,
        FormatTag::Yapikredi,
        FormatTag::Ziraat,
        FormatTag::Halkbank,
        FormatTag::Ing,
        FormatTag::Unknown,
    ];

    /// Stable lowercase identifier, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormatTag::Isbank => "isbank",
            FormatTag::Akbank => "akbank",
            FormatTag::VakifKatilim => "vakifkatilim",
            FormatTag::KuveytTurk => "kuveytturk",
            FormatTag::Denizbank => "denizbank",
            FormatTag::Enpara => "enpara",
            FormatTag::Garanti => "garanti",
            FormatTag::Vakifbank => "vakifbank",
            FormatTag::Yapikredi => "yapikredi",
            FormatTag::Ziraat => "ziraat",
            FormatTag::Halkbank => "halkbank",
            FormatTag::Ing => "ing",
            FormatTag::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != FormatTag::Unknown
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        FormatTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown format tag: {s}"))
    }
}

/// Transfer rail and direction flags.
///
/// Flags are independent; `false` means "not detected", not a negative fact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferKind {
    /// FAST instant transfer.
    pub is_fast: bool,
    /// Havale (intrabank transfer).
    pub is_havale: bool,
    /// EFT (interbank transfer).
    pub is_eft: bool,
    /// Salary (maaş) payment.
    pub is_maas: bool,
    /// Money coming into the receipt owner's account.
    pub is_incoming: bool,
    /// Money leaving the receipt owner's account.
    pub is_outgoing: bool,
}

/// One side of a transfer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Name or company title, upper-cased with Turkish rules.
    pub name: String,

    /// `TR` followed by digits, or empty.
    pub iban: String,
}

impl Party {
    /// Set the IBAN from a raw capture.
    ///
    /// Whitespace is removed; anything that is not `TR` followed only by
    /// digits is rejected and leaves the IBAN empty.
    pub fn set_iban(&mut self, raw: &str) {
        self.iban = sanitize_iban(raw).unwrap_or_default();
    }

    pub fn clear_iban(&mut self) {
        self.iban.clear();
    }

}

/// Length of a Turkish IBAN: `TR` plus 24 digits.
pub const TR_IBAN_LEN: usize = 26;

/// Strip whitespace and check the `TR` + digits shape.
///
/// Digits past [`TR_IBAN_LEN`] belong to whatever followed the IBAN on the
/// page and are cut off.
pub fn sanitize_iban(raw: &str) -> Option<String> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut compact = compact.to_ascii_uppercase();
    let digits = compact.strip_prefix("TR")?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    compact.truncate(TR_IBAN_LEN);
    Some(compact)
}

/// Troubleshooting metadata. Not meant for business logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    /// Length of the normalized input, in characters.
    pub source_length: usize,

    /// Tag returned by the classifier.
    pub format_tag: FormatTag,

    /// Name of the strategy that populated the record.
    pub strategy: String,

    /// Leading slice of the normalized input.
    pub raw_excerpt: String,

    /// Non-fatal issues met during extraction.
    pub warnings: Vec<String>,
}

/// Structured payment-transfer fields of one receipt.
///
/// Every key is always present when serialized; missing values render as
/// empty strings, `false` or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Recognized receipt format.
    pub bank: FormatTag,

    /// Transfer rail and direction.
    pub transfer_kind: TransferKind,

    /// Paying party.
    pub sender: Party,

    /// Receiving party.
    pub receiver: Party,

    /// Transfer amount in the local currency.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,

    /// `DD.MM.YYYY`, or empty.
    pub transaction_date: String,

    /// Extraction metadata.
    pub diagnostics: Diagnostics,
}

impl TransactionRecord {
    /// Create an empty record for the given format.
    pub fn new(bank: FormatTag) -> Self {
        Self {
            bank,
            ..Self::default()
        }
    }

    /// The transaction date as a calendar date, when it is one.
    ///
    /// The stored string is never validated; this is a convenience for
    /// consumers that want a real date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.transaction_date, "%d.%m.%Y").ok()
    }

    /// Names of the business fields that are still at their neutral value.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.sender.name.is_empty() {
            missing.push("sender name");
        }
        if self.sender.iban.is_empty() {
            missing.push("sender iban");
        }
        if self.receiver.name.is_empty() {
            missing.push("receiver name");
        }
        if self.receiver.iban.is_empty() {
            missing.push("receiver iban");
        }
        if self.amount.is_none() {
            missing.push("amount");
        }
        if self.transaction_date.is_empty() {
            missing.push("transaction date");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tag_round_trip() {
        for tag in FormatTag::ALL {
            assert_eq!(FormatTag::from_str(tag.as_str()), Ok(tag));
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
        }
        assert!(FormatTag::from_str("bilinmiyor").is_err());
    }

    #[test]
    fn test_sanitize_iban() {
        assert_eq!(
            sanitize_iban("TR33 0006 1005 1978 6457 8413 26"),
            Some("TR330006100519786457841326".to_string())
        );
        assert_eq!(
            sanitize_iban("TR33 0006 1005 1978 6457 8413 26 0412"),
            Some("TR330006100519786457841326".to_string())
        );
        assert_eq!(sanitize_iban("TR12 0006 **** 1234"), None);
        assert_eq!(sanitize_iban("DE89370400440532013000"), None);
        assert_eq!(sanitize_iban("TR"), None);
        assert_eq!(sanitize_iban(""), None);
    }

    #[test]
    fn test_set_iban_rejects_bad_shape() {
        let mut party = Party::default();
        party.set_iban("TR 64 0001 0");
        assert_eq!(party.iban, "TR6400010");
        party.set_iban("TR64 ABC");
        assert_eq!(party.iban, "");
    }

    #[test]
    fn test_default_record_serializes_every_key() {
        let record = TransactionRecord::default();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["bank"], "unknown");
        assert_eq!(value["amount"], serde_json::Value::Null);
        assert_eq!(value["transactionDate"], "");
        assert_eq!(value["sender"]["name"], "");
        assert_eq!(value["receiver"]["iban"], "");
        for flag in ["isFast", "isHavale", "isEft", "isMaas", "isIncoming", "isOutgoing"] {
            assert_eq!(value["transferKind"][flag], false, "{flag}");
        }
        assert_eq!(value["diagnostics"]["sourceLength"], 0);
    }

    #[test]
    fn test_amount_serializes_as_number() {
        let mut record = TransactionRecord::new(FormatTag::Garanti);
        record.amount = Some(Decimal::new(123456, 2));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["amount"].as_f64(), Some(1234.56));
    }

    #[test]
    fn test_parsed_date() {
        let mut record = TransactionRecord::default();
        record.transaction_date = "04.11.2025".to_string();
        assert_eq!(record.parsed_date(), NaiveDate::from_ymd_opt(2025, 11, 4));

        record.transaction_date = "31.02.2025".to_string();
        assert_eq!(record.parsed_date(), None);
    }

    #[test]
    fn test_missing_fields() {
        let mut record = TransactionRecord::default();
        assert_eq!(record.missing_fields().len(), 6);

        record.sender.name = "ALİ VELİ".to_string();
        record.amount = Some(Decimal::ONE);
        let missing = record.missing_fields();
        assert!(!missing.contains(&"sender name"));
        assert!(!missing.contains(&"amount"));
        assert!(missing.contains(&"receiver iban"));
    }
}
