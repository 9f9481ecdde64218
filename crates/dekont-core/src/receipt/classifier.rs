//! Bank/format classification from bank-identifying tokens.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::FormatTag;
use crate::receipt::rules::contains_any;

lazy_static! {
    static ref ISBANK_REFERENCE: Regex = Regex::new(
        r"REFERANS NUMARASI\s*:\s*\d{2}\.\d{2}\.\d{4}/\d+"
    ).unwrap();
}

type Predicate = fn(&str) -> bool;

/// Ordered rules, evaluated on upper-cased text. First match wins, so
/// bank-specific markers come before names other banks' receipts may
/// mention as a counterparty.
const RULES: &[(FormatTag, Predicate)] = &[
    (FormatTag::Isbank, is_isbank),
    (FormatTag::Akbank, is_akbank_specific),
    (FormatTag::VakifKatilim, |up| {
        contains_any(up, &["VAKIF KATILIM", "VAKIFKATILIM"])
    }),
    (FormatTag::KuveytTurk, |up| {
        contains_any(up, &["KUVEYTTURK", "KUVEYT"])
    }),
    (FormatTag::Denizbank, |up| {
        contains_any(up, &["DENIZBANK", "DENİZBANK", "DENIZ BANK"])
    }),
    (FormatTag::Enpara, |up| {
        contains_any(up, &["ENPARA", "FINANSBANK", "FİNANSBANK", "QNB"])
    }),
    (FormatTag::Garanti, |up| contains_any(up, &["GARANTI", "GARANTİ"])),
    (FormatTag::Vakifbank, |up| {
        contains_any(up, &["VAKIFBANK", "T. VAKIFLAR BANKASI"])
    }),
    (FormatTag::Yapikredi, |up| {
        contains_any(up, &["YAPI KREDI", "YAPI KREDİ", "YAPI VE KREDI", "YAPI VE KREDİ"])
    }),
    (FormatTag::Ziraat, |up| contains_any(up, &["ZIRAAT", "ZİRAAT"])),
    (FormatTag::Halkbank, |up| contains_any(up, &["HALKBANK", "HALK BANK"])),
    (FormatTag::Ing, |up| {
        contains_any(up, &["ING BANK", "İNG BANK", "INGBANK"])
    }),
    (FormatTag::Akbank, |up| up.contains("AKBANK")),
];

fn is_isbank(up: &str) -> bool {
    contains_any(up, &["ISBANK.COM.TR", "İŞCEP", "ISCEP"])
        || (up.contains("E-DEKONT") && !contains_any(up, &["ZIRAAT", "ZİRAAT"]))
        || ISBANK_REFERENCE.is_match(up)
}

fn is_akbank_specific(up: &str) -> bool {
    contains_any(
        up,
        &[
            "VERGİ NO: 0150015264",
            "TR04 0004",
            "GENEL MÜDÜRLÜK: SABANCI CENTER",
            "WWW.AKBANK.COM",
        ],
    )
}

/// Identify which bank produced the receipt.
///
/// Deterministic and total: text without any recognized marker is
/// [`FormatTag::Unknown`].
pub fn classify(text: &str) -> FormatTag {
    let up = text.to_uppercase();
    RULES
        .iter()
        .find(|(_, matches)| matches(&up))
        .map(|(tag, _)| *tag)
        .unwrap_or(FormatTag::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_classify_each_bank() {
        let cases = [
            ("İşCep ile yapılan işlem", FormatTag::Isbank),
            ("www.isbank.com.tr", FormatTag::Isbank),
            ("Referans Numarası : 04.11.2025/123456", FormatTag::Isbank),
            ("Akbank T.A.Ş. www.akbank.com", FormatTag::Akbank),
            ("Vakıf Katılım Bankası A.Ş.", FormatTag::VakifKatilim),
            ("KuveytTurk Katılım Bankası", FormatTag::KuveytTurk),
            ("DenizBank A.Ş.", FormatTag::Denizbank),
            ("QNB Finansbank / Enpara.com", FormatTag::Enpara),
            ("Türkiye Garanti Bankası A.Ş.", FormatTag::Garanti),
            ("T. Vakıflar Bankası T.A.O. VakıfBank", FormatTag::Vakifbank),
            ("Yapı ve Kredi Bankası A.Ş.", FormatTag::Yapikredi),
            ("T.C. Ziraat Bankası A.Ş.", FormatTag::Ziraat),
            ("Türkiye Halk Bankası HALKBANK", FormatTag::Halkbank),
            ("ING Bank A.Ş.", FormatTag::Ing),
            ("AKBANK", FormatTag::Akbank),
        ];
        for (text, expected) in cases {
            assert_eq!(classify(text), expected, "{text}");
        }
    }

    #[test]
    fn test_specific_markers_win_over_counterparty_names() {
        // Akbank receipt sending money to a Garanti account.
        let text = "Alıcı Banka: GARANTİ BBVA\nwww.akbank.com";
        assert_eq!(classify(text), FormatTag::Akbank);

        // Ziraat e-dekont is not an İş Bankası receipt.
        let text = "ZİRAAT BANKASI E-DEKONT";
        assert_eq!(classify(text), FormatTag::Ziraat);

        let text = "VAKIF KATILIM, alıcı banka VAKIFBANK";
        assert_eq!(classify(text), FormatTag::VakifKatilim);
    }

    #[test]
    fn test_classify_unknown_and_deterministic() {
        assert_eq!(classify(""), FormatTag::Unknown);
        assert_eq!(classify("lorem ipsum 123"), FormatTag::Unknown);

        let text = "Garanti BBVA FAST";
        assert_eq!(classify(text), classify(text));
    }
}
