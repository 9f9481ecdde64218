//! Rule-based building blocks shared by the receipt strategies.

pub mod amounts;
pub mod dates;
pub mod iban;
pub mod labels;
pub mod names;
pub mod patterns;
pub mod text;

pub use amounts::{parse_amount, parse_minor_units, parse_turkish_amount};
pub use dates::{DateExtractor, capture_date, normalize_date};
pub use iban::{IbanExtractor, capture_iban};
pub use labels::{contains_any, cut_at_any, first_capture, non_empty_lines};
pub use names::{clean_name, strip_label_suffix, trim_fragment};
pub use text::{fold_ascii, fold_name_case, normalize_text, turkish_upper};

/// Trait for field extractors that scan free text.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    /// Extract all occurrences of the field, in text order.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}
