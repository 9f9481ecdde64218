//! Parsing of receipt amounts with ambiguous separators.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Keep digits, separators and the minus sign; split off a leading minus.
fn sanitize(raw: &str) -> Option<(bool, String)> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    if kept.is_empty() {
        return None;
    }
    match kept.strip_prefix('-') {
        Some(rest) => Some((true, rest.to_string())),
        None => Some((false, kept)),
    }
}

fn finish(negative: bool, number: &str) -> Option<Decimal> {
    let value = Decimal::from_str(number).ok()?;
    Some(if negative { -value } else { value })
}

/// Parse an amount whose decimal separator has to be guessed.
///
/// When both `.` and `,` occur, the last one is the decimal separator. A
/// lone `,` is always decimal. A lone `.` followed by exactly three digits
/// is read as a thousands separator, so `6.631` is 6631 but `6.63` is 6.63.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let (negative, s) = sanitize(raw.trim())?;

    let has_dot = s.contains('.');
    let has_comma = s.contains(',');

    let number = match (has_dot, has_comma) {
        (true, true) => {
            let last_dot = s.rfind('.')?;
            let last_comma = s.rfind(',')?;
            if last_dot > last_comma {
                s.replace(',', "")
            } else {
                s.replace('.', "").replace(',', ".")
            }
        }
        (false, true) => s.replace(',', "."),
        (true, false) => {
            let after = s.rsplit('.').next().unwrap_or_default();
            if after.len() == 3 && after.chars().all(|c| c.is_ascii_digit()) {
                s.replace('.', "")
            } else {
                s
            }
        }
        (false, false) => s,
    };

    finish(negative, &number)
}

/// Parse a Turkish-formatted amount: dots group thousands, comma is decimal.
pub fn parse_turkish_amount(raw: &str) -> Option<Decimal> {
    let (negative, s) = sanitize(raw.trim())?;
    finish(negative, &s.replace('.', "").replace(',', "."))
}

/// Parse an amount whose last two digits are the fractional part.
///
/// Separators are ignored entirely, so `6,660.00` and `6.660,00` are both
/// 6660.00. Input without any separator is a whole amount.
pub fn parse_minor_units(raw: &str) -> Option<Decimal> {
    let (negative, s) = sanitize(raw.trim())?;
    if !s.contains(['.', ',']) {
        return finish(negative, &s);
    }
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let scaled = if digits.len() > 2 {
        format!("{}.{}", &digits[..digits.len() - 2], &digits[digits.len() - 2..])
    } else {
        format!("0.{digits:0>2}")
    };
    finish(negative, &scaled)
}
