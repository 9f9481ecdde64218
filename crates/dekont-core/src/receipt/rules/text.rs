//! Text normalization and Turkish-aware case mapping.

use unicode_normalization::UnicodeNormalization;

/// Characters removed outright: zero-width spaces, joiners, soft hyphens, BOM.
fn is_invisible(c: char) -> bool {
    matches!(
        c,
        '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}

/// Spacing accents such as `¨` or `´`, whose NFKC form is a space plus a
/// combining mark.
fn is_spacing_accent(c: char) -> bool {
    !c.is_whitespace() && std::iter::once(c).nfkc().any(char::is_whitespace)
}

/// Letters that only a Turkish-aware text layer prints.
fn is_turkish_letter(c: char) -> bool {
    matches!(
        c,
        'İ' | 'ı' | 'Ş' | 'ş' | 'Ğ' | 'ğ' | 'Ü' | 'ü' | 'Ö' | 'ö' | 'Ç' | 'ç'
    )
}

/// Normalize extracted receipt text.
///
/// Drops spacing accents, applies NFKC, maps NBSP to a plain space,
/// collapses runs of horizontal whitespace into one space and trims every
/// line as well as the whole text. Line breaks are kept because several
/// layouts are line-oriented.
pub fn normalize_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let composed: String = text
        .chars()
        .filter(|c| !is_spacing_accent(*c))
        .nfkc()
        .filter(|c| !is_invisible(*c))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect();

    let lines: Vec<String> = composed
        .split('\n')
        .map(|line| {
            let mut out = String::with_capacity(line.len());
            let mut in_space = false;
            for c in line.chars() {
                if c.is_whitespace() {
                    in_space = true;
                    continue;
                }
                if in_space && !out.is_empty() {
                    out.push(' ');
                }
                in_space = false;
                out.push(c);
            }
            out
        })
        .collect();

    lines.join("\n").trim().to_string()
}

/// Upper-case with the Turkish dotted/dotless I mapping.
pub fn turkish_upper(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            'ğ' => out.push('Ğ'),
            'ü' => out.push('Ü'),
            'ş' => out.push('Ş'),
            'ö' => out.push('Ö'),
            'ç' => out.push('Ç'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Upper-case a name, folding every ASCII `I`/`i` to `İ`.
///
/// Receipts without diacritics print `ALI VELI` for `ALİ VELİ`. A name
/// that already carries a Turkish letter was printed with diacritics, so
/// its plain `I` is a real dotless one and only [`turkish_upper`] applies.
pub fn fold_name_case(s: &str) -> String {
    if s.chars().any(is_turkish_letter) {
        return turkish_upper(s);
    }

    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'I' | 'i' => out.push('İ'),
            'ı' => out.push('I'),
            _ => out.push_str(&turkish_upper(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out
}

/// Upper-case and drop Turkish diacritics (`İŞLEM` and `işlem` both give
/// `ISLEM`). Used for keyword checks that must not care how a receipt
/// spells its letters.
pub fn fold_ascii(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'İ' | 'ı' | 'i' => out.push('I'),
            'Ş' | 'ş' => out.push('S'),
            'Ğ' | 'ğ' => out.push('G'),
            'Ü' | 'ü' => out.push('U'),
            'Ö' | 'ö' => out.push('O'),
            'Ç' | 'ç' => out.push('C'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}
