//! Cell canonicalization and number extraction.
//!
//! Everything here is total: bad input degrades to an empty string or `None`.

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

/// A raw cell as delivered by the table extractor. Usually a string or null,
/// but anything JSON can express may show up.
pub type RawCell = Value;
pub type RawRow = Vec<RawCell>;
pub type RawTable = Vec<RawRow>;

/// Canonical text of a raw cell: CR/LF become spaces, whitespace runs
/// collapse to a single space, ends are trimmed. Null and nested values
/// normalize to the empty string.
pub fn normalize(raw: &RawCell) -> String {
    match raw {
        Value::String(s) => normalize_text(s),
        Value::Number(n) => normalize_text(&n.to_string()),
        Value::Bool(b) => normalize_text(&b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

pub fn normalize_text(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Same as [`normalize`] with NFKC folding applied first.
pub fn normalize_unicode(raw: &RawCell) -> String {
    match raw {
        Value::String(s) => normalize_text(&s.nfkc().collect::<String>()),
        other => normalize(other),
    }
}

pub fn normalize_row(row: &[RawCell], unicode: bool) -> Vec<String> {
    row.iter()
        .map(|c| if unicode { normalize_unicode(c) } else { normalize(c) })
        .collect()
}

/// Code points of the digit zero in the decimal-digit blocks recognized
/// besides ASCII. Each block holds the ten digits contiguously.
const DIGIT_ZEROS: &[u32] = &[
    0x0660, // Arabic-Indic
    0x06F0, // Extended Arabic-Indic
    0x0966, // Devanagari
    0x09E6, // Bengali
    0x0A66, // Gurmukhi
    0x0AE6, // Gujarati
    0x0B66, // Oriya
    0x0BE6, // Tamil
    0x0C66, // Telugu
    0x0CE6, // Kannada
    0x0D66, // Malayalam
    0x0E50, // Thai
    0x0ED0, // Lao
    0x0F20, // Tibetan
    0x1040, // Myanmar
    0x17E0, // Khmer
    0xFF10, // Fullwidth
];

/// Value of a decimal digit in ASCII or one of the listed script blocks.
pub fn decimal_digit(c: char) -> Option<u32> {
    if let Some(d) = c.to_digit(10) {
        return Some(d);
    }
    let cp = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&cp))
        .map(|zero| cp - zero)
}

/// First maximal run of decimal digits, parsed. `None` when there are no
/// digits or the run does not fit in a `u64`.
pub fn extract_number(text: &str) -> Option<u64> {
    let mut digits = text
        .chars()
        .skip_while(|c| decimal_digit(*c).is_none())
        .map_while(decimal_digit)
        .peekable();
    digits.peek()?;
    digits.try_fold(0u64, |acc, d| acc.checked_mul(10)?.checked_add(u64::from(d)))
}

pub fn has_digit(text: &str) -> bool {
    text.chars().any(|c| decimal_digit(c).is_some())
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
