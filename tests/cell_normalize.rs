use faculty_roster::cell::{
    decimal_digit, extract_number, has_digit, normalize, normalize_row, normalize_unicode,
};
use serde_json::{Value, json};

#[test]
fn collapses_whitespace_and_line_breaks() {
    let raw = json!("  Dr.\r\nA.  Kumar\n\tPhD  ");
    assert_eq!(normalize(&raw), "Dr. A. Kumar PhD");
}

#[test]
fn empty_placeholders_become_empty() {
    assert_eq!(normalize(&Value::Null), "");
    assert_eq!(normalize(&json!("   \n ")), "");
    assert_eq!(normalize(&json!(["nested"])), "");
    assert_eq!(normalize(&json!({"a": 1})), "");
}

#[test]
fn numbers_keep_their_text() {
    assert_eq!(normalize(&json!(42)), "42");
}

#[test]
fn normalize_is_idempotent() {
    let samples = [
        json!(" a  b "),
        json!("\r\n"),
        json!("x\u{00a0}\u{00a0}y"),
        json!("Assistant\nProfessor"),
        json!(null),
        json!(3.5),
    ];
    for raw in samples {
        let once = normalize(&raw);
        let twice = normalize(&Value::String(once.clone()));
        assert_eq!(once, twice, "not idempotent for {raw}");

        let once = normalize_unicode(&raw);
        let twice = normalize_unicode(&Value::String(once.clone()));
        assert_eq!(once, twice, "nfkc not idempotent for {raw}");
    }
}

#[test]
fn unicode_folding_is_optional() {
    let raw = vec![json!("\u{FB01}rst"), Value::Null];
    assert_eq!(normalize_row(&raw, false), vec!["\u{FB01}rst", ""]);
    assert_eq!(normalize_row(&raw, true), vec!["first", ""]);
}

#[test]
fn extracts_first_digit_run() {
    assert_eq!(extract_number("12."), Some(12));
    assert_eq!(extract_number("S.No 7 of 9"), Some(7));
    assert_eq!(extract_number("abc"), None);
    assert_eq!(extract_number(""), None);
    assert_eq!(extract_number("99999999999999999999999"), None);
}

#[test]
fn script_digits_count_as_digits() {
    assert_eq!(decimal_digit('\u{0967}'), Some(1));
    assert_eq!(decimal_digit('\u{0BEF}'), Some(9));
    assert_eq!(decimal_digit('x'), None);
    assert!(has_digit("\u{0966}"));
    assert_eq!(extract_number("\u{0967}\u{0968}."), Some(12));
    assert_eq!(extract_number("No. \u{FF17}"), Some(7));
}
