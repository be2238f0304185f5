mod common;

use common::strings;
use faculty_roster::{
    classify::{Rejection, check, is_faculty_row},
    config::Heuristics,
};

#[test]
fn accepts_typical_faculty_row() {
    let h = Heuristics::default();
    let row = strings(&["1", "Dr. Asha Rao", "45", "Professor"]);
    assert!(is_faculty_row(&h, &row));
}

#[test]
fn rejects_in_rule_order() {
    let h = Heuristics::default();
    let rejects = |cells: &[&str], expected: Rejection| {
        assert_eq!(check(&h, &strings(cells)), Err(expected), "{cells:?}");
    };
    rejects(&["1"], Rejection::TooFewCells);
    rejects(&["", "Name"], Rejection::SerialCellShape);
    rejects(&["12345678901", "Name"], Rejection::SerialCellShape);
    rejects(&["S No", "Name"], Rejection::SerialCellNoDigit);
    rejects(&["3", ""], Rejection::NameTooShort);
    rejects(&["3", "A"], Rejection::NameTooShort);
    rejects(&["4", "Grand Total", "12"], Rejection::Denylisted);
}

#[test]
fn denylist_only_looks_at_first_three_cells() {
    let h = Heuristics::default();
    let row = strings(&["5", "Ravi", "40", "Laboratory in-charge"]);
    assert!(is_faculty_row(&h, &row));

    let row = strings(&["5", "Ravi", "Built-up AREA"]);
    assert!(!is_faculty_row(&h, &row));
}

#[test]
fn serial_cell_length_counts_characters() {
    let h = Heuristics::default();
    assert!(is_faculty_row(&h, &strings(&["1234567890", "Name"])));
    assert!(!is_faculty_row(&h, &strings(&["1234567890a", "Name"])));
}

#[test]
fn denylist_terms_match_regardless_of_case() {
    let mut h = Heuristics::default();
    h.row_denylist = strings(&["Total", "BUILT"]);
    assert_eq!(
        check(&h, &strings(&["1", "Grand Total", "9"])),
        Err(Rejection::Denylisted)
    );
    assert_eq!(
        check(&h, &strings(&["2", "Ravi", "built-up"])),
        Err(Rejection::Denylisted)
    );
}
