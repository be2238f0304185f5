//! Content-shape field assignment for unlabeled faculty-row cells.
//!
//! Source tables carry no trustworthy headers, so each trailing cell is
//! matched against [`RULES`] in order. A cell goes to the first rule whose
//! field is still empty and whose predicate accepts it; a filled field is
//! never overwritten.

use crate::{
    cell::{char_len, extract_number, has_digit},
    config::Heuristics,
    record::{FacultyRecord, Field},
};

/// Returns the value to store when the cell matches.
pub type Predicate = fn(&Heuristics, &str) -> Option<String>;

pub struct Rule {
    pub field: Field,
    pub predicate: Predicate,
}

pub const RULES: &[Rule] = &[
    Rule {
        field: Field::Age,
        predicate: age,
    },
    Rule {
        field: Field::Gender,
        predicate: gender,
    },
    Rule {
        field: Field::Designation,
        predicate: designation,
    },
    Rule {
        field: Field::Experience,
        predicate: experience,
    },
    Rule {
        field: Field::Qualification,
        predicate: qualification,
    },
];

pub fn age(h: &Heuristics, cell: &str) -> Option<String> {
    extract_number(cell)
        .filter(|n| (h.age_min..=h.age_max).contains(n))
        .map(|n| n.to_string())
}

pub fn gender(h: &Heuristics, cell: &str) -> Option<String> {
    let lower = cell.trim().to_lowercase();
    h.gender_values
        .iter()
        .any(|g| g.trim().to_lowercase() == lower)
        .then(|| cell.to_string())
}

pub fn designation(h: &Heuristics, cell: &str) -> Option<String> {
    let lower = cell.to_lowercase();
    h.designation_keywords
        .iter()
        .any(|k| lower.contains(&k.to_lowercase()))
        .then(|| cell.to_string())
}

/// Any digit qualifies, so numeric cells that are not ages land here before
/// the qualification catch-all sees them.
pub fn experience(h: &Heuristics, cell: &str) -> Option<String> {
    let lower = cell.to_lowercase();
    let has_unit = h
        .experience_units
        .iter()
        .any(|u| lower.contains(&u.to_lowercase()));
    (has_unit || has_digit(cell)).then(|| cell.to_string())
}

pub fn qualification(_h: &Heuristics, cell: &str) -> Option<String> {
    (char_len(cell) > 1).then(|| cell.to_string())
}

/// Picks the rule that consumes `cell` given what `rec` already holds.
pub fn match_cell(h: &Heuristics, rec: &FacultyRecord, cell: &str) -> Option<(Field, String)> {
    RULES
        .iter()
        .filter(|r| !rec.is_filled(r.field))
        .find_map(|r| (r.predicate)(h, cell).map(|v| (r.field, v)))
}

pub fn assign_fields(h: &Heuristics, rec: &mut FacultyRecord, cells: &[String]) {
    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        if let Some((field, value)) = match_cell(h, rec, cell) {
            *rec.field_mut(field) = value;
        }
    }
}

/// Presentation form of an experience descriptor read as a month count:
/// under a year stays in months, otherwise whole or one-decimal years.
/// Text without a usable number is returned unchanged.
pub fn experience_in_years(text: &str) -> String {
    let months = match extract_number(text) {
        Some(m) if m > 0 => m,
        _ => return text.to_string(),
    };
    if months < 12 {
        return format!("{months} months");
    }
    if months % 12 == 0 {
        format!("{} years", months / 12)
    } else {
        format!("{:.1} years", months as f64 / 12.0)
    }
}
