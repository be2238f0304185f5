use crate::{
    cell::{char_len, has_digit},
    config::Heuristics,
};
use serde::{Deserialize, Serialize};

/// Why a normalized row was not taken as a faculty row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    TooFewCells,
    SerialCellShape,
    SerialCellNoDigit,
    NameTooShort,
    Denylisted,
}

/// Checks run in order; the first failing one decides.
pub fn check(h: &Heuristics, row: &[String]) -> Result<(), Rejection> {
    if row.len() < 2 {
        return Err(Rejection::TooFewCells);
    }

    let first = row[0].trim();
    if first.is_empty() || char_len(first) > h.max_serial_cell_chars {
        return Err(Rejection::SerialCellShape);
    }
    if !has_digit(first) {
        return Err(Rejection::SerialCellNoDigit);
    }

    let second = row[1].trim();
    if second.is_empty() || char_len(second) < h.min_name_chars {
        return Err(Rejection::NameTooShort);
    }

    let head = row
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    if h
        .row_denylist
        .iter()
        .any(|term| head.contains(&term.to_lowercase()))
    {
        return Err(Rejection::Denylisted);
    }

    Ok(())
}

pub fn is_faculty_row(h: &Heuristics, row: &[String]) -> bool {
    check(h, row).is_ok()
}
