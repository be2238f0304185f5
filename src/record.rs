use crate::{assign, config::Heuristics};
use serde::{Deserialize, Serialize};

/// Output column titles, in export order.
pub const COLUMNS: [&str; 13] = [
    "Final Serial",
    "S No",
    "Name",
    "Age",
    "Designation",
    "Gender",
    "Qualification",
    "Experience (in months)",
    "Currently working with institution?",
    "Joining Date",
    "Leaving Date",
    "Association type",
    "Institution name",
];

pub const EXPERIENCE_IN_YEARS_COLUMN: &str = "Experience (in years)";

/// Optional record fields that the assigner may fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Age,
    Gender,
    Designation,
    Experience,
    Qualification,
    CurrentlyWorking,
    JoiningDate,
    LeavingDate,
    AssociationType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyRecord {
    pub serial: String,
    pub name: String,
    pub age: String,
    pub designation: String,
    pub gender: String,
    pub qualification: String,
    pub experience: String,
    pub currently_working: String,
    pub joining_date: String,
    pub leaving_date: String,
    pub association_type: String,
    pub institution: String,
}

impl FacultyRecord {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Age => &self.age,
            Field::Gender => &self.gender,
            Field::Designation => &self.designation,
            Field::Experience => &self.experience,
            Field::Qualification => &self.qualification,
            Field::CurrentlyWorking => &self.currently_working,
            Field::JoiningDate => &self.joining_date,
            Field::LeavingDate => &self.leaving_date,
            Field::AssociationType => &self.association_type,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Age => &mut self.age,
            Field::Gender => &mut self.gender,
            Field::Designation => &mut self.designation,
            Field::Experience => &mut self.experience,
            Field::Qualification => &mut self.qualification,
            Field::CurrentlyWorking => &mut self.currently_working,
            Field::JoiningDate => &mut self.joining_date,
            Field::LeavingDate => &mut self.leaving_date,
            Field::AssociationType => &mut self.association_type,
        }
    }

    pub fn is_filled(&self, field: Field) -> bool {
        !self.field(field).is_empty()
    }
}

/// Builds a record from a row that already passed classification.
///
/// The name is the second cell verbatim; the trailing cells go through the
/// assigner. Returns `None` when the name is empty.
pub fn build(
    h: &Heuristics,
    row: &[String],
    serial: u64,
    institution: &str,
    max_cells: usize,
) -> Option<FacultyRecord> {
    let name = row.get(1).map(|s| s.trim()).unwrap_or_default();
    if name.is_empty() {
        return None;
    }

    let mut rec = FacultyRecord {
        serial: serial.to_string(),
        name: name.to_string(),
        institution: institution.to_string(),
        ..Default::default()
    };

    let end = row.len().min(max_cells);
    if end > 2 {
        assign::assign_fields(h, &mut rec, &row[2..end]);
    }

    Some(rec)
}
