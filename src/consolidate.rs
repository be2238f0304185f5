use crate::{config::Config, record::FacultyRecord};
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Sort key given to records whose serial is not a number.
pub const NON_NUMERIC_SERIAL_KEY: u64 = u64::MAX;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedRecord {
    pub final_serial: usize,
    pub record: FacultyRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedTable {
    pub rows: Vec<ConsolidatedRecord>,
    pub stats: CorpusStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_records: usize,
    pub institutions: usize,
    pub mean_per_institution: f64,
    pub top_institutions: Vec<InstitutionCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionCount {
    pub institution: String,
    pub records: usize,
}

pub fn serial_sort_key(serial: &str) -> u64 {
    serial.trim().parse().unwrap_or(NON_NUMERIC_SERIAL_KEY)
}

/// Drops later records sharing (institution, name) with an earlier one.
pub fn dedup(records: Vec<FacultyRecord>) -> Vec<FacultyRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| seen.insert((r.institution.clone(), r.name.clone())))
        .collect()
}

/// Dedup, stable sort by (institution, numeric serial), then dense 1-based
/// renumbering. An empty corpus is an error.
pub fn consolidate(cfg: &Config, records: Vec<FacultyRecord>) -> Result<ConsolidatedTable> {
    if records.is_empty() {
        bail!("no faculty records extracted from any document");
    }

    let mut records = dedup(records);
    records.sort_by_cached_key(|r| (r.institution.clone(), serial_sort_key(&r.serial)));

    let rows: Vec<ConsolidatedRecord> = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| ConsolidatedRecord {
            final_serial: i + 1,
            record,
        })
        .collect();

    let stats = stats(&rows, cfg.consolidation.top_institutions);
    Ok(ConsolidatedTable { rows, stats })
}

pub fn stats(rows: &[ConsolidatedRecord], top_n: usize) -> CorpusStats {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in rows {
        *counts.entry(r.record.institution.as_str()).or_insert(0) += 1;
    }

    let mut top: Vec<InstitutionCount> = counts
        .iter()
        .map(|(inst, n)| InstitutionCount {
            institution: inst.to_string(),
            records: *n,
        })
        .collect();
    // BTreeMap order plus a stable sort leaves ties ordered by name.
    top.sort_by(|a, b| b.records.cmp(&a.records));
    top.truncate(top_n);

    let institutions = counts.len();
    let mean_per_institution = if institutions == 0 {
        0.0
    } else {
        rows.len() as f64 / institutions as f64
    };

    CorpusStats {
        total_records: rows.len(),
        institutions,
        mean_per_institution,
        top_institutions: top,
    }
}

/// Records grouped by institution, each group consolidated on its own.
pub fn split_by_institution(
    cfg: &Config,
    table: &ConsolidatedTable,
) -> Result<Vec<(String, ConsolidatedTable)>> {
    let mut groups: BTreeMap<String, Vec<FacultyRecord>> = BTreeMap::new();
    for row in &table.rows {
        groups
            .entry(row.record.institution.clone())
            .or_default()
            .push(row.record.clone());
    }
    groups
        .into_iter()
        .map(|(inst, records)| Ok((inst, consolidate(cfg, records)?)))
        .collect()
}
