use crate::{
    cell::{self, RawRow, RawTable},
    classify,
    config::Config,
    engine::Engine,
    record::{self, FacultyRecord},
    report::DocumentReport,
};
use std::path::Path;
use tracing::{debug, info, warn};

pub struct DocumentOutput {
    pub records: Vec<FacultyRecord>,
    pub report: DocumentReport,
}

/// Extracts every faculty record recoverable from one document.
///
/// Never fails: a page that cannot be read is logged and skipped, and a
/// document that cannot be opened yields no records. Both are noted in the
/// returned report.
pub fn process_document(
    cfg: &Config,
    engine: &dyn Engine,
    input: &Path,
    institution: &str,
) -> DocumentOutput {
    let mut report = DocumentReport {
        path: input.display().to_string(),
        institution: institution.to_string(),
        ..Default::default()
    };
    let mut records = Vec::new();

    let mut doc = match engine.open_document(input) {
        Ok(doc) => doc,
        Err(err) => {
            warn!("failed to open {}: {:#}", input.display(), err);
            report.error = Some(format!("{err:#}"));
            return DocumentOutput { records, report };
        }
    };

    report.pages = doc.page_count();
    for index in 0..report.pages {
        let tables = match doc.page_tables(index) {
            Ok(tables) => tables,
            Err(err) => {
                warn!("{} page {}: {:#}", input.display(), index + 1, err);
                report.pages_failed += 1;
                report.page_errors.push(format!("page {}: {err:#}", index + 1));
                continue;
            }
        };
        for table in &tables {
            process_table(cfg, table, institution, &mut records, &mut report);
        }
    }

    report.records = records.len();
    info!(
        "{} pages={} failed_pages={} tables={} records={}",
        institution, report.pages, report.pages_failed, report.tables, report.records
    );
    DocumentOutput { records, report }
}

fn process_table(
    cfg: &Config,
    table: &RawTable,
    institution: &str,
    records: &mut Vec<FacultyRecord>,
    report: &mut DocumentReport,
) {
    report.tables += 1;
    if table.len() < cfg.extraction.min_table_rows {
        report.tables_skipped += 1;
        return;
    }
    for raw in table {
        if raw.is_empty() {
            continue;
        }
        report.rows += 1;
        match row_to_record(cfg, raw, institution) {
            Some(rec) => records.push(rec),
            None => report.rows_rejected += 1,
        }
    }
}

/// Records from a single table, ignoring tables below the row minimum.
pub fn table_records(cfg: &Config, table: &RawTable, institution: &str) -> Vec<FacultyRecord> {
    let mut records = Vec::new();
    let mut report = DocumentReport::default();
    process_table(cfg, table, institution, &mut records, &mut report);
    records
}

/// normalize -> classify -> serial -> build.
pub fn row_to_record(cfg: &Config, raw: &RawRow, institution: &str) -> Option<FacultyRecord> {
    let h = &cfg.heuristics;
    let row = cell::normalize_row(raw, cfg.cells.normalize_unicode);

    if let Err(reason) = classify::check(h, &row) {
        debug!(?reason, first = row.first().map(String::as_str), "row rejected");
        return None;
    }

    let serial = cell::extract_number(&row[0])
        .filter(|n| (h.serial_min..=h.serial_max).contains(n));
    let Some(serial) = serial else {
        debug!(first = %row[0], "serial out of range");
        return None;
    };

    record::build(h, &row, serial, institution, cfg.extraction.max_cells)
}
