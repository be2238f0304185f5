//! Writes the consolidated table: an `.xlsx` workbook at the first candidate
//! location that works, or a CSV file when none does.

use crate::{
    assign::experience_in_years,
    config::Config,
    consolidate::{ConsolidatedRecord, ConsolidatedTable},
    engine::{Engine, XlsxIn},
    record::{COLUMNS, EXPERIENCE_IN_YEARS_COLUMN},
    util::{ensure_dir, expand_dir},
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportOutcome {
    pub path: PathBuf,
    pub format: ExportFormat,
}

pub struct ExportRequest<'a> {
    pub table: &'a ConsolidatedTable,
    /// Workbook file name, e.g. `faculty_data_20240101_120000.xlsx`.
    pub file_name: String,
    /// Tried before the configured candidate directories.
    pub preferred_dir: Option<&'a Path>,
    pub fallback_csv: PathBuf,
    pub sheet_name: String,
}

pub fn header(cfg: &Config) -> Vec<String> {
    COLUMNS
        .iter()
        .map(|c| {
            if cfg.output.experience_in_years && *c == "Experience (in months)" {
                EXPERIENCE_IN_YEARS_COLUMN.to_string()
            } else {
                c.to_string()
            }
        })
        .collect()
}

pub fn row_values(cfg: &Config, row: &ConsolidatedRecord) -> Vec<String> {
    let r = &row.record;
    let experience = if cfg.output.experience_in_years {
        experience_in_years(&r.experience)
    } else {
        r.experience.clone()
    };
    vec![
        row.final_serial.to_string(),
        r.serial.clone(),
        r.name.clone(),
        r.age.clone(),
        r.designation.clone(),
        r.gender.clone(),
        r.qualification.clone(),
        experience,
        r.currently_working.clone(),
        r.joining_date.clone(),
        r.leaving_date.clone(),
        r.association_type.clone(),
        r.institution.clone(),
    ]
}

pub fn candidate_dirs(cfg: &Config, preferred: Option<&Path>) -> Vec<PathBuf> {
    preferred
        .map(Path::to_path_buf)
        .into_iter()
        .chain(cfg.output.candidate_dirs.iter().map(|d| expand_dir(d)))
        .collect()
}

pub fn export_table(
    cfg: &Config,
    engine: &dyn Engine,
    req: &ExportRequest<'_>,
) -> Result<ExportOutcome> {
    let columns = header(cfg);
    let rows: Vec<Vec<String>> = req.table.rows.iter().map(|r| row_values(cfg, r)).collect();

    for (attempt, dir) in candidate_dirs(cfg, req.preferred_dir).iter().enumerate() {
        let path = dir.join(&req.file_name);
        match try_xlsx(cfg, engine, &path, &req.sheet_name, &columns, &rows) {
            Ok(()) => {
                info!("saved {} records to {}", rows.len(), path.display());
                return Ok(ExportOutcome {
                    path,
                    format: ExportFormat::Xlsx,
                });
            }
            Err(err) => warn!("export attempt {} failed: {:#}", attempt + 1, err),
        }
    }

    warn!(
        "all workbook locations failed; writing CSV to {}",
        req.fallback_csv.display()
    );
    write_csv(&req.fallback_csv, &columns, &rows)?;
    Ok(ExportOutcome {
        path: req.fallback_csv.clone(),
        format: ExportFormat::Csv,
    })
}

fn try_xlsx(
    cfg: &Config,
    engine: &dyn Engine,
    path: &Path,
    sheet_name: &str,
    columns: &[String],
    rows: &[Vec<String>],
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let out = engine.write_xlsx(&XlsxIn {
        out_path: path.display().to_string(),
        sheet_name: sheet_name.to_string(),
        columns: columns.to_vec(),
        rows: rows.to_vec(),
    })?;
    if !out.ok {
        bail!(
            "workbook writer failed: {}",
            out.error.unwrap_or_else(|| "unknown error".into())
        );
    }
    let size = std::fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len();
    if size <= cfg.output.min_xlsx_bytes {
        bail!(
            "{} is only {} bytes (must exceed {})",
            path.display(),
            size,
            cfg.output.min_xlsx_bytes
        );
    }
    Ok(())
}

pub fn write_csv(path: &Path, columns: &[String], rows: &[Vec<String>]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    let mut wtr =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    wtr.write_record(columns)?;
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
