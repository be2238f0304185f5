use crate::{
    config::Config,
    consolidate::{self, ConsolidatedTable},
    document::process_document,
    engine::Engine,
    export::{self, ExportRequest},
    record::FacultyRecord,
    report::{DocumentReport, ExportReport},
    util::{institution_label, safe_file_name},
};
use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct Pipeline<E: Engine> {
    cfg: Config,
    engine: E,
}

pub struct CorpusOutput {
    pub table: ConsolidatedTable,
    pub documents: Vec<DocumentReport>,
}

impl<E: Engine> Pipeline<E> {
    pub fn new(cfg: &Config, engine: E) -> Self {
        Self {
            cfg: cfg.clone(),
            engine,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Processes documents one after another and consolidates whatever they
    /// yield. Fails only when no document produced a record.
    pub fn run_corpus(&self, inputs: &[PathBuf]) -> Result<CorpusOutput> {
        let mut all: Vec<FacultyRecord> = Vec::new();
        let mut documents = Vec::with_capacity(inputs.len());

        for (i, input) in inputs.iter().enumerate() {
            let institution = institution_label(input);
            info!("[{}/{}] {}", i + 1, inputs.len(), input.display());
            let out = process_document(&self.cfg, &self.engine, input, &institution);
            if out.records.is_empty() {
                warn!("no faculty data found in {}", input.display());
            }
            all.extend(out.records);
            documents.push(out.report);
        }

        info!("extracted {} records from {} documents", all.len(), inputs.len());
        let table = consolidate::consolidate(&self.cfg, all)?;
        info!(
            "consolidated records={} institutions={} mean_per_institution={:.1}",
            table.stats.total_records, table.stats.institutions, table.stats.mean_per_institution
        );
        for (rank, top) in table.stats.top_institutions.iter().enumerate() {
            info!("top {}: {} ({} records)", rank + 1, top.institution, top.records);
        }

        Ok(CorpusOutput { table, documents })
    }

    /// Writes the combined table and, when configured, one table per
    /// institution.
    pub fn export(
        &self,
        table: &ConsolidatedTable,
        out_dir: Option<&Path>,
        stamp: &str,
    ) -> Result<Vec<ExportReport>> {
        let fallback = PathBuf::from(&self.cfg.output.fallback_csv_path);
        let combined = export::export_table(
            &self.cfg,
            &self.engine,
            &ExportRequest {
                table,
                file_name: format!("{}_{}.xlsx", self.cfg.output.filename_stem, stamp),
                preferred_dir: out_dir,
                fallback_csv: fallback.clone(),
                sheet_name: "Faculty".into(),
            },
        )
        .with_context(|| "exporting consolidated table")?;

        let mut reports = vec![ExportReport {
            path: combined.path.display().to_string(),
            format: combined.format,
            records: table.rows.len(),
        }];

        if !self.cfg.output.split_by_institution {
            return Ok(reports);
        }

        // Per-institution files go next to the combined one.
        let dir = combined
            .path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| anyhow!("export path has no parent: {}", combined.path.display()))?;
        let fallback_dir = fallback
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        for (institution, sub) in consolidate::split_by_institution(&self.cfg, table)? {
            let stem = format!("{}_Faculty_Data", safe_file_name(&institution));
            let res = export::export_table(
                &self.cfg,
                &self.engine,
                &ExportRequest {
                    table: &sub,
                    file_name: format!("{stem}.xlsx"),
                    preferred_dir: Some(dir.as_path()),
                    fallback_csv: fallback_dir.join(format!("{stem}.csv")),
                    sheet_name: "Faculty".into(),
                },
            );
            match res {
                Ok(out) => reports.push(ExportReport {
                    path: out.path.display().to_string(),
                    format: out.format,
                    records: sub.rows.len(),
                }),
                Err(err) => warn!("failed to save {}: {:#}", institution, err),
            }
        }

        Ok(reports)
    }
}

/// `*.pdf` files directly inside `dir`, sorted by file name.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading input dir: {}", dir.display()))?;
    let mut pdfs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            pdfs.push(path);
        }
    }
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}
