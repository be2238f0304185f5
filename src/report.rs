use crate::{consolidate::CorpusStats, export::ExportFormat};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: String,
    pub started: String,
    pub finished: String,
    pub documents: Vec<DocumentReport>,
    pub stats: CorpusStats,
    pub exports: Vec<ExportReport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentReport {
    pub path: String,
    pub institution: String,
    pub pages: usize,
    pub pages_failed: usize,
    pub tables: usize,
    pub tables_skipped: usize,
    pub rows: usize,
    pub rows_rejected: usize,
    pub records: usize,
    pub page_errors: Vec<String>,
    /// Set when the document could not be opened at all.
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReport {
    pub path: String,
    pub format: ExportFormat,
    pub records: usize,
}
