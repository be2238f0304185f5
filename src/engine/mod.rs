pub mod python;
pub mod types;

use crate::cell::RawTable;
use anyhow::{Result, anyhow};
use std::path::Path;
use tracing::warn;

pub use types::{DocDiag, PageTables, TablesIn, TablesOut, XlsxIn, XlsxOut};

pub trait Engine {
    fn doctor(&self) -> Result<DocDiag>;
    /// Opens a document for page-by-page table reads. The handle is released
    /// when dropped.
    fn open_document(&self, input: &Path) -> Result<Box<dyn DocumentTables>>;
    fn write_xlsx(&self, req: &XlsxIn) -> Result<XlsxOut>;
}

pub trait DocumentTables {
    fn page_count(&self) -> usize;
    /// Tables found on the zero-based page `index`.
    fn page_tables(&mut self, index: usize) -> Result<Vec<RawTable>>;
}

/// A document whose pages were all extracted up front; per-page failures are
/// replayed when that page is requested.
pub struct ExtractedDocument {
    pages: Vec<PageTables>,
}

impl ExtractedDocument {
    pub fn new(pages: Vec<PageTables>) -> Self {
        Self { pages }
    }

    /// Builds the handle from the extraction script's reply.
    ///
    /// `ok = false` with no pages means the document could not be read. With
    /// some pages it means reading stopped part-way: the pages already read
    /// are kept and the abort becomes one more failed page.
    pub fn from_output(input: &Path, mut out: TablesOut) -> Result<Self> {
        if !out.ok {
            let msg = out
                .error
                .unwrap_or_else(|| "pdf_tables failed".to_string());
            if out.pages.is_empty() {
                return Err(anyhow!("{}: {msg}", input.display()));
            }
            warn!(
                "{} aborted after {} pages: {msg}",
                input.display(),
                out.pages.len()
            );
            out.pages.push(PageTables {
                page_number: out.pages.len() as u32 + 1,
                tables: vec![],
                error: Some(msg),
            });
        }
        Ok(Self::new(out.pages))
    }
}

impl DocumentTables for ExtractedDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_tables(&mut self, index: usize) -> Result<Vec<RawTable>> {
        let page = self
            .pages
            .get_mut(index)
            .ok_or_else(|| anyhow!("page index out of range: {index}"))?;
        if let Some(err) = page.error.as_deref() {
            anyhow::bail!("page {} extraction failed: {err}", page.page_number);
        }
        Ok(std::mem::take(&mut page.tables))
    }
}
