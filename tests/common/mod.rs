#![allow(dead_code)]

use anyhow::{Result, anyhow};
use faculty_roster::{
    cell::{RawRow, RawTable},
    engine::{
        DocDiag, DocumentTables, Engine, ExtractedDocument, PageTables, TablesOut, XlsxIn, XlsxOut,
    },
};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub fn row(cells: &[&str]) -> RawRow {
    cells.iter().map(|c| Value::String(c.to_string())).collect()
}

pub fn table(rows: &[&[&str]]) -> RawTable {
    rows.iter().map(|r| row(r)).collect()
}

pub fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

/// In-memory stand-in for the pdfplumber/openpyxl engine.
#[derive(Default)]
pub struct FakeEngine {
    docs: HashMap<PathBuf, Result<Vec<PageTables>, String>>,
    /// Replies as the extraction script would send them.
    replies: HashMap<PathBuf, TablesOut>,
    /// Workbook writes to paths containing any of these fail.
    pub fail_xlsx_containing: Vec<String>,
    /// Size of the fake workbook written on success.
    pub xlsx_bytes: usize,
    pub xlsx_calls: RefCell<Vec<String>>,
    pub opened: RefCell<Vec<PathBuf>>,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self {
            xlsx_bytes: 4096,
            ..Default::default()
        }
    }

    /// One page per entry; `Err` marks a page whose extraction fails.
    pub fn with_doc(mut self, path: &str, pages: Vec<Result<Vec<RawTable>, &str>>) -> Self {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, p)| match p {
                Ok(tables) => PageTables {
                    page_number: i as u32 + 1,
                    tables,
                    error: None,
                },
                Err(e) => PageTables {
                    page_number: i as u32 + 1,
                    tables: vec![],
                    error: Some(e.to_string()),
                },
            })
            .collect();
        self.docs.insert(PathBuf::from(path), Ok(pages));
        self
    }

    /// Serves `path` from a raw extraction-script reply.
    pub fn with_reply(mut self, path: &str, reply: TablesOut) -> Self {
        self.replies.insert(PathBuf::from(path), reply);
        self
    }

    pub fn with_broken_doc(mut self, path: &str, err: &str) -> Self {
        self.docs.insert(PathBuf::from(path), Err(err.to_string()));
        self
    }
}

impl Engine for FakeEngine {
    fn doctor(&self) -> Result<DocDiag> {
        Ok(DocDiag {
            python_exe: "fake".into(),
            python_version: "0".into(),
            pdfplumber_version: None,
            openpyxl_version: None,
            ok: true,
            error: None,
        })
    }

    fn open_document(&self, input: &Path) -> Result<Box<dyn DocumentTables>> {
        self.opened.borrow_mut().push(input.to_path_buf());
        if let Some(reply) = self.replies.get(input) {
            return Ok(Box::new(ExtractedDocument::from_output(input, reply.clone())?));
        }
        match self.docs.get(input) {
            Some(Ok(pages)) => Ok(Box::new(ExtractedDocument::new(pages.clone()))),
            Some(Err(e)) => Err(anyhow!("{e}")),
            None => Err(anyhow!("no such document: {}", input.display())),
        }
    }

    fn write_xlsx(&self, req: &XlsxIn) -> Result<XlsxOut> {
        self.xlsx_calls.borrow_mut().push(req.out_path.clone());
        if self
            .fail_xlsx_containing
            .iter()
            .any(|s| req.out_path.contains(s.as_str()))
        {
            return Ok(XlsxOut {
                ok: false,
                bytes_written: 0,
                error: Some("permission denied".into()),
            });
        }
        std::fs::write(&req.out_path, vec![b'x'; self.xlsx_bytes])?;
        Ok(XlsxOut {
            ok: true,
            bytes_written: self.xlsx_bytes as u64,
            error: None,
        })
    }
}
