use crate::cell::RawTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocDiag {
    pub python_exe: String,
    pub python_version: String,
    pub pdfplumber_version: Option<String>,
    pub openpyxl_version: Option<String>,
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesIn {
    pub input_pdf: String,
    pub strategies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesOut {
    pub ok: bool,
    #[serde(default)]
    pub pages: Vec<PageTables>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Tables of one page, or the reason the page could not be read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageTables {
    pub page_number: u32,
    #[serde(default)]
    pub tables: Vec<RawTable>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XlsxIn {
    pub out_path: String,
    pub sheet_name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct XlsxOut {
    pub ok: bool,
    #[serde(default)]
    pub bytes_written: u64,
    #[serde(default)]
    pub error: Option<String>,
}
