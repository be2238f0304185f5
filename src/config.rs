use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: Global,
    #[serde(default)]
    pub paths: Paths,
    #[serde(default)]
    pub engine: Engine,
    #[serde(default)]
    pub extraction: Extraction,
    #[serde(default)]
    pub cells: Cells,
    #[serde(default)]
    pub heuristics: Heuristics,
    #[serde(default)]
    pub consolidation: Consolidation,
    #[serde(default)]
    pub output: Output,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub debug: Debug,
    #[serde(default)]
    pub security: Security,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config: {}", path.display()))?;
        let cfg: Config = toml::from_str(&raw).with_context(|| "parsing TOML")?;
        Ok(cfg)
    }

    /// A stable, normalization-friendly string for hashing.
    pub fn normalized_for_hash(&self) -> String {
        toml::to_string(self).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Global {
    pub job_name: String,
    pub print_summary: bool,
}
impl Default for Global {
    fn default() -> Self {
        Self {
            job_name: "default".into(),
            print_summary: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Paths {
    pub input_dir: String,
    pub out_dir: String,
    pub scripts_dir: String,
}
impl Default for Paths {
    fn default() -> Self {
        Self {
            input_dir: "pdfs".into(),
            out_dir: "out".into(),
            scripts_dir: "scripts".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Engine {
    pub python_exe: String,
    /// Zero disables the subprocess timeout.
    pub timeout_seconds: u64,
    #[serde(default)]
    pub env: std::collections::BTreeMap<String, String>,
}
impl Default for Engine {
    fn default() -> Self {
        Self {
            python_exe: "auto".into(),
            timeout_seconds: 0,
            env: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Extraction {
    pub table_strategies: Vec<String>,
    pub min_table_rows: usize,
    pub max_cells: usize,
}
impl Default for Extraction {
    fn default() -> Self {
        Self {
            table_strategies: vec!["default".into()],
            min_table_rows: 2,
            max_cells: 12,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Cells {
    pub normalize_unicode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Heuristics {
    pub max_serial_cell_chars: usize,
    pub min_name_chars: usize,
    pub row_denylist: Vec<String>,
    pub serial_min: u64,
    pub serial_max: u64,
    pub age_min: u64,
    pub age_max: u64,
    pub gender_values: Vec<String>,
    pub designation_keywords: Vec<String>,
    pub experience_units: Vec<String>,
}
impl Default for Heuristics {
    fn default() -> Self {
        Self {
            max_serial_cell_chars: 10,
            min_name_chars: 2,
            row_denylist: [
                "total",
                "percentage",
                "built",
                "area",
                "laboratory",
                "playground",
                "establishment",
                "recognition",
                "accreditation",
            ]
            .map(String::from)
            .to_vec(),
            serial_min: 1,
            serial_max: 10_000,
            age_min: 18,
            age_max: 80,
            gender_values: ["m", "f", "male", "female", "m/f"].map(String::from).to_vec(),
            designation_keywords: [
                "professor",
                "lecturer",
                "assistant",
                "associate",
                "principal",
                "hod",
                "dean",
            ]
            .map(String::from)
            .to_vec(),
            experience_units: ["month", "year"].map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Consolidation {
    pub top_institutions: usize,
}
impl Default for Consolidation {
    fn default() -> Self {
        Self {
            top_institutions: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Output {
    pub filename_stem: String,
    /// Tried in order; `~/` expands to $HOME and `$TMP` to the system temp dir.
    pub candidate_dirs: Vec<String>,
    /// A written workbook must be larger than this to count as saved.
    pub min_xlsx_bytes: u64,
    pub fallback_csv_path: String,
    pub write_report_json: bool,
    pub split_by_institution: bool,
    pub experience_in_years: bool,
}
impl Default for Output {
    fn default() -> Self {
        Self {
            filename_stem: "faculty_data".into(),
            candidate_dirs: vec![
                "~/Desktop".into(),
                "~/Documents".into(),
                "~/Downloads".into(),
                ".".into(),
                "$TMP".into(),
            ],
            min_xlsx_bytes: 500,
            fallback_csv_path: "faculty_data_emergency.csv".into(),
            write_report_json: true,
            split_by_institution: false,
            experience_in_years: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    pub level: String,
    pub json: bool,
    pub write_to_file: bool,
    pub file_path: String,
}
impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".into(),
            json: false,
            write_to_file: true,
            file_path: "".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Debug {
    pub keep_python_stderr: bool,
    pub dump_effective_config: bool,
}
impl Default for Debug {
    fn default() -> Self {
        Self {
            keep_python_stderr: true,
            dump_effective_config: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Security {
    pub reject_url_inputs: bool,
    pub pin_scripts_dir: bool,
}
impl Default for Security {
    fn default() -> Self {
        Self {
            reject_url_inputs: true,
            pin_scripts_dir: true,
        }
    }
}
