use anyhow::{Context, Result};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("static regex"));

pub fn ensure_dir(p: &Path) -> Result<()> {
    std::fs::create_dir_all(p).with_context(|| format!("create_dir_all {}", p.display()))
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut h = Sha256::new();
    h.update(bytes);
    format!("{:x}", h.finalize())
}

pub fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}

/// `YYYYMMDD_HHMMSS`, used to keep output file names unique per run.
pub fn file_stamp() -> String {
    let fmt = format_description!("[year][month][day]_[hour][minute][second]");
    time::OffsetDateTime::now_utc()
        .format(fmt)
        .unwrap_or_else(|_| "19700101_000000".to_string())
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// Expands `~/` and a leading `$TMP` (system temp dir).
pub fn expand_dir(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("$TMP") {
        let rest = rest.trim_start_matches(['/', '\\']);
        let tmp = std::env::temp_dir();
        return if rest.is_empty() { tmp } else { tmp.join(rest) };
    }
    expand_tilde(raw)
}

pub fn looks_like_url(s: &str) -> bool {
    let s = s.to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("file://")
}

pub fn safe_file_name(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// Institution label for a document: its file name without extension.
pub fn institution_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
