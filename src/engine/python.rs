use super::{DocumentTables, Engine, ExtractedDocument, types::*};
use crate::{config::Config, util::expand_tilde};
use anyhow::{Context, Result, anyhow};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const TABLES_SCRIPT: &str = "pdf_tables.py";
const XLSX_SCRIPT: &str = "xlsx_export.py";

/// Runs the helper scripts under `paths.scripts_dir`: pdfplumber for table
/// geometry, openpyxl for workbooks.
pub struct PythonEngine {
    cfg: Config,
    scripts_dir: PathBuf,
    python_exe: PathBuf,
}

impl PythonEngine {
    pub fn new(cfg: &Config) -> Result<Self> {
        let scripts_dir = PathBuf::from(&cfg.paths.scripts_dir);
        if cfg.security.pin_scripts_dir {
            let cwd = std::env::current_dir().with_context(|| "current_dir")?;
            let canon = scripts_dir
                .canonicalize()
                .with_context(|| format!("canonicalize scripts_dir: {}", scripts_dir.display()))?;
            if !canon.starts_with(&cwd) {
                return Err(anyhow!(
                    "scripts_dir is outside cwd while pin_scripts_dir=true: {}",
                    canon.display()
                ));
            }
        }
        for script in [TABLES_SCRIPT, XLSX_SCRIPT] {
            let path = scripts_dir.join(script);
            if !path.exists() {
                return Err(anyhow!("missing script: {}", path.display()));
            }
        }
        let python_exe = resolve_python_exe(&cfg.engine.python_exe);
        Ok(Self {
            cfg: cfg.clone(),
            scripts_dir,
            python_exe,
        })
    }

    fn script(&self, name: &str) -> PathBuf {
        self.scripts_dir.join(name)
    }

    fn timeout(&self) -> Option<u64> {
        (self.cfg.engine.timeout_seconds > 0).then_some(self.cfg.engine.timeout_seconds)
    }

    fn run_json<I: serde::Serialize, O: for<'de> serde::Deserialize<'de>>(
        &self,
        script: &Path,
        input: &I,
    ) -> Result<O> {
        let timeout_seconds = self.timeout();
        debug!(
            "python run {} timeout={:?}",
            script.display(),
            timeout_seconds
        );
        let mut cmd = Command::new(&self.python_exe);
        cmd.arg(script);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        for (k, v) in &self.cfg.engine.env {
            cmd.env(k, v);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning python: {}", script.display()))?;

        {
            let mut stdin = child.stdin.take().ok_or_else(|| anyhow!("no stdin"))?;
            let bytes = serde_json::to_vec(input)?;
            use std::io::Write;
            stdin.write_all(&bytes)?;
            stdin.flush().ok();
        }

        let output = if let Some(secs) = timeout_seconds {
            wait_with_timeout(&mut child, Duration::from_secs(secs))?
        } else {
            child
                .wait_with_output()
                .with_context(|| "waiting for python")?
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "python script failed: {}\n{}",
                script.display(),
                stderr
            ));
        }

        if self.cfg.debug.keep_python_stderr && !output.stderr.is_empty() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!("python stderr {}: {}", script.display(), stderr.trim());
        }

        let out: O = serde_json::from_slice(&output.stdout)
            .with_context(|| format!("parsing python JSON output: {}", script.display()))?;
        Ok(out)
    }
}

fn resolve_python_exe(raw: &str) -> PathBuf {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("auto") {
        if let Ok(env_val) = std::env::var("FACULTY_ROSTER_PYTHON") {
            let p = expand_tilde(&env_val);
            if p.exists() {
                return p;
            }
        }
        return PathBuf::from("python3");
    }
    expand_tilde(raw)
}

impl Engine for PythonEngine {
    fn doctor(&self) -> Result<DocDiag> {
        let script = self.script(TABLES_SCRIPT);
        self.run_json::<serde_json::Value, DocDiag>(&script, &serde_json::json!({"cmd":"doctor"}))
    }

    fn open_document(&self, input: &Path) -> Result<Box<dyn DocumentTables>> {
        let script = self.script(TABLES_SCRIPT);
        let tables_in = TablesIn {
            input_pdf: input.display().to_string(),
            strategies: self.cfg.extraction.table_strategies.clone(),
        };
        let req = serde_json::json!({"cmd": "extract", "req": tables_in});
        let out: TablesOut = self.run_json(&script, &req)?;
        Ok(Box::new(ExtractedDocument::from_output(input, out)?))
    }

    fn write_xlsx(&self, req: &XlsxIn) -> Result<XlsxOut> {
        let script = self.script(XLSX_SCRIPT);
        let out: XlsxOut = self.run_json(&script, req)?;
        if !out.ok {
            warn!(
                "xlsx export returned ok=false for {}: {}",
                req.out_path,
                out.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(out)
    }
}

fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Output> {
    // Drain pipes while waiting so a chatty script can't deadlock on a full
    // stdout/stderr buffer.
    let stdout_reader = child.stdout.take();
    let stderr_reader = child.stderr.take();

    let stdout_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout_reader {
            out.read_to_end(&mut buf).with_context(|| "read stdout")?;
        }
        Ok(buf)
    });

    let stderr_thread = std::thread::spawn(move || -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut err) = stderr_reader {
            err.read_to_end(&mut buf).with_context(|| "read stderr")?;
        }
        Ok(buf)
    });

    let start = Instant::now();
    loop {
        if let Some(status) = child.try_wait().with_context(|| "try_wait")? {
            let stdout = stdout_thread
                .join()
                .map_err(|_| anyhow!("stdout reader thread panicked"))??;
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Ok(Output {
                status,
                stdout,
                stderr,
            });
        }

        if start.elapsed() > timeout {
            warn!("python process timed out after {:?}", timeout);
            let _ = child.kill();
            child.wait().with_context(|| "wait after kill")?;
            let _ = stdout_thread.join();
            let stderr = stderr_thread
                .join()
                .map_err(|_| anyhow!("stderr reader thread panicked"))??;
            return Err(anyhow!(
                "python process exceeded timeout ({:?}); stderr: {}",
                timeout,
                String::from_utf8_lossy(&stderr)
            ));
        }

        std::thread::sleep(Duration::from_millis(50));
    }
}
