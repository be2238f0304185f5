use crate::{
    config::Config,
    document::process_document,
    engine::{Engine, python::PythonEngine},
    pipeline::{Pipeline, discover_pdfs},
    report::RunReport,
    util::{ensure_dir, file_stamp, institution_label, looks_like_url, now_rfc3339, sha256_hex},
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "faculty-roster")]
#[command(about = "Extract and consolidate faculty roster tables from institutional PDF reports")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./faculty-roster.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Doctor {},
    /// Extract records from one PDF without consolidating or exporting.
    Extract {
        #[arg(long)]
        input: PathBuf,
    },
    /// Extract every PDF in a folder, consolidate and export.
    Run {
        #[arg(long)]
        input_dir: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let out_dir = match &args.cmd {
        Command::Run { out_dir, .. } => out_dir.as_deref(),
        _ => None,
    };
    let log_path = resolve_log_path(&cfg, out_dir);
    let _guard = init_logging(&args, &cfg, log_path.as_deref())?;

    match &args.cmd {
        Command::Doctor {} => doctor(&cfg),
        Command::Extract { input } => extract(&cfg, input),
        Command::Run { input_dir, out_dir } => run(&cfg, input_dir.as_deref(), out_dir.as_deref()),
    }
}

fn load_config(user: Option<&Path>) -> Result<Config> {
    if let Some(p) = user {
        return Config::load(p);
    }
    for candidate in ["faculty-roster.toml", "faculty-roster.example.toml"] {
        let p = PathBuf::from(candidate);
        if p.exists() {
            return Config::load(&p);
        }
    }
    Ok(Config::default())
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn doctor(cfg: &Config) -> Result<()> {
    let engine = PythonEngine::new(cfg)?;
    let diag = engine.doctor()?;
    println!("{}", serde_json::to_string_pretty(&diag)?);
    Ok(())
}

fn extract(cfg: &Config, input: &Path) -> Result<()> {
    validate_input(cfg, input)?;
    let engine = PythonEngine::new(cfg)?;
    let out = process_document(cfg, &engine, input, &institution_label(input));
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "report": out.report,
            "records": out.records,
        }))?
    );
    Ok(())
}

fn run(cfg: &Config, input_dir: Option<&Path>, out_dir: Option<&Path>) -> Result<()> {
    let input_dir = input_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.input_dir));
    if cfg.security.reject_url_inputs && looks_like_url(&input_dir.display().to_string()) {
        return Err(anyhow!("URL inputs are disabled: {}", input_dir.display()));
    }
    if !input_dir.is_dir() {
        return Err(anyhow!("input folder not found: {}", input_dir.display()));
    }

    let inputs = discover_pdfs(&input_dir)?;
    if inputs.is_empty() {
        return Err(anyhow!("no PDF files found in: {}", input_dir.display()));
    }
    info!("found {} PDF files in {}", inputs.len(), input_dir.display());

    let run_id = run_id(cfg, &inputs);
    let stamp = file_stamp();
    let started = now_rfc3339();

    if cfg.debug.dump_effective_config {
        let out_root = out_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.out_dir));
        ensure_dir(&out_root)?;
        let raw = toml::to_string(cfg).unwrap_or_default();
        std::fs::write(out_root.join("effective-config.toml"), raw)?;
    }

    let engine = PythonEngine::new(cfg)?;
    let pipeline = Pipeline::new(cfg, engine);

    let corpus = pipeline.run_corpus(&inputs)?;
    // Without --out-dir the configured candidate locations decide.
    let exports = pipeline.export(&corpus.table, out_dir, &stamp)?;

    let report = RunReport {
        run_id: run_id.clone(),
        started,
        finished: now_rfc3339(),
        documents: corpus.documents,
        stats: corpus.table.stats.clone(),
        exports,
    };

    if let Some(primary) = report.exports.first().filter(|_| cfg.output.write_report_json) {
        let report_path = Path::new(&primary.path).with_extension("report.json");
        if let Err(err) = std::fs::write(&report_path, serde_json::to_string_pretty(&report)?) {
            warn!("could not write report {}: {err}", report_path.display());
        }
    }

    if cfg.global.print_summary {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "run_id": run_id,
                "stats": report.stats,
                "exports": report.exports,
                "status": "ok"
            }))?
        );
    }

    Ok(())
}

fn validate_input(cfg: &Config, input: &Path) -> Result<()> {
    let input_str = input.display().to_string();

    if cfg.security.reject_url_inputs && looks_like_url(&input_str) {
        return Err(anyhow!("URL inputs are disabled: {input_str}"));
    }

    if !input.exists() {
        return Err(anyhow!("input does not exist: {}", input.display()));
    }

    if let Some(ext) = input.extension().and_then(|s| s.to_str()) {
        if !ext.eq_ignore_ascii_case("pdf") {
            return Err(anyhow!("input is not a PDF: {}", input.display()));
        }
    } else {
        warn!("input has no extension; assuming PDF: {}", input.display());
    }

    Ok(())
}

/// Stable id over the effective config and the input set.
fn run_id(cfg: &Config, inputs: &[PathBuf]) -> String {
    let mut key = cfg.normalized_for_hash();
    for input in inputs {
        let size = std::fs::metadata(input).map(|m| m.len()).unwrap_or(0);
        key.push_str(&format!("\n{}:{}", input.display(), size));
    }
    sha256_hex(key.as_bytes())
}

pub fn resolve_log_path(cfg: &Config, out_dir: Option<&Path>) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    let dir = out_dir
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&cfg.paths.out_dir));
    Some(dir.join("faculty-roster.log"))
}
