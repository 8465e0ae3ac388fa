//! Score a line-delimited JSON batch of headlines into a dated output file.
//!
//! Usage: edacec-score --spec EDACEC_v1.08_spec.json \
//!            --in runs/inputs/headlines.jsonl \
//!            --out runs/outputs/2026-03-14_edacec_output.jsonl

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use edacec_cli::{init_logging, load_config};
use edacec_core::{parse_date_from_file_name, BatchRunner};
use edacec_types::{EdacecSpec, WriteMode};

#[derive(Parser, Debug)]
#[command(author, version, about = "EDACEC deterministic headline scorer")]
struct Args {
    /// Path to the EDACEC spec JSON
    #[arg(long)]
    spec: PathBuf,

    /// Input JSONL file (each line requires 'headline')
    #[arg(long = "in")]
    input: PathBuf,

    /// Output JSONL file path
    #[arg(long)]
    out: PathBuf,

    /// Optional run configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Replace the output file instead of appending to it
    #[arg(long)]
    truncate: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let config = load_config(args.config.as_deref())?;
    let mode = if args.truncate {
        WriteMode::Truncate
    } else {
        config.write_mode
    };

    let spec = EdacecSpec::from_path(&args.spec)
        .with_context(|| format!("loading spec {}", args.spec.display()))?;
    warn_if_undated(&args.out, &config.output_suffix);

    let scored = BatchRunner::new(spec)
        .run_file(&args.input, &args.out, mode)
        .with_context(|| format!("scoring {}", args.input.display()))?;

    println!("Scored {} headline(s) -> {}", scored.len(), args.out.display());
    Ok(())
}

fn warn_if_undated(out: &Path, suffix: &str) {
    let name = out.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if parse_date_from_file_name(name).is_none() || !name.ends_with(suffix) {
        log::warn!(
            "{} is not named YYYY-MM-DD{suffix}; the trend aggregator will not pick it up",
            out.display()
        );
    }
}
