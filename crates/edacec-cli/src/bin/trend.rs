//! Per-date trend over dated EDACEC output files.
//!
//! Usage: edacec-trend --dir runs/outputs [--json]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use edacec_cli::{init_logging, load_config};
use edacec_core::{aggregate, discover_dated_outputs, render_trend_table};

#[derive(Parser, Debug)]
#[command(author, version, about = "EDACEC trend over dated runs")]
struct Args {
    /// Directory holding YYYY-MM-DD_edacec_output.jsonl files
    #[arg(long)]
    dir: PathBuf,

    /// Optional run configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON object per row instead of a table
    #[arg(long)]
    json: bool,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    let config = load_config(args.config.as_deref())?;

    let files = discover_dated_outputs(&args.dir, &config.output_suffix)?;
    let rows = aggregate(&files)
        .with_context(|| format!("aggregating {}", args.dir.display()))?;

    if rows.len() < config.min_trend_files {
        println!(
            "Need {}+ dated output files for trend.",
            config.min_trend_files
        );
        println!("Current files:");
        for f in &files {
            println!(" - {}", f.file_name().unwrap_or_default().to_string_lossy());
        }
        return Ok(());
    }

    if args.json {
        for row in &rows {
            println!("{}", serde_json::to_string(row)?);
        }
    } else {
        println!("Found {} dated runs.\n", rows.len());
        print!("{}", render_trend_table(&rows));
    }
    Ok(())
}
