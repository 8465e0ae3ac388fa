//! Ranked, human-readable listing of one scored output file.
//!
//! Usage: edacec-interpret --in runs/outputs/2026-03-14_edacec_output.jsonl

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use edacec_cli::init_logging;
use edacec_core::{load_scored_records, render_ranked};

#[derive(Parser, Debug)]
#[command(author, version, about = "Read an EDACEC output file, most volatile first")]
struct Args {
    /// Scored JSONL file
    #[arg(long = "in")]
    input: PathBuf,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let rows = load_scored_records(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!("Loaded {} scored headlines.\n", rows.len());
    print!("{}", render_ranked(&rows));
    Ok(())
}
