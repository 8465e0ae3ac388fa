//! List the files under a project root that may be published.
//! Dated measurement outputs are never listed.
//!
//! Usage: edacec-publish-plan --root .

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use edacec_cli::{init_logging, load_config};
use edacec_core::PublishPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about = "Files eligible for publishing")]
struct Args {
    /// Project root to walk
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Optional run configuration JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    let config = load_config(args.config.as_deref())?;

    let policy = PublishPolicy::default().with_output_suffix(config.output_suffix);
    for path in policy.plan(&args.root)? {
        println!("{}", path.display());
    }
    Ok(())
}
