// ─────────────────────────────────────────────────────────────────────
// EDACEC — Command-Line Support
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Shared plumbing for the `edacec-*` binaries: logger setup and
//! optional config file loading.

use std::path::Path;

use anyhow::{Context, Result};

use edacec_types::EdacecConfig;

/// Install `env_logger`. `RUST_LOG` wins over `default_level`.
pub fn init_logging(default_level: &str) {
    let env = env_logger::Env::default().default_filter_or(default_level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_secs()
        .try_init();
}

/// Load and validate a config file, or fall back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<EdacecConfig> {
    let config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            EdacecConfig::from_json(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EdacecConfig::default(),
    };
    config.validate()?;
    Ok(config)
}
