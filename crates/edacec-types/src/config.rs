// ─────────────────────────────────────────────────────────────────────
// EDACEC — Run Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{EdacecError, EdacecResult};

/// How the batch runner opens an existing output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Add the batch after any records already in the dated file.
    #[default]
    Append,
    /// Replace the file contents with this batch.
    Truncate,
}

/// Ambient settings for a run.
///
/// Holds only file-layout and reporting knobs. The dictionary and the VI
/// formula are locked and never read from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdacecConfig {
    /// Suffix of dated output files, after the `YYYY-MM-DD` prefix.
    /// Default: `_edacec_output.jsonl`.
    pub output_suffix: String,

    /// Default: append.
    pub write_mode: WriteMode,

    /// Fewer trend rows than this is reported as "not enough data".
    /// Default: 2.
    pub min_trend_files: usize,
}

impl Default for EdacecConfig {
    fn default() -> Self {
        Self {
            output_suffix: "_edacec_output.jsonl".to_string(),
            write_mode: WriteMode::Append,
            min_trend_files: 2,
        }
    }
}

impl EdacecConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> EdacecResult<()> {
        if self.output_suffix.is_empty() {
            return Err(EdacecError::Config("output_suffix must not be empty".to_string()));
        }
        if !self.output_suffix.ends_with(".jsonl") {
            return Err(EdacecError::Config(format!(
                "output_suffix must end with .jsonl, got {:?}",
                self.output_suffix
            )));
        }
        if self.min_trend_files < 1 {
            return Err(EdacecError::Config(format!(
                "min_trend_files must be >= 1, got {}",
                self.min_trend_files
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> EdacecResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| EdacecError::Config(format!("JSON parse error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_valid() {
        assert!(EdacecConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = EdacecConfig::from_json(r#"{"write_mode": "truncate"}"#).unwrap();
        assert_eq!(cfg.write_mode, WriteMode::Truncate);
        assert_eq!(cfg.output_suffix, "_edacec_output.jsonl");
        assert_eq!(cfg.min_trend_files, 2);
    }

    #[test]
    fn test_bad_suffix() {
        let cfg = EdacecConfig {
            output_suffix: "_out.json".into(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(EdacecError::Config(_))));

        let cfg = EdacecConfig {
            output_suffix: String::new(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_zero_min_trend_files() {
        let cfg = EdacecConfig {
            min_trend_files: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_unknown_write_mode_rejected() {
        let err = EdacecConfig::from_json(r#"{"write_mode": "rotate"}"#).unwrap_err();
        assert!(matches!(err, EdacecError::Config(_)));
    }
}
