// ─────────────────────────────────────────────────────────────────────
// EDACEC — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use std::path::PathBuf;

use thiserror::Error;

/// Root error type for all EDACEC failures.
///
/// Every variant is fatal to the run that raised it. Scoring itself is a
/// pure function, so an error here always means a caller contract was
/// violated (bad dictionary, bad input, unreachable file).
#[derive(Error, Debug)]
pub enum EdacecError {
    /// Dictionary is malformed or incomplete.
    #[error("spec load error: {0}")]
    SpecLoad(String),

    /// An input line is not valid JSON, or not a JSON object.
    #[error("input parse error on line {line}: {message}")]
    InputParse { line: usize, message: String },

    /// An input record lacks a required string field.
    #[error("missing field '{field}' on line {line}")]
    MissingField { line: usize, field: &'static str },

    /// File could not be read or written.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Output record could not be encoded.
    #[error("serialize error: {0}")]
    Serialize(String),
}

impl EdacecError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the input-side failures (bad JSON, missing headline).
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InputParse { .. } | Self::MissingField { .. })
    }
}

pub type EdacecResult<T> = Result<T, EdacecError>;
