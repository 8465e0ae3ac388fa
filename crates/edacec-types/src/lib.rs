// ─────────────────────────────────────────────────────────────────────
// EDACEC — Volatility Index Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, locked dictionary, run configuration, and error
//! hierarchy for the EDACEC headline volatility index.
//!
//! Nothing in this crate performs file I/O. The engine crate
//! (`edacec-core`) owns tokenizing, scoring, and the batch file contract.

pub mod config;
pub mod error;
pub mod score;
pub mod spec;

pub use config::{EdacecConfig, WriteMode};
pub use error::{EdacecError, EdacecResult};
pub use score::{
    round_vi, vi_from_k, Hesm, HesmScore, ScoredHeadline, TrendRow, VI_BASE, VI_PER_K,
};
pub use spec::{ComponentMap, ComponentName, ComponentSpec, EdacecSpec};
