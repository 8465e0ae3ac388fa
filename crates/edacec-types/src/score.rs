// ─────────────────────────────────────────────────────────────────────
// EDACEC — Score Types and the Locked VI Formula
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::spec::ComponentMap;

/// VI intercept. Part of the locked formula, not configurable.
pub const VI_BASE: f64 = 0.020;

/// VI increment per point of `k_total`. Part of the locked formula.
pub const VI_PER_K: f64 = 0.027;

/// Round to 3 decimals, half away from zero.
///
/// Applied to the IEEE-754 value: `x * 1000` is rounded with
/// [`f64::round`], so `0.0625` becomes `0.063` and `-0.0625` becomes
/// `-0.063`.
#[inline]
pub fn round_vi(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// `(vi_raw, vi)` for a given `k_total`.
#[inline]
pub fn vi_from_k(k_total: u32) -> (f64, f64) {
    let vi_raw = VI_BASE + VI_PER_K * f64::from(k_total);
    (vi_raw, round_vi(vi_raw))
}

/// The HESM block of a scored headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hesm {
    /// Capped score per component, `0 <= score <= max_score`.
    pub scores: ComponentMap<u32>,
    /// Sorted unique keywords found per component (may exceed the cap).
    pub matches: ComponentMap<Vec<String>>,
    /// Sum of the four capped scores.
    pub k_total: u32,
}

/// Output of scoring one headline: the per-record score fragment.
///
/// Contains no timestamp, so scoring the same text against the same
/// spec always yields an identical value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HesmScore {
    pub hesm: Hesm,
    /// `round_vi(vi_raw)`.
    pub vi: f64,
    /// `VI_BASE + VI_PER_K * k_total`, unrounded.
    pub vi_raw: f64,
}

impl HesmScore {
    /// Build the fragment from per-component scores and matches.
    pub fn new(scores: ComponentMap<u32>, matches: ComponentMap<Vec<String>>) -> Self {
        let k_total = scores.iter().map(|(_, s)| *s).sum();
        let (vi_raw, vi) = vi_from_k(k_total);
        Self {
            hesm: Hesm {
                scores,
                matches,
                k_total,
            },
            vi,
            vi_raw,
        }
    }

    pub fn k_total(&self) -> u32 {
        self.hesm.k_total
    }
}

/// One line of a dated output file.
///
/// Field order here is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredHeadline {
    pub edacec_version: String,
    /// Verbatim input text.
    pub headline: String,
    pub hesm: Hesm,
    pub vi: f64,
    pub vi_raw: f64,
    /// Every input field except `headline`, in input order.
    #[serde(default)]
    pub meta: Map<String, Value>,
    /// Shared by every record of one batch run.
    pub run_utc: String,
}

impl ScoredHeadline {
    pub fn new(
        edacec_version: impl Into<String>,
        headline: impl Into<String>,
        score: HesmScore,
        meta: Map<String, Value>,
        run_utc: impl Into<String>,
    ) -> Self {
        Self {
            edacec_version: edacec_version.into(),
            headline: headline.into(),
            hesm: score.hesm,
            vi: score.vi,
            vi_raw: score.vi_raw,
            meta,
            run_utc: run_utc.into(),
        }
    }

    pub fn k_total(&self) -> u32 {
        self.hesm.k_total
    }

    /// String-valued metadata field, if present.
    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.meta.get(key).and_then(Value::as_str)
    }
}

/// Per-date summary of one dated output file. Recomputed on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    /// `YYYY-MM-DD`, taken from the file name.
    pub date: String,
    pub n: usize,
    pub avg_vi: f64,
    pub avg_k: f64,
    #[serde(rename = "avg_S")]
    pub avg_s: f64,
    #[serde(rename = "avg_E")]
    pub avg_e: f64,
    #[serde(rename = "avg_I")]
    pub avg_i: f64,
    #[serde(rename = "avg_A")]
    pub avg_a: f64,
    pub max_vi: f64,
}
