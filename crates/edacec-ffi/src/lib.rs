// ─────────────────────────────────────────────────────────────────────
// EDACEC — Volatility Index PyO3 FFI Bindings
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
// Note: #[deny(unsafe_code)] not applied — PyO3 proc macros generate
// unsafe blocks internally. All hand-written code in this crate is safe.
//! Python-callable wrappers around the EDACEC scorer and trend aggregator.
//!
//! Results cross the boundary as plain dicts with the same keys and order
//! as the JSONL output, so Python tooling can treat both alike.
//!
//! Install: `pip install -e crates/edacec-ffi` (requires maturin).
//!
//! Usage from Python:
//! ```python
//! from edacec_kernel import EdacecSpec, score_headline
//!
//! spec = EdacecSpec.from_path("EDACEC_v1.08_spec.json")
//! row = score_headline("Strike threat sparks collapse", spec)
//! row["vi"]  # 0.074
//! ```

use std::path::Path;
use std::sync::Arc;

use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use edacec_core::Scorer;
use edacec_types::{EdacecError, EdacecSpec, HesmScore, TrendRow};

const DEFAULT_OUTPUT_SUFFIX: &str = "_edacec_output.jsonl";

fn to_py_err(err: EdacecError) -> PyErr {
    match err {
        EdacecError::Io { .. } => PyIOError::new_err(err.to_string()),
        other => PyValueError::new_err(other.to_string()),
    }
}

// ─── PyEdacecSpec ───────────────────────────────────────────────────

/// Python-visible, immutable keyword dictionary.
#[pyclass(name = "EdacecSpec", frozen)]
#[derive(Clone)]
struct PyEdacecSpec {
    inner: Arc<EdacecSpec>,
}

#[pymethods]
impl PyEdacecSpec {
    #[staticmethod]
    fn from_json(json: &str) -> PyResult<Self> {
        let spec = EdacecSpec::from_json_str(json).map_err(to_py_err)?;
        Ok(Self {
            inner: Arc::new(spec),
        })
    }

    #[staticmethod]
    fn from_path(path: &str) -> PyResult<Self> {
        let spec = EdacecSpec::from_path(Path::new(path)).map_err(to_py_err)?;
        Ok(Self {
            inner: Arc::new(spec),
        })
    }

    #[getter]
    fn version(&self) -> String {
        self.inner.version().to_string()
    }

    /// Highest attainable `k_total`.
    #[getter]
    fn max_k(&self) -> u64 {
        self.inner.max_k()
    }

    fn __repr__(&self) -> String {
        format!(
            "EdacecSpec(version={:?}, max_k={})",
            self.inner.version(),
            self.inner.max_k()
        )
    }
}

// ─── dict builders ──────────────────────────────────────────────────

fn hesm_dict<'py>(py: Python<'py>, score: &HesmScore) -> PyResult<Bound<'py, PyDict>> {
    let scores = PyDict::new(py);
    for (name, value) in score.hesm.scores.iter() {
        scores.set_item(name.as_str(), *value)?;
    }
    let matches = PyDict::new(py);
    for (name, words) in score.hesm.matches.iter() {
        matches.set_item(name.as_str(), words.clone())?;
    }
    let hesm = PyDict::new(py);
    hesm.set_item("scores", scores)?;
    hesm.set_item("matches", matches)?;
    hesm.set_item("k_total", score.hesm.k_total)?;
    Ok(hesm)
}

fn trend_dict<'py>(py: Python<'py>, row: &TrendRow) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("date", &row.date)?;
    dict.set_item("n", row.n)?;
    dict.set_item("avg_vi", row.avg_vi)?;
    dict.set_item("avg_k", row.avg_k)?;
    dict.set_item("avg_S", row.avg_s)?;
    dict.set_item("avg_E", row.avg_e)?;
    dict.set_item("avg_I", row.avg_i)?;
    dict.set_item("avg_A", row.avg_a)?;
    dict.set_item("max_vi", row.max_vi)?;
    Ok(dict)
}

// ─── functions ──────────────────────────────────────────────────────

/// Lowercased word tokens of `text`, in order.
#[pyfunction]
fn tokenize(text: &str) -> Vec<String> {
    edacec_core::tokenize(text)
}

/// Score one headline. Returns `{edacec_version, headline, hesm, vi, vi_raw}`.
#[pyfunction]
fn score_headline<'py>(
    py: Python<'py>,
    text: &str,
    spec: &PyEdacecSpec,
) -> PyResult<Bound<'py, PyDict>> {
    let scorer = Scorer::from_shared(Arc::clone(&spec.inner));
    let score = scorer.score(text);

    let dict = PyDict::new(py);
    dict.set_item("edacec_version", scorer.version())?;
    dict.set_item("headline", text)?;
    dict.set_item("hesm", hesm_dict(py, &score)?)?;
    dict.set_item("vi", score.vi)?;
    dict.set_item("vi_raw", score.vi_raw)?;
    Ok(dict)
}

/// Per-date trend rows for the dated output files in `dir`.
#[pyfunction]
#[pyo3(signature = (dir, suffix = DEFAULT_OUTPUT_SUFFIX))]
fn aggregate_trend<'py>(
    py: Python<'py>,
    dir: &str,
    suffix: &str,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    let rows = edacec_core::aggregate_dir(Path::new(dir), suffix).map_err(to_py_err)?;
    rows.iter().map(|row| trend_dict(py, row)).collect()
}

/// EDACEC kernel module.
///
/// - `EdacecSpec` — keyword dictionary
/// - `tokenize` — headline tokenizer
/// - `score_headline` — HESM score and VI for one headline
/// - `aggregate_trend` — per-date means over dated output files
#[pymodule]
fn edacec_kernel(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEdacecSpec>()?;
    m.add_function(wrap_pyfunction!(tokenize, m)?)?;
    m.add_function(wrap_pyfunction!(score_headline, m)?)?;
    m.add_function(wrap_pyfunction!(aggregate_trend, m)?)?;
    Ok(())
}
