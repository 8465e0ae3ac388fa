// ─────────────────────────────────────────────────────────────────────
// EDACEC — Trend Aggregator
// ─────────────────────────────────────────────────────────────────────
//! Reduces dated output files into one [`TrendRow`] per date.
//!
//! Files with zero records, or whose name carries no valid `YYYY-MM-DD`
//! prefix, are left out of the trend. Deciding whether the remaining rows
//! are "enough data" belongs to the caller.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use edacec_types::{EdacecError, EdacecResult, ScoredHeadline, TrendRow};

use crate::dated::parse_date_from_file_name;

/// Dated output files in `dir` whose name ends with `suffix`, sorted by name.
pub fn discover_dated_outputs(dir: &Path, suffix: &str) -> EdacecResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| EdacecError::io(dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EdacecError::io(dir, e))?;
        let path = entry.path();
        let matches_suffix = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(suffix));
        if matches_suffix && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load every record of a scored output file. Blank lines are skipped.
pub fn load_scored_records(path: &Path) -> EdacecResult<Vec<ScoredHeadline>> {
    let file = fs::File::open(path).map_err(|e| EdacecError::io(path, e))?;
    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| EdacecError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| EdacecError::InputParse {
            line: idx + 1,
            message: format!("{}: {e}", path.display()),
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Means and max for one date. `None` when `records` is empty.
pub fn summarize_records(date: &str, records: &[ScoredHeadline]) -> Option<TrendRow> {
    if records.is_empty() {
        return None;
    }
    let n = records.len();
    Some(TrendRow {
        date: date.to_string(),
        n,
        avg_vi: mean(records, |r| r.vi),
        avg_k: mean(records, |r| f64::from(r.hesm.k_total)),
        avg_s: mean(records, |r| f64::from(r.hesm.scores.structural)),
        avg_e: mean(records, |r| f64::from(r.hesm.scores.emotional)),
        avg_i: mean(records, |r| f64::from(r.hesm.scores.irreversibility)),
        avg_a: mean(records, |r| f64::from(r.hesm.scores.agenda)),
        max_vi: records.iter().map(|r| r.vi).fold(f64::NEG_INFINITY, f64::max),
    })
}

fn mean(records: &[ScoredHeadline], f: impl Fn(&ScoredHeadline) -> f64) -> f64 {
    records.iter().map(f).sum::<f64>() / records.len() as f64
}

/// One row per non-empty dated file, ascending by date.
pub fn aggregate(files: &[PathBuf]) -> EdacecResult<Vec<TrendRow>> {
    let mut rows = Vec::with_capacity(files.len());

    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::warn!("skipping {}: file name is not UTF-8", path.display());
            continue;
        };
        if parse_date_from_file_name(name).is_none() {
            log::warn!("skipping {name}: no YYYY-MM-DD prefix");
            continue;
        }
        let date = &name[..10];

        let records = load_scored_records(path)?;
        match summarize_records(date, &records) {
            Some(row) => {
                log::debug!("{date}: n={} avg_vi={:.3}", row.n, row.avg_vi);
                rows.push(row);
            }
            None => log::info!("skipping {name}: no records"),
        }
    }

    rows.sort_by(|a, b| a.date.cmp(&b.date));
    Ok(rows)
}

/// [`discover_dated_outputs`] followed by [`aggregate`].
pub fn aggregate_dir(dir: &Path, suffix: &str) -> EdacecResult<Vec<TrendRow>> {
    let files = discover_dated_outputs(dir, suffix)?;
    aggregate(&files)
}
