// ─────────────────────────────────────────────────────────────────────
// EDACEC — Dated Output File Naming
// ─────────────────────────────────────────────────────────────────────
//! Dated output files are named `YYYY-MM-DD<suffix>`, e.g.
//! `2026-03-14_edacec_output.jsonl`. The date prefix is the only place
//! the trend aggregator learns a file's date from.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// File name for a given date, e.g. `2026-03-14_edacec_output.jsonl`.
pub fn dated_output_file_name(date: NaiveDate, suffix: &str) -> String {
    format!("{}{suffix}", date.format(DATE_FORMAT))
}

/// Parse the `YYYY-MM-DD` prefix (everything before the first `_`).
///
/// Returns `None` unless the prefix is exactly ten characters and a real
/// calendar date.
pub fn parse_date_from_file_name(file_name: &str) -> Option<NaiveDate> {
    let prefix = file_name.split('_').next()?;
    let well_formed = prefix.len() == 10
        && prefix.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(prefix, DATE_FORMAT).ok()
}
