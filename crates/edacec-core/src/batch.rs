// ─────────────────────────────────────────────────────────────────────
// EDACEC — Batch Runner (line-delimited JSON in, dated JSONL out)
// ─────────────────────────────────────────────────────────────────────
//! Batch scoring over line-delimited JSON.
//!
//! Input lines are JSON objects with a required string `headline`; every
//! other field is carried into `meta` untouched. A run is all-or-nothing:
//! any malformed line or missing `headline` fails the whole batch before a
//! single byte is written, since a silently dropped record would skew the
//! per-date averages.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use edacec_types::{EdacecError, EdacecResult, EdacecSpec, ScoredHeadline, WriteMode};

use crate::scorer::Scorer;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub struct InputRecord {
    /// 1-based line number in the source file (or position in the batch).
    pub line: usize,
    pub fields: Map<String, Value>,
}

impl InputRecord {
    pub fn new(line: usize, fields: Map<String, Value>) -> Self {
        Self { line, fields }
    }

    /// The `headline` field, if present and a string.
    pub fn headline(&self) -> Option<&str> {
        self.fields.get("headline").and_then(Value::as_str)
    }

    /// Every field except `headline`, in input order.
    pub fn meta(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|(k, _)| k.as_str() != "headline")
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Parse line-delimited JSON objects. Blank lines are skipped but counted.
pub fn parse_input_records<R: BufRead>(reader: R) -> EdacecResult<Vec<InputRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|e| EdacecError::InputParse {
            line: line_no,
            message: e.to_string(),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value: Value =
            serde_json::from_str(trimmed).map_err(|e| EdacecError::InputParse {
                line: line_no,
                message: format!("invalid JSON: {e}"),
            })?;
        match value {
            Value::Object(fields) => records.push(InputRecord::new(line_no, fields)),
            other => {
                return Err(EdacecError::InputParse {
                    line: line_no,
                    message: format!("expected a JSON object, found {}", json_kind(&other)),
                })
            }
        }
    }
    Ok(records)
}

/// Read and parse an input file.
pub fn read_input_records(path: &Path) -> EdacecResult<Vec<InputRecord>> {
    let file = fs::File::open(path).map_err(|e| EdacecError::io(path, e))?;
    parse_input_records(BufReader::new(file))
}

/// Write a batch as one JSON object per line.
///
/// The whole batch is encoded before the file is opened, then written in
/// a single call. Parent directories are created as needed. When appending
/// to a file whose last line is unterminated, a newline is written first so
/// that line stays intact. Returns the number of records written.
pub fn write_records(
    path: &Path,
    records: &[ScoredHeadline],
    mode: WriteMode,
) -> EdacecResult<usize> {
    let mut buf = String::new();
    for record in records {
        let line =
            serde_json::to_string(record).map_err(|e| EdacecError::Serialize(e.to_string()))?;
        buf.push_str(&line);
        buf.push('\n');
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| EdacecError::io(parent, e))?;
    }

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        WriteMode::Append => options.read(true).append(true),
        WriteMode::Truncate => options.write(true).truncate(true),
    };
    let mut file = options.open(path).map_err(|e| EdacecError::io(path, e))?;
    if matches!(mode, WriteMode::Append)
        && !buf.is_empty()
        && has_unterminated_last_line(&mut file).map_err(|e| EdacecError::io(path, e))?
    {
        log::warn!("{} did not end with a newline; adding one", path.display());
        buf.insert(0, '\n');
    }
    file.write_all(buf.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| EdacecError::io(path, e))?;

    log::info!(
        "wrote {} record(s) to {} ({mode:?})",
        records.len(),
        path.display()
    );
    Ok(records.len())
}

fn has_unterminated_last_line(file: &mut fs::File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// `YYYY-MM-DDTHH:MM:SSZ`.
pub fn format_run_utc(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Scores a batch of input records against one spec.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    scorer: Scorer,
    run_at: Option<DateTime<Utc>>,
}

impl BatchRunner {
    pub fn new(spec: EdacecSpec) -> Self {
        Self::from_scorer(Scorer::new(spec))
    }

    pub fn from_scorer(scorer: Scorer) -> Self {
        Self {
            scorer,
            run_at: None,
        }
    }

    /// Pin the run timestamp instead of reading the clock at `run` time.
    pub fn with_run_utc(mut self, at: DateTime<Utc>) -> Self {
        self.run_at = Some(at);
        self
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    /// Score every record, in input order.
    ///
    /// Fails with `MissingField` on the first record without a string
    /// `headline`; nothing is returned for the other records in that case.
    pub fn run(&self, records: &[InputRecord]) -> EdacecResult<Vec<ScoredHeadline>> {
        let run_utc = format_run_utc(self.run_at.unwrap_or_else(Utc::now));
        let version = self.scorer.version();
        log::info!(
            "scoring {} record(s) with spec {version} at {run_utc}",
            records.len()
        );

        records
            .iter()
            .map(|record| -> EdacecResult<ScoredHeadline> {
                let headline = record.headline().ok_or(EdacecError::MissingField {
                    line: record.line,
                    field: "headline",
                })?;
                let score = self.scorer.score(headline);
                Ok(ScoredHeadline::new(
                    version,
                    headline,
                    score,
                    record.meta(),
                    run_utc.as_str(),
                ))
            })
            .collect()
    }

    /// Read `input`, score it, and write the batch to `output`.
    pub fn run_file(
        &self,
        input: &Path,
        output: &Path,
        mode: WriteMode,
    ) -> EdacecResult<Vec<ScoredHeadline>> {
        let records = read_input_records(input)?;
        let scored = self.run(&records)?;
        write_records(output, &scored, mode)?;
        Ok(scored)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use edacec_types::{ComponentMap, ComponentName, ComponentSpec};

    fn make_runner() -> BatchRunner {
        let spec = EdacecSpec::new(
            "batch-test",
            ComponentMap {
                structural: ComponentSpec::new(ComponentName::Structural, 2, ["strike"]),
                emotional: ComponentSpec::new(ComponentName::Emotional, 2, ["panic"]),
                irreversibility: ComponentSpec::new(ComponentName::Irreversibility, 1, ["final"]),
                agenda: ComponentSpec::new(ComponentName::Agenda, 1, ["vote"]),
            },
        );
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
        BatchRunner::new(spec).with_run_utc(at)
    }

    fn parse(text: &str) -> EdacecResult<Vec<InputRecord>> {
        parse_input_records(text.as_bytes())
    }

    #[test]
    fn test_parse_skips_blank_lines_keeps_numbers() {
        let recs = parse("{\"headline\":\"a\"}\n\n   \n{\"headline\":\"b\"}\n").unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].line, 1);
        assert_eq!(recs[1].line, 4);
    }

    #[test]
    fn test_parse_invalid_json_names_line() {
        let err = parse("{\"headline\":\"a\"}\n{oops}\n").unwrap_err();
        assert!(matches!(err, EdacecError::InputParse { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = parse("[1, 2]\n").unwrap_err();
        match err {
            EdacecError::InputParse { line, message } => {
                assert_eq!(line, 1);
                assert!(message.contains("an array"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_missing_headline_fails_whole_batch() {
        let recs = parse(
            "{\"headline\":\"Strike\"}\n{\"source\":\"AP\"}\n{\"headline\":\"Panic\"}\n",
        )
        .unwrap();
        let err = make_runner().run(&recs).unwrap_err();
        assert!(matches!(
            err,
            EdacecError::MissingField {
                line: 2,
                field: "headline"
            }
        ));
    }

    #[test]
    fn test_run_non_string_headline_rejected() {
        let recs = parse("{\"headline\": 42}\n").unwrap();
        assert!(matches!(
            make_runner().run(&recs),
            Err(EdacecError::MissingField { line: 1, .. })
        ));
    }

    #[test]
    fn test_run_preserves_order_meta_and_stamp() {
        let recs = parse(concat!(
            "{\"source\":\"Reuters\",\"headline\":\"Strike vote\",\"timestamp\":\"t1\"}\n",
            "{\"headline\":\"Quiet day\"}\n",
            "{\"headline\":\"PANIC in final hours\",\"extra\":{\"n\":1}}\n",
        ))
        .unwrap();
        let out = make_runner().run(&recs).unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(out[0].headline, "Strike vote");
        assert_eq!(out[1].headline, "Quiet day");
        assert_eq!(out[2].headline, "PANIC in final hours");

        let keys: Vec<&str> = out[0].meta.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["source", "timestamp"]);
        assert!(out[1].meta.is_empty());
        assert_eq!(out[2].meta["extra"]["n"], 1);

        assert!(out.iter().all(|r| r.run_utc == "2026-03-14T09:26:53Z"));
        assert!(out.iter().all(|r| r.edacec_version == "batch-test"));
        assert_eq!(out[0].k_total(), 2);
        assert_eq!(out[2].k_total(), 2);
    }

    #[test]
    fn test_meta_keeps_big_integers_verbatim() {
        let recs = parse(
            "{\"headline\":\"x\",\"id\":123456789012345678901234567890,\"n\":-7}\n",
        )
        .unwrap();
        let out = make_runner().run(&recs).unwrap();
        let line = serde_json::to_string(&out[0]).unwrap();
        assert!(line.contains("\"meta\":{\"id\":123456789012345678901234567890,\"n\":-7}"));

        let back: ScoredHeadline = serde_json::from_str(&line).unwrap();
        assert_eq!(back.meta["id"].to_string(), "123456789012345678901234567890");
    }

    #[test]
    fn test_run_utc_shared_without_pin() {
        let runner = BatchRunner::new(make_runner().scorer().spec().clone());
        let recs = parse("{\"headline\":\"a\"}\n{\"headline\":\"b\"}\n").unwrap();
        let out = runner.run(&recs).unwrap();
        assert_eq!(out[0].run_utc, out[1].run_utc);
        assert!(out[0].run_utc.ends_with('Z'));
        assert_eq!(out[0].run_utc.len(), "2026-03-14T09:26:53Z".len());
    }

    #[test]
    fn test_format_run_utc() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(format_run_utc(at), "2026-01-02T03:04:05Z");
    }

    #[test]
    fn test_same_batch_is_byte_identical() {
        let runner = make_runner();
        let recs = parse("{\"headline\":\"Strike panic\",\"source\":\"BBC\"}\n").unwrap();
        let a = serde_json::to_string(&runner.run(&recs).unwrap()).unwrap();
        let b = serde_json::to_string(&runner.run(&recs).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_append_after_unterminated_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2026-03-14_edacec_output.jsonl");
        fs::write(&path, "{\"headline\":\"written elsewhere\"}").unwrap();

        let recs = parse("{\"headline\":\"Strike\"}\n").unwrap();
        let out = make_runner().run(&recs).unwrap();
        write_records(&path, &out, WriteMode::Append).unwrap();
        write_records(&path, &out, WriteMode::Append).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "{\"headline\":\"written elsewhere\"}");
        for line in &lines {
            serde_json::from_str::<Value>(line).unwrap();
        }
        assert!(text.ends_with('\n'));
        assert!(!text.contains("\n\n"));
    }

    #[test]
    fn test_write_append_and_truncate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/2026-03-14_edacec_output.jsonl");
        let recs = parse("{\"headline\":\"Strike\"}\n").unwrap();
        let out = make_runner().run(&recs).unwrap();

        write_records(&path, &out, WriteMode::Append).unwrap();
        write_records(&path, &out, WriteMode::Append).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);

        write_records(&path, &out, WriteMode::Truncate).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.ends_with('\n'));
        let back: ScoredHeadline = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(back, out[0]);
    }
}
