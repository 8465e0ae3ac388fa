// ─────────────────────────────────────────────────────────────────────
// EDACEC — Publish Path Policy
// ─────────────────────────────────────────────────────────────────────
//! Decides which repository files may be copied to a public store.
//!
//! Source and dictionary files are published; generated measurement data
//! never is. The upload itself is done elsewhere.

use std::fs;
use std::path::{Path, PathBuf};

use edacec_types::{EdacecError, EdacecResult};

/// Path rules for publishing. All paths are relative, `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishPolicy {
    /// Directory holding dated outputs (and its `_legacy/` archive).
    pub outputs_dir: String,
    /// Suffix of dated output files; excluded wherever they appear.
    pub output_suffix: String,
    pub exclude_exact: Vec<String>,
    pub exclude_suffixes: Vec<String>,
    /// Excluded when any path component equals one of these.
    pub exclude_components: Vec<String>,
}

impl Default for PublishPolicy {
    fn default() -> Self {
        Self {
            outputs_dir: "measurement_locked/runs/outputs/".to_string(),
            output_suffix: "_edacec_output.jsonl".to_string(),
            exclude_exact: vec!["upload_to_github.sh".to_string()],
            exclude_suffixes: vec![".pyc".to_string(), ".DS_Store".to_string()],
            exclude_components: vec![
                "__pycache__".to_string(),
                ".git".to_string(),
                "target".to_string(),
            ],
        }
    }
}

impl PublishPolicy {
    pub fn with_output_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.output_suffix = suffix.into();
        self
    }

    /// True if `rel_path` must not be published.
    pub fn should_exclude(&self, rel_path: &str) -> bool {
        let rel = rel_path.replace('\\', "/");
        let rel = rel.trim_start_matches("./");

        if self.exclude_exact.iter().any(|e| e == rel) {
            return true;
        }
        if rel
            .split('/')
            .any(|part| self.exclude_components.iter().any(|c| c == part))
        {
            return true;
        }
        if self.exclude_suffixes.iter().any(|s| rel.ends_with(s.as_str())) {
            return true;
        }
        if rel.starts_with(self.outputs_dir.as_str()) && rel.ends_with(".jsonl") {
            return true;
        }
        rel.ends_with(self.output_suffix.as_str())
    }

    /// Every publishable file under `root`, relative and sorted.
    pub fn plan(&self, root: &Path) -> EdacecResult<Vec<PathBuf>> {
        let mut out = Vec::new();
        self.walk(root, root, &mut out)?;
        out.sort();
        Ok(out)
    }

    fn walk(&self, root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> EdacecResult<()> {
        let entries = fs::read_dir(dir).map_err(|e| EdacecError::io(dir, e))?;
        for entry in entries {
            let path = entry.map_err(|e| EdacecError::io(dir, e))?.path();
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let rel_str = rel.to_string_lossy();
            if path.is_dir() {
                if !self.should_exclude(&format!("{rel_str}/")) {
                    self.walk(root, &path, out)?;
                }
            } else if !self.should_exclude(&rel_str) {
                out.push(rel.to_path_buf());
            } else {
                log::debug!("not publishing {rel_str}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dated_outputs_excluded() {
        let p = PublishPolicy::default();
        assert!(p.should_exclude("measurement_locked/runs/outputs/2026-01-01_edacec_output.jsonl"));
        assert!(p.should_exclude("measurement_locked/runs/outputs/edacec_output.jsonl"));
        assert!(p.should_exclude("measurement_locked/runs/outputs/_legacy/old.jsonl"));
        assert!(p.should_exclude("elsewhere/2026-01-01_edacec_output.jsonl"));
    }

    #[test]
    fn test_source_and_inputs_published() {
        let p = PublishPolicy::default();
        assert!(!p.should_exclude("measurement_locked/EDACEC_v1.08_spec.json"));
        assert!(!p.should_exclude("measurement_locked/runs/inputs/headlines.jsonl"));
        assert!(!p.should_exclude("crates/edacec-core/src/scorer.rs"));
        assert!(!p.should_exclude("measurement_locked/runs/outputs/README.md"));
    }

    #[test]
    fn test_junk_excluded() {
        let p = PublishPolicy::default();
        assert!(p.should_exclude("upload_to_github.sh"));
        assert!(p.should_exclude("tools/__pycache__/x.cpython-311.pyc"));
        assert!(p.should_exclude("a/.DS_Store"));
        assert!(p.should_exclude(r"measurement_locked\runs\outputs\2026-01-01_edacec_output.jsonl"));
    }

    #[test]
    fn test_plan_walks_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("measurement_locked/runs/outputs")).unwrap();
        fs::create_dir_all(root.join("__pycache__")).unwrap();
        fs::write(root.join("measurement_locked/spec.json"), "{}").unwrap();
        fs::write(
            root.join("measurement_locked/runs/outputs/2026-01-01_edacec_output.jsonl"),
            "",
        )
        .unwrap();
        fs::write(root.join("__pycache__/m.pyc"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();

        let plan = PublishPolicy::default().plan(root).unwrap();
        assert_eq!(
            plan,
            vec![
                PathBuf::from("README.md"),
                PathBuf::from("measurement_locked/spec.json"),
            ]
        );
    }
}
