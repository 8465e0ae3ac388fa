// ─────────────────────────────────────────────────────────────────────
// EDACEC — HESM Keyword Scorer
// ─────────────────────────────────────────────────────────────────────
//! Exact keyword scorer.
//!
//! For each component C, in fixed order:
//! - `matched_C` = sorted keywords of C present in the headline's token set.
//! - `score_C = min(C.max_score, |matched_C|)`.
//!
//! Then `k_total = S + E + I + A` and `vi_raw = 0.020 + 0.027 * k_total`,
//! with `vi` rounded to 3 decimals half away from zero.

use std::sync::Arc;

use edacec_types::{ComponentMap, EdacecSpec, HesmScore};

use crate::tokenizer::token_set;

/// Score one headline against a spec.
///
/// Pure: no clock, no randomness, no I/O. Empty or unmatched text scores
/// zero everywhere with `vi = 0.020`.
pub fn score_headline(headline: &str, spec: &EdacecSpec) -> HesmScore {
    let tokens = token_set(headline);

    let matches = ComponentMap::from_fn(|name| {
        spec.component(name)
            .keywords()
            .filter(|kw| tokens.contains(*kw))
            .map(str::to_string)
            .collect::<Vec<_>>()
    });

    let scores = matches.map(|name, matched| {
        let count = u32::try_from(matched.len()).unwrap_or(u32::MAX);
        count.min(spec.component(name).max_score())
    });

    HesmScore::new(scores, matches)
}

/// Scorer bound to one loaded spec.
///
/// The dictionary is shared read-only; cloning a `Scorer` is cheap.
#[derive(Debug, Clone)]
pub struct Scorer {
    spec: Arc<EdacecSpec>,
}

impl Scorer {
    pub fn new(spec: EdacecSpec) -> Self {
        Self {
            spec: Arc::new(spec),
        }
    }

    pub fn from_shared(spec: Arc<EdacecSpec>) -> Self {
        Self { spec }
    }

    pub fn score(&self, headline: &str) -> HesmScore {
        let score = score_headline(headline, &self.spec);
        log::trace!("k={} vi={:.3} for {headline:?}", score.k_total(), score.vi);
        score
    }

    /// Read-only access to the loaded dictionary.
    pub fn spec(&self) -> &EdacecSpec {
        &self.spec
    }

    pub fn version(&self) -> &str {
        self.spec.version()
    }
}
