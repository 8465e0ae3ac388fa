// ─────────────────────────────────────────────────────────────────────
// EDACEC — Headline Candidate Selection
// ─────────────────────────────────────────────────────────────────────
//! Deterministic selection of candidate headlines from fetched feeds.
//!
//! Fetching and feed parsing live outside this crate. Whatever produces
//! the raw items hands them to [`select_candidates`], which fixes the
//! order so the same feed snapshot always yields the same sample, and
//! [`HeadlineCandidate::to_input_fields`] turns a pick into a batch input
//! line.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One feed item, already normalized to UTC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadlineCandidate {
    pub source: String,
    pub title: String,
    pub url: String,
    pub published_utc: DateTime<Utc>,
}

impl HeadlineCandidate {
    /// Batch input fields: `headline` plus `source`, `timestamp`, `url`.
    pub fn to_input_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("headline".into(), Value::String(self.title.clone()));
        fields.insert("source".into(), Value::String(self.source.clone()));
        fields.insert(
            "timestamp".into(),
            Value::String(
                self.published_utc
                    .to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
        );
        fields.insert("url".into(), Value::String(self.url.clone()));
        fields
    }
}

/// Pick up to `limit` candidates.
///
/// Items with a blank title or url are dropped. The rest are ordered by
/// publish time descending, then source ascending, then title ascending;
/// the first item seen for each url wins.
pub fn select_candidates(items: Vec<HeadlineCandidate>, limit: usize) -> Vec<HeadlineCandidate> {
    let mut items: Vec<HeadlineCandidate> = items
        .into_iter()
        .filter_map(|mut item| {
            item.title = item.title.trim().to_string();
            item.url = item.url.trim().to_string();
            (!item.title.is_empty() && !item.url.is_empty()).then_some(item)
        })
        .collect();

    items.sort_by(|a, b| {
        b.published_utc
            .cmp(&a.published_utc)
            .then_with(|| a.source.cmp(&b.source))
            .then_with(|| a.title.cmp(&b.title))
    });

    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.url.clone()))
        .take(limit)
        .collect()
}
