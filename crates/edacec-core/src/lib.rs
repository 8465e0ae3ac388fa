// ─────────────────────────────────────────────────────────────────────
// EDACEC — Volatility Index Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Tokenizer, keyword scorer, batch runner, and trend aggregator for
//! the EDACEC headline volatility index.
//!
//! # Invariants
//!
//! 1. **Bounded scores**: every component score satisfies
//!    `0 <= score <= max_score`. Matches past the cap are still listed
//!    in `matches` but never raise the score.
//!
//! 2. **Deterministic tokenization**: lowercase, hyphens to spaces, then
//!    maximal `[a-z0-9ıſ]+('[a-z0-9ıſ]+)?` runs. No stemming, no
//!    stopwords.
//!
//! 3. **Stable output schema**: component keys always serialize in
//!    structural, emotional, irreversibility, agenda order; matches are
//!    sorted; `meta` keeps input key order.
//!
//! 4. **All-or-nothing batches**: a malformed line or a missing
//!    `headline` aborts the run before anything is written. One
//!    `run_utc` is shared by every record of a run.

pub mod batch;
pub mod dated;
pub mod ingest;
pub mod publish;
pub mod report;
pub mod scorer;
pub mod tokenizer;
pub mod trend;

pub use batch::{
    format_run_utc, parse_input_records, read_input_records, write_records, BatchRunner,
    InputRecord,
};
pub use dated::{dated_output_file_name, parse_date_from_file_name};
pub use ingest::{select_candidates, HeadlineCandidate};
pub use publish::PublishPolicy;
pub use report::{rank_by_volatility, render_ranked, render_trend_table};
pub use scorer::{score_headline, Scorer};
pub use tokenizer::{token_set, tokenize};
pub use trend::{
    aggregate, aggregate_dir, discover_dated_outputs, load_scored_records, summarize_records,
};
