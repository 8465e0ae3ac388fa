// ─────────────────────────────────────────────────────────────────────
// EDACEC — Headline Tokenizer
// ─────────────────────────────────────────────────────────────────────
//! Deterministic word tokenizer.
//!
//! 1. Lowercase the whole input.
//! 2. Replace every `-` with a space, so `co-operate` yields `co`, `operate`.
//! 3. Take maximal runs of word characters, optionally followed by one
//!    internal apostrophe and another run (`don't`, `nation's`).
//!    Everything else separates tokens.
//!
//! Word characters are `a-z`, `0-9`, and the two non-ASCII letters that
//! case-insensitively equal an ASCII one: dotless `ı` (i) and long `ſ`
//! (s). Both stay as written in the token, so `ſtrike` is one token but
//! does not match the keyword `strike`.
//!
//! Token boundaries are part of the scoring contract and must not drift.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z0-9\x{131}\x{17F}]+(?:'[a-z0-9\x{131}\x{17F}]+)?")
        .expect("word pattern is a valid regex")
});

/// Tokens in source order, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase().replace('-', " ");
    WORD_REGEX
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// De-duplicated tokens, the form the scorer matches against.
pub fn token_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}
