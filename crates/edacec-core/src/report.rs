// ─────────────────────────────────────────────────────────────────────
// EDACEC — Plain-Text Reports
// ─────────────────────────────────────────────────────────────────────
//! Text renderings of scored runs and trend rows for terminal use.
//! Ranking here is presentation only; stored files keep input order.

use std::cmp::Ordering;
use std::fmt::Write as _;

use edacec_types::{ComponentName, ScoredHeadline, TrendRow};

const RULE_WIDTH: usize = 60;

/// Most volatile first: `k_total` descending, then `vi` descending.
/// Ties keep their original relative order.
pub fn rank_by_volatility(records: &[ScoredHeadline]) -> Vec<&ScoredHeadline> {
    let mut ranked: Vec<&ScoredHeadline> = records.iter().collect();
    ranked.sort_by(|a, b| {
        b.k_total()
            .cmp(&a.k_total())
            .then_with(|| b.vi.partial_cmp(&a.vi).unwrap_or(Ordering::Equal))
    });
    ranked
}

/// Numbered per-headline listing, most volatile first.
pub fn render_ranked(records: &[ScoredHeadline]) -> String {
    let mut out = String::new();
    for (i, r) in rank_by_volatility(records).into_iter().enumerate() {
        let source = r.meta_str("source").unwrap_or("Unknown");
        let timestamp = r.meta_str("timestamp").unwrap_or("Unknown");
        let s = &r.hesm.scores;

        let _ = writeln!(out, "[{}] {source} | {timestamp}", i + 1);
        let _ = writeln!(out, "Headline: {}", r.headline);
        let _ = writeln!(
            out,
            "HESM: S={} E={} I={} A={} | k={} | VI={:.3}",
            s.structural,
            s.emotional,
            s.irreversibility,
            s.agenda,
            r.k_total(),
            r.vi
        );
        let matches: Vec<String> = r
            .hesm
            .matches
            .iter()
            .filter(|(_, m)| !m.is_empty())
            .map(|(name, m)| format!("{}=[{}]", ComponentName::short(name), m.join(", ")))
            .collect();
        let matches = if matches.is_empty() {
            "none".to_string()
        } else {
            matches.join(" ")
        };
        let _ = writeln!(out, "Matches: {matches}");
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
    }
    out
}

/// Fixed-width trend table. VI columns at 3 decimals, means at 2.
pub fn render_trend_table(rows: &[TrendRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<10}  {:>4}  {:>6}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}  {:>6}",
        "DATE", "n", "avg_VI", "avg_k", "avg_S", "avg_E", "avg_I", "avg_A", "max_VI"
    );
    let _ = writeln!(
        out,
        "{}  {}  {}  {}  {}  {}  {}  {}  {}",
        "-".repeat(10),
        "-".repeat(4),
        "-".repeat(6),
        "-".repeat(5),
        "-".repeat(5),
        "-".repeat(5),
        "-".repeat(5),
        "-".repeat(5),
        "-".repeat(6),
    );
    for r in rows {
        let _ = writeln!(
            out,
            "{:<10}  {:>4}  {:>6.3}  {:>5.2}  {:>5.2}  {:>5.2}  {:>5.2}  {:>5.2}  {:>6.3}",
            r.date, r.n, r.avg_vi, r.avg_k, r.avg_s, r.avg_e, r.avg_i, r.avg_a, r.max_vi
        );
    }
    out
}
