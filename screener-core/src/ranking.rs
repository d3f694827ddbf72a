//! Result ranking: sort by score, keep the top N.
//!
//! The sort is stable, so instruments with equal scores keep the order in
//! which they were collected. No deduplication happens here; the ticker
//! list is already de-duplicated upstream.

use crate::result::{DisplayRecord, ScoredResult};

/// Default number of ranked results kept.
pub const DEFAULT_TOP_N: usize = 50;

/// Sort descending by score (stable on ties) and truncate to `limit`.
pub fn rank(mut results: Vec<ScoredResult>, limit: usize) -> Vec<ScoredResult> {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
    results.truncate(limit);
    results
}

/// Ranked display rows with the score stripped.
pub fn display_rows(ranked: &[ScoredResult], exchange_suffix: &str) -> Vec<DisplayRecord> {
    ranked
        .iter()
        .map(|r| r.to_display(exchange_suffix))
        .collect()
}
