//! Ranking & Selection
//!
//! Pure, synchronous ranking of enriched detail records by decline from
//! all-time high. The decline helper here is the single source of truth -
//! enrichment and metric computation both call it, so the two recomputations
//! can never disagree.

use crate::domain::token::EnrichedDetail;

/// Percentage drop of `current_price` from `ath`.
///
/// A non-positive ATH yields 0.0 so the entry can never pass a positive
/// decline threshold.
pub fn decline_from_high(ath: f64, current_price: f64) -> f64 {
    if ath <= 0.0 {
        return 0.0;
    }
    (ath - current_price) / ath * 100.0
}

/// Filter to entries strictly above `threshold_pct`, sort descending by
/// decline, and keep the first `count`.
///
/// The sort is stable (`Vec::sort_by`), so entries with equal declines keep
/// their provider-listing order and repeated runs over identical input are
/// reproducible. Fewer than `count` survivors means all of them are returned.
pub fn select_top_losers(
    mut enriched: Vec<EnrichedDetail>,
    threshold_pct: f64,
    count: usize,
) -> Vec<EnrichedDetail> {
    enriched.retain(|e| e.decline_from_high_pct > threshold_pct);
    enriched.sort_by(|a, b| {
        b.decline_from_high_pct
            .partial_cmp(&a.decline_from_high_pct)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    enriched.truncate(count);
    enriched
}
