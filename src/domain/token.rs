//! Pipeline Record Types
//!
//! One owned record shape per pipeline stage. Each stage consumes the
//! previous stage's list and produces a new list of newly shaped records;
//! nothing is shared or mutated across stage boundaries.

use chrono::{DateTime, Utc};

/// A token that passed the discovery filter
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateToken {
    /// Provider coin id (e.g., "book-of-meme")
    pub id: String,
    /// Token name
    pub name: String,
    /// Token symbol (as listed, usually lowercase)
    pub symbol: String,
}

impl CandidateToken {
    /// Check whether the name or symbol contains the lexical marker,
    /// case-insensitively.
    pub fn matches_marker(&self, marker: &str) -> bool {
        let marker = marker.to_lowercase();
        self.name.to_lowercase().contains(&marker) || self.symbol.to_lowercase().contains(&marker)
    }
}

/// Normalized per-token detail record
///
/// `decline_from_high_pct` is always recomputed from `ath` and
/// `current_price`, never taken from the provider's own drop field.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// All-time-high price (USD)
    pub ath: f64,
    /// Date the ATH was recorded
    pub ath_date: Option<DateTime<Utc>>,
    /// Current price (USD)
    pub current_price: f64,
    /// Recomputed decline from ATH, percent
    pub decline_from_high_pct: f64,
    /// Solana contract address, when the provider knows one
    pub chain_address: Option<String>,
}

/// One point of a market chart: `(timestamp in ms, price)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp_ms: i64,
    pub price: f64,
}

/// Final simulated-investment record for one selected token
///
/// Immutable once constructed; consumed only by presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinMetrics {
    pub name: String,
    /// Symbol, uppercased for display
    pub symbol: String,
    /// Hypothetical entry price (USD)
    pub buying_price: f64,
    pub ath: f64,
    pub ath_date: Option<DateTime<Utc>>,
    /// Value of the position had it been sold at the ATH
    pub potential_earnings_ath: f64,
    /// ATH proceeds expressed in reference monthly costs
    pub potential_chemo_sessions: f64,
    /// Decline from ATH, percent (recomputed independently of enrichment)
    pub ath_drop_percentage: f64,
    pub current_price: f64,
    /// Value of the position at the current price
    pub current_value: f64,
    /// Zero when in profit, otherwise `current_value - investment` (never positive)
    pub loss: f64,
}
