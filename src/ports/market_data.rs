//! Market Data Port
//!
//! Trait abstraction over the external price-data provider. The records here
//! are provider-shaped but neutral: the CoinGecko adapter maps its wire
//! format into them, and the pipeline normalizes them further into domain
//! records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::domain::token::PricePoint;

/// Market data error type
#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned status {status}")]
    Api { endpoint: String, status: u16 },

    #[error("Response parse error: {0}")]
    Parse(String),
}

/// One entry of the category listing
#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

/// Raw per-token detail record
///
/// USD quotes are optional because the provider omits them for some listings;
/// the pipeline treats a missing quote as that item's failure.
#[derive(Debug, Clone, PartialEq)]
pub struct CoinDetailRecord {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub ath_usd: Option<f64>,
    pub ath_date: Option<DateTime<Utc>>,
    pub current_price_usd: Option<f64>,
    pub solana_address: Option<String>,
}

/// Daily price history, oldest point first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MarketChart {
    pub prices: Vec<PricePoint>,
}

impl MarketChart {
    /// Price at the earliest point of the chart, if any
    pub fn earliest_price(&self) -> Option<f64> {
        self.prices.first().map(|p| p.price)
    }
}

/// Port to the external price-data provider
///
/// Implementations own their query parameters (currency, category, page
/// size, lookback) and their pacing policy; callers see only the three
/// operations the pipeline needs.
#[async_trait]
pub trait MarketDataPort: Send + Sync {
    /// Fetch the category listing (single page)
    async fn category_listing(&self) -> Result<Vec<ListingEntry>, MarketDataError>;

    /// Fetch the full detail record for one coin
    async fn coin_detail(&self, id: &str) -> Result<CoinDetailRecord, MarketDataError>;

    /// Fetch the daily price history for one coin
    async fn market_chart(&self, id: &str) -> Result<MarketChart, MarketDataError>;
}
