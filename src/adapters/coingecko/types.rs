//! CoinGecko wire types
//!
//! Private deserialization shapes for the three endpoints, converted into
//! the neutral port records before they leave this adapter.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::token::PricePoint;
use crate::ports::market_data::{CoinDetailRecord, ListingEntry, MarketChart};

/// One `/coins/markets` listing entry. The endpoint returns far more fields;
/// only the identity triple is consumed.
#[derive(Debug, Deserialize)]
pub(crate) struct MarketsEntry {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

impl From<MarketsEntry> for ListingEntry {
    fn from(e: MarketsEntry) -> Self {
        Self {
            id: e.id,
            name: e.name,
            symbol: e.symbol,
        }
    }
}

/// `/coins/{id}` detail response
#[derive(Debug, Deserialize)]
pub(crate) struct CoinDetailResponse {
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// Chain -> contract address; values may be null or empty
    #[serde(default)]
    pub platforms: HashMap<String, Option<String>>,
    pub market_data: MarketDataFields,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MarketDataFields {
    #[serde(default)]
    pub ath: CurrencyQuote,
    #[serde(default)]
    pub ath_date: CurrencyDateQuote,
    #[serde(default)]
    pub current_price: CurrencyQuote,
}

/// Per-currency quote map, reduced to the USD leg
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CurrencyQuote {
    pub usd: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CurrencyDateQuote {
    pub usd: Option<DateTime<Utc>>,
}

impl From<CoinDetailResponse> for CoinDetailRecord {
    fn from(r: CoinDetailResponse) -> Self {
        let solana_address = r
            .platforms
            .get("solana")
            .cloned()
            .flatten()
            .filter(|addr| !addr.is_empty());

        Self {
            id: r.id,
            name: r.name,
            symbol: r.symbol,
            ath_usd: r.market_data.ath.usd,
            ath_date: r.market_data.ath_date.usd,
            current_price_usd: r.market_data.current_price.usd,
            solana_address,
        }
    }
}

/// `/coins/{id}/market_chart` response
#[derive(Debug, Deserialize)]
pub(crate) struct MarketChartResponse {
    #[serde(default)]
    pub prices: Vec<ChartPoint>,
}

/// A `[timestamp_ms, price]` pair. The timestamp arrives as a JSON number
/// (integer milliseconds); f64 holds it exactly.
#[derive(Debug, Deserialize)]
pub(crate) struct ChartPoint(pub f64, pub f64);

impl From<MarketChartResponse> for MarketChart {
    fn from(r: MarketChartResponse) -> Self {
        Self {
            prices: r
                .prices
                .into_iter()
                .map(|ChartPoint(ts, price)| PricePoint {
                    timestamp_ms: ts as i64,
                    price,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_listing_entry() {
        let json = r#"[{"id":"book-of-meme","symbol":"bome","name":"BOOK OF MEME","current_price":0.002}]"#;
        let entries: Vec<MarketsEntry> = serde_json::from_str(json).unwrap();
        let listing: ListingEntry = entries.into_iter().next().unwrap().into();
        assert_eq!(listing.id, "book-of-meme");
        assert_eq!(listing.symbol, "bome");
    }

    #[test]
    fn parses_detail_and_extracts_usd_legs() {
        let json = r#"{
            "id": "book-of-meme",
            "symbol": "bome",
            "name": "BOOK OF MEME",
            "platforms": {"solana": "ukHH6c7mMyiWCf1b9pnWe25TSpkDDt3H5pQZgZ74J82"},
            "market_data": {
                "ath": {"usd": 0.026, "eur": 0.024},
                "ath_date": {"usd": "2024-03-16T10:25:57.461Z"},
                "current_price": {"usd": 0.0019}
            }
        }"#;
        let detail: CoinDetailRecord =
            serde_json::from_str::<CoinDetailResponse>(json).unwrap().into();
        assert_eq!(detail.ath_usd, Some(0.026));
        assert_eq!(detail.current_price_usd, Some(0.0019));
        assert!(detail.ath_date.is_some());
        assert_eq!(
            detail.solana_address.as_deref(),
            Some("ukHH6c7mMyiWCf1b9pnWe25TSpkDDt3H5pQZgZ74J82")
        );
    }

    #[test]
    fn detail_tolerates_missing_platform_and_quotes() {
        let json = r#"{
            "id": "x",
            "symbol": "x",
            "name": "X",
            "platforms": {"solana": null},
            "market_data": {"ath": {}, "ath_date": {}, "current_price": {}}
        }"#;
        let detail: CoinDetailRecord =
            serde_json::from_str::<CoinDetailResponse>(json).unwrap().into();
        assert_eq!(detail.ath_usd, None);
        assert_eq!(detail.solana_address, None);
    }

    #[test]
    fn parses_chart_pairs_in_order() {
        let json = r#"{"prices":[[1710547200000,0.0123],[1710633600000,0.0150]]}"#;
        let chart: MarketChart =
            serde_json::from_str::<MarketChartResponse>(json).unwrap().into();
        assert_eq!(chart.prices.len(), 2);
        assert_eq!(chart.prices[0].timestamp_ms, 1_710_547_200_000);
        assert_eq!(chart.earliest_price(), Some(0.0123));
    }

    #[test]
    fn empty_chart_parses_to_empty_prices() {
        let chart: MarketChart = serde_json::from_str::<MarketChartResponse>("{}").unwrap().into();
        assert!(chart.prices.is_empty());
    }
}
