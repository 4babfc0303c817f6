//! Ports Layer - Trait definitions for external dependencies
//!
//! The analysis pipeline talks to its price-data provider only through the
//! `MarketDataPort` trait, so production runs against CoinGecko while tests
//! run against the scripted double in `mocks`.

pub mod market_data;
pub mod mocks;

pub use market_data::{
    CoinDetailRecord, ListingEntry, MarketChart, MarketDataError, MarketDataPort,
};
pub use mocks::ScriptedMarketData;
