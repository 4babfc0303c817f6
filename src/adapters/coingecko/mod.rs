//! CoinGecko Adapter
//!
//! Implements `MarketDataPort` against the CoinGecko v3 REST API:
//! - `/coins/markets`: category listing (single page)
//! - `/coins/{id}`: full detail record
//! - `/coins/{id}/market_chart`: daily price history
//!
//! Every request passes through the `RequestPacer` fixed-delay gate so the
//! free tier's undocumented per-minute budget is never exceeded.

mod client;
mod pacing;
mod types;

pub use client::{CoinGeckoClient, CoinGeckoConfig};
pub use pacing::RequestPacer;
