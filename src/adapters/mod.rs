//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits and the outer
//! surfaces of the binary:
//! - CoinGecko: paced HTTP client for listings, details, and price history
//! - Report: console presentation of the finished metric records
//! - CLI: command-line interface handlers

pub mod coingecko;
pub mod report;
pub mod cli;

pub use cli::CliApp;
pub use coingecko::{CoinGeckoClient, CoinGeckoConfig, RequestPacer};
