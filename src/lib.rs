//! Hindsight - Meme Coin Drawdown "What If" Analyzer Library
//!
//! A single-shot analysis over CoinGecko market data: discover meme tokens in
//! the Solana ecosystem, rank them by decline from their all-time high, and
//! simulate what a fixed investment near the peak would be worth today versus
//! sold at the top.
//!
//! # Modules
//!
//! - `domain`: Pure business logic (record types, ranking, outcome simulation)
//! - `ports`: Trait abstractions (MarketDataPort) and the scripted test double
//! - `adapters`: External implementations (CoinGecko, console reports, CLI)
//! - `config`: Configuration loading and validation
//! - `application`: The analysis pipeline orchestrator

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod config;
pub mod application;
