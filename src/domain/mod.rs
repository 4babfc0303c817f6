//! Domain Layer - Core business logic for the Hindsight analyzer
//!
//! This module contains pure domain types and logic with no external
//! dependencies. All provider interactions happen through the ports layer.
//!
//! - `token`: One record shape per pipeline stage (candidate, enriched
//!   detail, price point, final metrics)
//! - `ranking`: Decline-from-high recomputation and top-loser selection
//! - `simulation`: Hypothetical entry price and investment outcome math

pub mod token;
pub mod ranking;
pub mod simulation;

pub use token::{CandidateToken, CoinMetrics, EnrichedDetail, PricePoint};
pub use ranking::{decline_from_high, select_top_losers};
pub use simulation::{entry_price, simulate_outcome, InvestmentOutcome};
