//! Scripted market data provider for tests
//!
//! Records calls in order and serves canned responses configured through
//! builder methods. Per-id failure injection drives the recoverable-error
//! paths without any network.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::token::PricePoint;
use crate::ports::market_data::{
    CoinDetailRecord, ListingEntry, MarketChart, MarketDataError, MarketDataPort,
};

/// Scripted provider: canned responses, recorded call order, injectable
/// per-id failures
#[derive(Debug, Default)]
pub struct ScriptedMarketData {
    listing: Vec<ListingEntry>,
    details: HashMap<String, CoinDetailRecord>,
    charts: HashMap<String, MarketChart>,
    fail_listing: bool,
    failing_details: HashSet<String>,
    failing_charts: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the category listing response
    pub fn with_listing(mut self, entries: Vec<ListingEntry>) -> Self {
        self.listing = entries;
        self
    }

    /// Builder method to set the detail response for a coin id
    pub fn with_detail(mut self, record: CoinDetailRecord) -> Self {
        self.details.insert(record.id.clone(), record);
        self
    }

    /// Builder method to set the market chart for a coin id
    pub fn with_chart(mut self, id: &str, points: Vec<(i64, f64)>) -> Self {
        let prices = points
            .into_iter()
            .map(|(timestamp_ms, price)| PricePoint { timestamp_ms, price })
            .collect();
        self.charts.insert(id.to_string(), MarketChart { prices });
        self
    }

    /// Make the listing call fail
    pub fn with_failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Make the detail call for `id` fail
    pub fn with_failing_detail(mut self, id: &str) -> Self {
        self.failing_details.insert(id.to_string());
        self
    }

    /// Make the chart call for `id` fail
    pub fn with_failing_chart(mut self, id: &str) -> Self {
        self.failing_charts.insert(id.to_string());
        self
    }

    /// Get all recorded calls, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted_failure(endpoint: &str) -> MarketDataError {
        MarketDataError::Api {
            endpoint: endpoint.to_string(),
            status: 500,
        }
    }
}

#[async_trait]
impl MarketDataPort for ScriptedMarketData {
    async fn category_listing(&self) -> Result<Vec<ListingEntry>, MarketDataError> {
        self.record("listing".to_string());
        if self.fail_listing {
            return Err(Self::scripted_failure("listing"));
        }
        Ok(self.listing.clone())
    }

    async fn coin_detail(&self, id: &str) -> Result<CoinDetailRecord, MarketDataError> {
        self.record(format!("detail:{id}"));
        if self.failing_details.contains(id) {
            return Err(Self::scripted_failure("detail"));
        }
        self.details
            .get(id)
            .cloned()
            .ok_or_else(|| MarketDataError::Parse(format!("no scripted detail for {id}")))
    }

    async fn market_chart(&self, id: &str) -> Result<MarketChart, MarketDataError> {
        self.record(format!("chart:{id}"));
        if self.failing_charts.contains(id) {
            return Err(Self::scripted_failure("chart"));
        }
        self.charts
            .get(id)
            .cloned()
            .ok_or_else(|| MarketDataError::Parse(format!("no scripted chart for {id}")))
    }
}
