//! CoinGecko API Client
//!
//! Paced HTTP client for the CoinGecko v3 REST API. Every call suspends for
//! the configured delay before the GET and again after the body is parsed;
//! HTTP and network failures propagate unchanged to the caller - no retries,
//! no translation beyond the port's error type.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::pacing::RequestPacer;
use super::types::{CoinDetailResponse, MarketChartResponse, MarketsEntry};
use crate::config::Config;
use crate::ports::market_data::{
    CoinDetailRecord, ListingEntry, MarketChart, MarketDataError, MarketDataPort,
};

/// CoinGecko client configuration
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    /// Base URL for the v3 API
    pub api_url: String,
    /// Optional demo API key for higher rate limits
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Fixed pre/post delay applied to every request
    pub request_delay: Duration,
    /// Quote currency for all price fields
    pub vs_currency: String,
    /// Category to list
    pub category: String,
    /// Listing page size (single page, no pagination)
    pub per_page: u32,
    /// Market chart lookback in days
    pub history_days: u32,
}

impl From<&Config> for CoinGeckoConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.provider.api_url.clone(),
            api_key: config.provider.get_api_key(),
            timeout: Duration::from_secs(config.provider.timeout_secs),
            request_delay: Duration::from_millis(config.provider.request_delay_ms),
            vs_currency: config.discovery.vs_currency.clone(),
            category: config.discovery.category.clone(),
            per_page: config.discovery.per_page,
            history_days: config.discovery.history_days,
        }
    }
}

/// CoinGecko v3 API client
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    config: CoinGeckoConfig,
    http: Client,
    pacer: RequestPacer,
}

impl CoinGeckoClient {
    /// Create a new client with custom configuration
    pub fn with_config(config: CoinGeckoConfig) -> Result<Self, MarketDataError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        let pacer = RequestPacer::new(config.request_delay);
        Ok(Self { config, http, pacer })
    }

    /// Create a new client from the application configuration
    pub fn new(config: &Config) -> Result<Self, MarketDataError> {
        Self::with_config(CoinGeckoConfig::from(config))
    }

    /// Issue one paced GET and parse the JSON body.
    ///
    /// Suspends before the request and again after the body is consumed, so
    /// each call costs exactly two pacing intervals regardless of endpoint.
    async fn paced_get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", self.config.api_url, path);

        self.pacer.pause().await;
        tracing::info!("GET {}", url);

        let mut request = self.http.get(&url).query(query);
        if let Some(ref api_key) = self.config.api_key {
            request = request.header("x-cg-demo-api-key", api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Api {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        self.pacer.pause().await;
        Ok(body)
    }
}

#[async_trait]
impl MarketDataPort for CoinGeckoClient {
    async fn category_listing(&self) -> Result<Vec<ListingEntry>, MarketDataError> {
        let query = [
            ("vs_currency", self.config.vs_currency.clone()),
            ("category", self.config.category.clone()),
            ("per_page", self.config.per_page.to_string()),
            ("sparkline", "false".to_string()),
        ];

        let entries: Vec<MarketsEntry> = self.paced_get("/coins/markets", &query).await?;
        Ok(entries.into_iter().map(Into::into).collect())
    }

    async fn coin_detail(&self, id: &str) -> Result<CoinDetailRecord, MarketDataError> {
        let detail: CoinDetailResponse = self.paced_get(&format!("/coins/{id}"), &[]).await?;
        Ok(detail.into())
    }

    async fn market_chart(&self, id: &str) -> Result<MarketChart, MarketDataError> {
        let query = [
            ("vs_currency", self.config.vs_currency.clone()),
            ("days", self.config.history_days.to_string()),
            ("interval", "daily".to_string()),
        ];

        let chart: MarketChartResponse = self
            .paced_get(&format!("/coins/{id}/market_chart"), &query)
            .await?;
        Ok(chart.into())
    }
}
