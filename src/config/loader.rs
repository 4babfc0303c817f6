//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every field has a
//! default equal to the built-in analysis constants, so the binary runs with
//! no config file at all.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Main configuration structure matching config/default.toml
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisSection,
    #[serde(default)]
    pub discovery: DiscoverySection,
    #[serde(default)]
    pub provider: ProviderSection,
}

/// Hypothetical-investment parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Amount invested into each selected token (USD)
    pub investment_amount: f64,
    /// Reference monthly cost the ATH proceeds are converted into (USD).
    /// One chemotherapy month in the US, using a midpoint of the 1-12k range.
    pub monthly_cost_reference: f64,
    /// How many top losers to keep after ranking
    pub selection_count: usize,
    /// Minimum decline from ATH for a token to qualify (strictly greater, percent)
    pub decline_threshold_pct: f64,
    /// Entry-price ceiling as a percent of ATH ("never assume you entered
    /// later than 25% of peak price")
    pub entry_price_ceiling_pct: f64,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            investment_amount: 1_000.0,
            monthly_cost_reference: 6_000.0,
            selection_count: 6,
            decline_threshold_pct: 70.0,
            entry_price_ceiling_pct: 25.0,
        }
    }
}

/// Candidate discovery parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoverySection {
    /// Quote currency for all price fields
    pub vs_currency: String,
    /// CoinGecko category to list
    pub category: String,
    /// Lexical marker a candidate's name or symbol must contain (case-insensitive)
    pub name_marker: String,
    /// Listing page size. One page only - tokens beyond it are out of scope.
    pub per_page: u32,
    /// Price history lookback for the entry-price estimate (days, daily interval)
    pub history_days: u32,
}

impl Default for DiscoverySection {
    fn default() -> Self {
        Self {
            vs_currency: "usd".to_string(),
            category: "solana-ecosystem".to_string(),
            name_marker: "meme".to_string(),
            per_page: 250,
            history_days: 365,
        }
    }
}

/// CoinGecko API access parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderSection {
    /// CoinGecko v3 API base URL
    pub api_url: String,
    /// Optional demo API key for higher rate limits (get from coingecko.com)
    pub api_key: Option<String>,
    /// Fixed delay before AND after every request (milliseconds).
    /// The free tier enforces an undocumented per-minute budget.
    pub request_delay_ms: u64,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ProviderSection {
    fn default() -> Self {
        Self {
            api_url: "https://api.coingecko.com/api/v3".to_string(),
            api_key: None,
            request_delay_ms: 3_000,
            timeout_secs: 30,
        }
    }
}

impl ProviderSection {
    /// Get API key with environment variable override
    /// Checks COINGECKO_API_KEY env var first, falls back to config value
    pub fn get_api_key(&self) -> Option<String> {
        std::env::var("COINGECKO_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .or_else(|| self.api_key.clone())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a TOML file, falling back to built-in defaults
/// when the file does not exist
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    if path.as_ref().exists() {
        load_config(path)
    } else {
        tracing::debug!(
            "config file {:?} not found, using built-in defaults",
            path.as_ref()
        );
        Ok(Config::default())
    }
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.investment_amount <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "investment_amount must be > 0, got {}",
                self.analysis.investment_amount
            )));
        }

        if self.analysis.monthly_cost_reference <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "monthly_cost_reference must be > 0, got {}",
                self.analysis.monthly_cost_reference
            )));
        }

        if self.analysis.selection_count == 0 {
            return Err(ConfigError::ValidationError(
                "selection_count must be > 0".to_string(),
            ));
        }

        if self.analysis.decline_threshold_pct < 0.0 || self.analysis.decline_threshold_pct >= 100.0
        {
            return Err(ConfigError::ValidationError(format!(
                "decline_threshold_pct must be 0-100, got {}",
                self.analysis.decline_threshold_pct
            )));
        }

        if self.analysis.entry_price_ceiling_pct <= 0.0
            || self.analysis.entry_price_ceiling_pct > 100.0
        {
            return Err(ConfigError::ValidationError(format!(
                "entry_price_ceiling_pct must be 0-100, got {}",
                self.analysis.entry_price_ceiling_pct
            )));
        }

        if self.discovery.per_page == 0 || self.discovery.per_page > 250 {
            return Err(ConfigError::ValidationError(format!(
                "per_page must be 1-250, got {}",
                self.discovery.per_page
            )));
        }

        if self.discovery.history_days == 0 {
            return Err(ConfigError::ValidationError(
                "history_days must be > 0".to_string(),
            ));
        }

        if self.discovery.vs_currency.is_empty() {
            return Err(ConfigError::ValidationError(
                "vs_currency cannot be empty".to_string(),
            ));
        }

        if self.discovery.category.is_empty() {
            return Err(ConfigError::ValidationError(
                "category cannot be empty".to_string(),
            ));
        }

        if self.discovery.name_marker.is_empty() {
            return Err(ConfigError::ValidationError(
                "name_marker cannot be empty".to_string(),
            ));
        }

        if self.provider.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_url cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
