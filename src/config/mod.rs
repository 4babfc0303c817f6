//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    AnalysisSection, Config, ConfigError, DiscoverySection, ProviderSection, load_config,
    load_config_or_default,
};
