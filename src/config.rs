//! Application configuration
//!
//! All tunables live here so tests can construct services with short
//! durations instead of the production ones.

use crate::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Default Alpha Vantage style query endpoint.
pub const DEFAULT_PROVIDER_URL: &str = "https://www.alphavantage.co/query";

/// Default backend REST API base URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Tunables for the market-quote acquisition layer.
#[derive(Debug, Clone)]
pub struct MarketConfig {
    /// Quote provider query endpoint.
    pub base_url: String,
    /// Provider API key.
    pub api_key: String,
    /// Upper bound on a single provider request.
    pub request_timeout: Duration,
    /// How long a cached quote counts as fresh.
    pub cache_ttl: Duration,
    /// Minimum spacing between outbound provider calls.
    pub min_call_interval: Duration,
    /// Spacing between symbols in a multi-quote batch.
    pub batch_delay: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PROVIDER_URL.to_string(),
            api_key: "demo".to_string(),
            request_timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(60),
            min_call_interval: Duration::from_secs(15),
            batch_delay: Duration::from_secs(3),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Backend REST API base URL.
    pub backend_url: String,
    /// Directory for session-persistent files (auth token).
    pub data_dir: PathBuf,
    pub market: MarketConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            data_dir: default_data_dir(),
            market: MarketConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build a configuration from the environment, falling back to defaults.
    ///
    /// Recognized variables: `FOLIOTRACK_API_URL`, `FOLIOTRACK_DATA_DIR`,
    /// `FOLIOTRACK_MARKET_URL`, `FOLIOTRACK_MARKET_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(url) = env::var("FOLIOTRACK_API_URL") {
            config.backend_url = url;
        }
        if let Ok(dir) = env::var("FOLIOTRACK_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(url) = env::var("FOLIOTRACK_MARKET_URL") {
            config.market.base_url = url;
        }
        if let Ok(key) = env::var("FOLIOTRACK_MARKET_API_KEY") {
            config.market.api_key = key;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        Url::parse(&self.backend_url)
            .map_err(|e| AppError::Config(format!("invalid backend URL '{}': {}", self.backend_url, e)))?;
        Url::parse(&self.market.base_url)
            .map_err(|e| AppError::Config(format!("invalid provider URL '{}': {}", self.market.base_url, e)))?;
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".foliotrack"))
        .unwrap_or_else(|_| PathBuf::from(".foliotrack"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.market.min_call_interval, Duration::from_secs(15));
        assert_eq!(config.market.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.market.batch_delay, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let config = AppConfig {
            backend_url: "not a url".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }
}
