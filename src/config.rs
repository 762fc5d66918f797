//! Configuration management for the market-data client.
//!
//! This module handles loading and validating configuration from environment variables,
//! reading a `.env` file first if one is present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::time::Duration;

/// Configuration for the market-data client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Market-data API base URL
    pub api_base_url: String,

    /// Bearer token for the API, if it requires one
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// How long the sector list stays cached, in seconds (default: 600)
    pub sectors_cache_ttl_secs: u64,

    /// How long a news article stays cached, in seconds (default: 60)
    pub news_cache_ttl_secs: u64,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `MARKET_API_BASE_URL`: Base URL for the market-data API
    ///
    /// Optional environment variables:
    /// - `MARKET_API_KEY`: Bearer token (blank is treated as unset)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `SECTORS_CACHE_TTL_SECS`: Sector list TTL (default: 600)
    /// - `NEWS_CACHE_TTL_SECS`: News article TTL (default: 60)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("MARKET_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("MARKET_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "MARKET_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let api_key = env::var("MARKET_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let defaults = Config::default();
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", defaults.request_timeout)?;
        let sectors_cache_ttl_secs =
            Self::parse_env_u64("SECTORS_CACHE_TTL_SECS", defaults.sectors_cache_ttl_secs)?;
        let news_cache_ttl_secs =
            Self::parse_env_u64("NEWS_CACHE_TTL_SECS", defaults.news_cache_ttl_secs)?;

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            api_base_url,
            api_key,
            request_timeout,
            sectors_cache_ttl_secs,
            news_cache_ttl_secs,
            log_level,
        })
    }

    /// TTL for the sector list.
    pub fn sectors_ttl(&self) -> Duration {
        Duration::from_secs(self.sectors_cache_ttl_secs)
    }

    /// TTL for news articles.
    pub fn news_ttl(&self) -> Duration {
        Duration::from_secs(self.news_cache_ttl_secs)
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a non-negative number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            api_key: None,
            request_timeout: 10,
            sectors_cache_ttl_secs: 600,
            news_cache_ttl_secs: 60,
            log_level: "info".to_string(),
        }
    }
}
