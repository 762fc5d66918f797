//! HTTP client for the market-data API.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication, error mapping
//! and JSON decoding; it does no caching itself.

mod async_wrapper;
pub use async_wrapper::{AsyncApiClient, AsyncApiClientImpl};

use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::{NewsArticle, SectorList};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Path of the sector list endpoint.
pub const SECTORS_PATH: &str = "/api/entities/sectors";

/// Path of a single news article.
pub fn news_article_path(id: &str) -> String {
    format!("/api/news/{}", urlencoding::encode(id))
}

/// HTTP client for the market-data API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,

    /// Bearer token, sent only when set
    api_key: Option<String>,

    agent: Arc<ureq::Agent>,

    metrics: Metrics,
}

impl ApiClient {
    /// Create a new ApiClient from configuration.
    pub fn new(config: &Config) -> Self {
        Self::build(
            config.api_base_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    /// Create an ApiClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: Option<String>) -> Self {
        Self::build(base_url, api_key, Duration::from_secs(10))
    }

    fn build(base_url: String, api_key: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> ApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);

        let mut request = self.agent.get(&url).set("Accept", "application/json");
        if let Some(key) = &self.api_key {
            request = request.set("Authorization", &format!("Bearer {}", key));
        }

        let result = request.call().map_err(|e| self.map_error(e));

        match &result {
            Ok(response) => {
                tracing::debug!("GET {} - Success (status: {})", url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::debug!("GET {} - Error: {}", url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Map a ureq error to an ApiError.
    fn map_error(&self, error: ureq::Error) -> ApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => ApiError::Unauthorized,
                    404 => ApiError::NotFound(message),
                    429 => ApiError::RateLimitExceeded,
                    _ => ApiError::Api {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    ApiError::Http("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    ApiError::Timeout
                } else {
                    ApiError::Http(transport.to_string())
                }
            }
        }
    }

    /// GET a path and decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.get(path)?;
        let body = response
            .into_string()
            .map_err(|e| ApiError::Http(e.to_string()))?;

        serde_json::from_str(&body).map_err(ApiError::Json)
    }

    /// Fetch the list of market sectors.
    pub fn get_sectors(&self) -> ApiResult<SectorList> {
        self.get_json(SECTORS_PATH)
    }

    /// Fetch a single news article by ID.
    pub fn get_news_article(&self, id: &str) -> ApiResult<NewsArticle> {
        self.get_json(&news_article_path(id))
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.api_key.is_some())
            .finish()
    }
}
