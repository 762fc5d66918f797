//! Async wrapper around the synchronous ApiClient.
//!
//! Runs HTTP operations on tokio's blocking thread pool so they never stall the
//! async runtime.

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewsArticle, SectorList};
use async_trait::async_trait;
use std::sync::Arc;

/// Async market-data API operations.
///
/// This is the seam the service layer depends on, so tests can substitute a
/// counting mock for the real HTTP client.
#[async_trait]
pub trait AsyncApiClient: Send + Sync {
    async fn get_sectors(&self) -> ApiResult<SectorList>;
    async fn get_news_article(&self, id: &str) -> ApiResult<NewsArticle>;
}

/// Async wrapper around synchronous ApiClient.
#[derive(Clone)]
pub struct AsyncApiClientImpl {
    client: Arc<ApiClient>,
}

impl AsyncApiClientImpl {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped client, e.g. for reading its metrics.
    pub fn inner(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl AsyncApiClient for AsyncApiClientImpl {
    async fn get_sectors(&self) -> ApiResult<SectorList> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.get_sectors())
            .await
            .map_err(|e| ApiError::Http(format!("Task join error: {}", e)))?
    }

    async fn get_news_article(&self, id: &str) -> ApiResult<NewsArticle> {
        let client = self.client.clone();
        let id = id.to_string();

        tokio::task::spawn_blocking(move || client.get_news_article(&id))
            .await
            .map_err(|e| ApiError::Http(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[tokio::test]
    async fn test_async_client_creation() {
        let config = Config {
            api_base_url: "https://api.test.com".to_string(),
            api_key: Some("test_key".to_string()),
            ..Default::default()
        };
        let async_client = AsyncApiClientImpl::new(ApiClient::new(&config));

        let cloned = async_client.clone();
        assert_eq!(cloned.inner().metrics().http_requests_total(), 0);
    }

    #[tokio::test]
    async fn test_async_client_connection_failure() {
        // Nothing listens on port 9 (discard) on test machines
        let client = ApiClient::with_base_url("http://127.0.0.1:9".to_string(), None);
        let async_client = AsyncApiClientImpl::new(client);

        let result = async_client.get_sectors().await;
        assert!(result.is_err());
        assert_eq!(async_client.inner().metrics().http_errors_total(), 1);
    }
}
