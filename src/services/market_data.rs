//! Market-data service.
//!
//! Reads the frequently polled, read-only endpoints through a shared
//! [`RequestCache`], using the endpoint path as the cache key.

use crate::cache::RequestCache;
use crate::client::{news_article_path, AsyncApiClient, SECTORS_PATH};
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::models::{NewsArticle, SectorList};
use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Duration;

/// Per-endpoint cache lifetimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub sectors: Duration,
    pub news: Duration,
}

impl From<&Config> for CacheTtls {
    fn from(config: &Config) -> Self {
        Self {
            sectors: config.sectors_ttl(),
            news: config.news_ttl(),
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        CacheTtls::from(&Config::default())
    }
}

/// Cached access to sectors and news articles.
pub struct MarketDataService {
    client: Arc<dyn AsyncApiClient>,
    cache: RequestCache,
    ttls: CacheTtls,
}

impl MarketDataService {
    /// Create a service over `client` that stores responses in `cache`.
    ///
    /// The cache is injected so several services (or tests) can share or isolate it.
    pub fn new(client: Arc<dyn AsyncApiClient>, cache: RequestCache, ttls: CacheTtls) -> Self {
        Self {
            client,
            cache,
            ttls,
        }
    }

    /// The list of market sectors.
    pub async fn sectors(&self) -> ApiResult<Arc<SectorList>> {
        let client = &self.client;
        self.cache
            .cached_fetch(SECTORS_PATH, self.ttls.sectors, || async move {
                client.get_sectors().await
            })
            .await
    }

    /// A single news article.
    pub async fn news_article(&self, id: &str) -> ApiResult<Arc<NewsArticle>> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ApiError::InvalidRequest(
                "News article ID cannot be empty".to_string(),
            ));
        }

        let client = &self.client;
        self.cache
            .cached_fetch(&news_article_path(id), self.ttls.news, || async move {
                client.get_news_article(id).await
            })
            .await
    }

    /// Several news articles, looked up concurrently.
    ///
    /// Fails with the first error; articles fetched before the failure stay cached.
    pub async fn news_articles(&self, ids: &[String]) -> ApiResult<Vec<Arc<NewsArticle>>> {
        try_join_all(ids.iter().map(|id| self.news_article(id))).await
    }

    /// The cache backing this service.
    pub fn cache(&self) -> &RequestCache {
        &self.cache
    }

    pub fn ttls(&self) -> CacheTtls {
        self.ttls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingClient {
        sector_calls: AtomicUsize,
        article_calls: AtomicUsize,
    }

    #[async_trait]
    impl AsyncApiClient for CountingClient {
        async fn get_sectors(&self) -> ApiResult<SectorList> {
            self.sector_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec!["Energy".to_string(), "Banks".to_string()])
        }

        async fn get_news_article(&self, id: &str) -> ApiResult<NewsArticle> {
            self.article_calls.fetch_add(1, Ordering::SeqCst);
            Ok(NewsArticle {
                id: id.to_string(),
                title: format!("Article {}", id),
                ..Default::default()
            })
        }
    }

    fn service() -> (MarketDataService, Arc<CountingClient>, ManualClock) {
        let client = Arc::new(CountingClient::default());
        let clock = ManualClock::new(0);
        let cache = RequestCache::with_clock(Arc::new(clock.clone()));
        let service = MarketDataService::new(client.clone(), cache, CacheTtls::default());
        (service, client, clock)
    }

    #[tokio::test]
    async fn test_sectors_cached_within_ttl() {
        let (service, client, clock) = service();

        let first = service.sectors().await.unwrap();
        clock.advance(Duration::from_secs(599));
        let second = service.sectors().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(client.sector_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_article_id_rejected_without_fetch() {
        let (service, client, _clock) = service();

        let result = service.news_article("  ").await;

        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(client.article_calls.load(Ordering::SeqCst), 0);
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_article_id_trimmed_for_key() {
        let (service, client, _clock) = service();

        service.news_article("n-1").await.unwrap();
        service.news_article(" n-1 ").await.unwrap();

        assert_eq!(client.article_calls.load(Ordering::SeqCst), 1);
        assert!(service.cache().contains_key("/api/news/n-1"));
    }

    #[test]
    fn test_ttls_from_config() {
        let config = Config {
            sectors_cache_ttl_secs: 30,
            news_cache_ttl_secs: 5,
            ..Default::default()
        };
        let ttls = CacheTtls::from(&config);
        assert_eq!(ttls.sectors, Duration::from_secs(30));
        assert_eq!(ttls.news, Duration::from_secs(5));
    }
}
