use async_trait::async_trait;
use market_data_cache::error::{ApiError, ApiResult};
use market_data_cache::models::{NewsArticle, SectorList};
use market_data_cache::AsyncApiClient;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock market-data client for testing.
///
/// Serves canned responses and counts calls per method so tests can tell cache
/// hits from network fetches.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockApiClient {
    sectors: Arc<Mutex<SectorList>>,
    articles: Arc<Mutex<HashMap<String, NewsArticle>>>,
    fail_next: Arc<Mutex<Option<ApiError>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockApiClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sectors(&self, sectors: &[&str]) {
        *self.sectors.lock().unwrap() = sectors.iter().map(|s| s.to_string()).collect();
    }

    pub fn add_article(&self, article: NewsArticle) {
        self.articles
            .lock()
            .unwrap()
            .insert(article.id.clone(), article);
    }

    /// Make the next call (of any kind) fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        *self.fail_next.lock().unwrap() = Some(error);
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> ApiResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.fail_next.lock().unwrap().take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AsyncApiClient for MockApiClient {
    async fn get_sectors(&self) -> ApiResult<SectorList> {
        self.track_call("get_sectors")?;
        Ok(self.sectors.lock().unwrap().clone())
    }

    async fn get_news_article(&self, id: &str) -> ApiResult<NewsArticle> {
        self.track_call("get_news_article")?;
        self.articles
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("news article {}", id)))
    }
}
