//! Market data cache - a TTL request cache and client for read-only market-data endpoints.
//!
//! Dashboards poll a handful of slow-changing endpoints (the sector list, news
//! article lookups) far more often than their data changes. This library puts a
//! time-to-live memoization layer in front of those HTTP calls.
//!
//! # Architecture
//!
//! - **cache**: The TTL request cache and cache-key normalization
//! - **clock**: Time sources used for expiry (system and manual)
//! - **client**: HTTP client for the market-data API, plus its async wrapper
//! - **services**: Cached reads of sectors and news articles
//! - **models**: Response data structures
//! - **metrics**: HTTP and cache counters
//! - **config**: Configuration from environment variables
//! - **error**: Error types

pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;

pub use cache::{cache_key, RequestCache};
pub use client::{ApiClient, AsyncApiClient, AsyncApiClientImpl};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{ApiError, ApiResult, ConfigError};
pub use metrics::{CacheMetrics, CacheMetricsSummary, HttpTimer, Metrics, MetricsSummary};
pub use models::{NewsArticle, SectorList};
pub use services::{CacheTtls, MarketDataService};
