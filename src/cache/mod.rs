//! Caching utilities for market-data requests.
//!
//! This module provides the TTL request cache and the helper that turns a request
//! path plus query parameters into a cache key.

pub mod key;
pub mod request_cache;

pub use key::cache_key;
pub use request_cache::RequestCache;
