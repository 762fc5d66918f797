//! Data models for market-data API responses.

pub mod news;

pub use news::NewsArticle;

/// Sector names as returned by the sectors endpoint, e.g. `["Energy", "Banks"]`.
pub type SectorList = Vec<String>;
