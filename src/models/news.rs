//! News article model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single news article from the news lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewsArticle {
    /// Unique identifier for the article
    pub id: String,

    pub title: String,

    /// Link to the full article
    #[serde(default)]
    pub url: String,

    /// Publisher name (e.g. "Reuters")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Publication time (RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Tickers the article mentions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tickers: Vec<String>,
}
