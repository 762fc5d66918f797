//! Application service layer.
//!
//! Services sit between callers and the HTTP client and decide which reads go
//! through the request cache and for how long.

mod market_data;

pub use market_data::{CacheTtls, MarketDataService};
