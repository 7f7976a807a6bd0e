//! Market-data provider layer for stock-pulse
//!
//! This crate fetches and shapes the raw material for an analysis run:
//!
//! - A provider trait over the upstream data source (fundamentals, daily
//!   close history, recent news)
//! - A Yahoo Finance backed implementation
//! - Decoding of the provider payloads into optional-field records
//! - Metrics derivation (yearly return, target upside, percent scaling)
//! - News normalization tolerating both provider response shapes
//! - A per-ticker fetcher whose failures are data, not panics

pub mod error;
pub mod fetcher;
pub mod metrics;
pub mod news;
pub mod provider;
pub mod types;
pub mod yahoo;

// Re-export main types
pub use error::{MarketError, Result};
pub use fetcher::{DEFAULT_NEWS_LIMIT, FetchResult, StockFetcher};
pub use metrics::StockMetrics;
pub use news::{NewsItem, RawNewsEntry};
pub use provider::MarketDataProvider;
pub use types::{CompanyFacts, DailyBar, LookbackPeriod};
pub use yahoo::YahooMarketData;
