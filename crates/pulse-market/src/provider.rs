//! Market-data provider trait definition

use crate::error::Result;
use crate::news::RawNewsEntry;
use crate::types::{CompanyFacts, DailyBar, LookbackPeriod};
use async_trait::async_trait;

/// Trait for upstream market-data providers
///
/// One implementation per backend; the fetcher only ever sees this
/// interface, so tests can substitute a scripted provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch company fundamentals for a symbol
    ///
    /// Any field the provider omits comes back as `None`; a symbol the
    /// provider does not know at all is an error.
    async fn company_facts(&self, symbol: &str) -> Result<CompanyFacts>;

    /// Fetch daily closes over the lookback window, oldest first
    async fn close_history(&self, symbol: &str, period: LookbackPeriod) -> Result<Vec<DailyBar>>;

    /// Fetch up to `count` recent news entries, most recent first
    ///
    /// Entries that fail to decode are dropped here rather than failing
    /// the call.
    async fn recent_news(&self, symbol: &str, count: usize) -> Result<Vec<RawNewsEntry>>;

    /// Provider name (e.g. "yahoo")
    fn name(&self) -> &'static str;
}
