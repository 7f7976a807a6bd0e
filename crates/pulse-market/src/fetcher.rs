//! Per-ticker fetch orchestration
//!
//! [`StockFetcher`] turns provider calls into a [`FetchResult`]: metrics
//! plus normalized news on success, an error string on failure. Provider
//! errors never escape a fetch; they become the per-ticker `Failure`
//! variant, so one bad symbol cannot take down a batch.

use crate::metrics::{StockMetrics, build_metrics};
use crate::news::{NewsItem, normalize_news};
use crate::provider::MarketDataProvider;
use crate::types::LookbackPeriod;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Default number of news entries carried per ticker
pub const DEFAULT_NEWS_LIMIT: usize = 5;

/// Outcome of fetching one ticker
#[derive(Debug, Clone)]
pub enum FetchResult {
    /// Provider calls succeeded and the payload was shaped
    Success {
        metrics: StockMetrics,
        news: Vec<NewsItem>,
    },
    /// A provider call failed; the message is shown in place of analysis
    Failure { error: String },
}

impl FetchResult {
    /// Whether this fetch produced usable data
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Fetches and shapes per-ticker market data through a provider
pub struct StockFetcher {
    provider: Arc<dyn MarketDataProvider>,
    news_limit: usize,
}

impl StockFetcher {
    /// Create a fetcher over the given provider
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            provider,
            news_limit: DEFAULT_NEWS_LIMIT,
        }
    }

    /// Override the news limit
    pub fn with_news_limit(mut self, limit: usize) -> Self {
        self.news_limit = limit;
        self
    }

    /// Fetch one ticker, converting any provider error into data
    #[instrument(skip(self), fields(provider = self.provider.name()))]
    pub async fn fetch(&self, symbol: &str, period: LookbackPeriod) -> FetchResult {
        match self.fetch_inner(symbol, period).await {
            Ok((metrics, news)) => FetchResult::Success { metrics, news },
            Err(e) => {
                warn!("Fetch failed for {}: {}", symbol, e);
                FetchResult::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    async fn fetch_inner(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> crate::error::Result<(StockMetrics, Vec<NewsItem>)> {
        let facts = self.provider.company_facts(symbol).await?;
        let history = self.provider.close_history(symbol, period).await?;
        let raw_news = self.provider.recent_news(symbol, self.news_limit).await?;

        let metrics = build_metrics(symbol, &facts, &history);
        let news = normalize_news(&raw_news, self.news_limit);
        debug!(
            "Fetched {}: {} bars, {} news items",
            symbol,
            history.len(),
            news.len()
        );

        Ok((metrics, news))
    }

    /// Fetch a whole batch sequentially, one result per symbol, input order
    /// preserved
    pub async fn fetch_batch(
        &self,
        symbols: &[String],
        period: LookbackPeriod,
    ) -> Vec<(String, FetchResult)> {
        let mut results = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let result = self.fetch(symbol, period).await;
            results.push((symbol.clone(), result));
        }
        results
    }
}
