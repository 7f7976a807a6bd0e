//! Two-stage analysis pipeline
//!
//! A run moves through exactly two stages: fetch every ticker's data, then
//! analyze every fetch result. No retries, no loop-back, no cross-ticker
//! state. Per-ticker failures ride along as data and never stop the run.

use crate::analysis::AnalysisReport;
use crate::config::PulseConfig;
use crate::engine::RecommendationEngine;
use crate::error::{CoreError, Result};
use pulse_llm::{OpenAiConfig, OpenAiProvider};
use pulse_market::{FetchResult, LookbackPeriod, StockFetcher, YahooMarketData};
use std::sync::Arc;
use tracing::{debug, instrument};

/// The two stages of an analysis run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Fetching,
    Analyzing,
}

/// Sequences the batch fetcher and the recommendation engine
pub struct AnalysisPipeline {
    fetcher: StockFetcher,
    engine: RecommendationEngine,
    lookback: LookbackPeriod,
}

impl AnalysisPipeline {
    /// Assemble a pipeline from already-built components
    pub fn new(
        fetcher: StockFetcher,
        engine: RecommendationEngine,
        lookback: LookbackPeriod,
    ) -> Self {
        Self {
            fetcher,
            engine,
            lookback,
        }
    }

    /// Build the production pipeline: Yahoo Finance data, OpenAI analysis
    pub fn from_config(config: PulseConfig) -> Result<Self> {
        config.validate()?;
        let api_key = config.api_key.clone().ok_or_else(|| {
            CoreError::ConfigurationError(
                "OPENAI_API_KEY environment variable is not set".to_string(),
            )
        })?;

        let market = YahooMarketData::new()?;
        let fetcher = StockFetcher::new(Arc::new(market)).with_news_limit(config.news_limit);

        let provider = OpenAiProvider::with_config(llm_config(&config, api_key))?;
        let lookback = config.lookback;
        let engine = RecommendationEngine::new(Arc::new(provider), config);

        Ok(Self::new(fetcher, engine, lookback))
    }

    /// Run the full pipeline over a ticker set
    ///
    /// Returns one [`AnalysisResult`](crate::AnalysisResult) per ticker, in
    /// request order.
    #[instrument(skip(self, tickers), fields(tickers = tickers.len()))]
    pub async fn run(&self, tickers: &[String]) -> AnalysisReport {
        let fetched = self.fetch_stage(tickers).await;
        self.analyze_stage(tickers, fetched).await
    }

    async fn fetch_stage(&self, tickers: &[String]) -> Vec<(String, FetchResult)> {
        debug!(stage = ?PipelineStage::Fetching, "Fetching {} tickers", tickers.len());
        self.fetcher.fetch_batch(tickers, self.lookback).await
    }

    async fn analyze_stage(
        &self,
        tickers: &[String],
        fetched: Vec<(String, FetchResult)>,
    ) -> AnalysisReport {
        debug!(stage = ?PipelineStage::Analyzing, "Analyzing {} fetch results", fetched.len());
        let mut report = AnalysisReport::new(tickers.to_vec());
        for (ticker, fetch) in fetched {
            let result = self.engine.analyze(&ticker, fetch).await;
            report.insert(ticker, result);
        }
        report
    }
}

/// Provider configuration for the run, with the `OPENAI_API_BASE` override
/// applied when one is set
fn llm_config(config: &PulseConfig, api_key: String) -> OpenAiConfig {
    let llm = OpenAiConfig::new(api_key);
    match &config.api_base {
        Some(base) => llm.with_api_base(base.clone()),
        None => llm,
    }
}
