//! Recommendation engine
//!
//! Takes one ticker's [`FetchResult`] and produces an [`AnalysisResult`].
//! Fetch failures pass straight through; generation and parse failures are
//! converted to failure results, never propagated as errors.

use crate::analysis::AnalysisResult;
use crate::config::PulseConfig;
use crate::error::Result;
use crate::prompt::render_analyst_prompt;
use crate::recommendation::{Recommendation, output_schema};
use pulse_llm::{CompletionRequest, LlmProvider, Message, format_instructions, parse_json_reply};
use pulse_market::{FetchResult, NewsItem, StockMetrics};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Turns fetched stock data into structured recommendations
pub struct RecommendationEngine {
    provider: Arc<dyn LlmProvider>,
    config: PulseConfig,
}

impl RecommendationEngine {
    /// Create an engine over the given text-generation provider
    pub fn new(provider: Arc<dyn LlmProvider>, config: PulseConfig) -> Self {
        Self { provider, config }
    }

    /// Analyze one ticker's fetch result
    ///
    /// Never fails outward: a fetch failure is passed through unchanged and
    /// any generation or parse failure becomes a failure result carrying a
    /// human-readable message.
    #[instrument(skip(self, fetch), fields(provider = self.provider.name()))]
    pub async fn analyze(&self, ticker: &str, fetch: FetchResult) -> AnalysisResult {
        match fetch {
            FetchResult::Failure { error } => AnalysisResult::Failure {
                ticker: ticker.to_string(),
                name: None,
                error,
            },
            FetchResult::Success { metrics, news } => match self.recommend(&metrics, &news).await
            {
                Ok(recommendation) => AnalysisResult::Success {
                    ticker: metrics.ticker.clone(),
                    name: metrics.name.clone(),
                    recommendation,
                    news,
                    metrics,
                },
                Err(e) => AnalysisResult::Failure {
                    ticker: metrics.ticker.clone(),
                    name: Some(metrics.name),
                    error: format!("Failed to parse analysis: {e}"),
                },
            },
        }
    }

    async fn recommend(
        &self,
        metrics: &StockMetrics,
        news: &[NewsItem],
    ) -> Result<Recommendation> {
        let instructions = format_instructions(&output_schema());
        let prompt = render_analyst_prompt(metrics, news, &instructions)?;

        let request = CompletionRequest::builder(&self.config.model)
            .messages(vec![Message::user(prompt)])
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        debug!("Requesting analysis for {}", metrics.ticker);
        let response = self.provider.complete(request).await?;
        let recommendation = parse_json_reply::<Recommendation>(&response.text)?;
        Ok(recommendation)
    }
}
