//! Analysis result types
//!
//! [`AnalysisResult`] is the terminal per-ticker artifact the presentation
//! layers consume. [`AnalysisReport`] collects one result per requested
//! ticker and iterates them in request order.

use crate::recommendation::Recommendation;
use pulse_market::{NewsItem, StockMetrics};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;

/// Disclaimer attached to machine-readable output
pub const DISCLAIMER: &str = "DISCLAIMER: The analysis provided is for informational purposes only and does not constitute investment advice. Always conduct your own research and consult with a qualified financial advisor before making investment decisions.";

/// Outcome of analyzing one ticker
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    /// The model produced a parseable recommendation
    Success {
        ticker: String,
        name: String,
        #[serde(flatten)]
        recommendation: Recommendation,
        news: Vec<NewsItem>,
        metrics: StockMetrics,
    },
    /// The fetch or the generation failed; the message replaces the
    /// recommendation in every rendering
    Failure {
        ticker: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        error: String,
    },
}

impl AnalysisResult {
    /// Whether the analysis produced a recommendation
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The ticker this result belongs to
    pub fn ticker(&self) -> &str {
        match self {
            Self::Success { ticker, .. } | Self::Failure { ticker, .. } => ticker,
        }
    }

    /// Company name when known, the ticker otherwise
    pub fn display_name(&self) -> &str {
        match self {
            Self::Success { name, .. } => name,
            Self::Failure { ticker, name, .. } => name.as_deref().unwrap_or(ticker),
        }
    }
}

/// One analysis run's results, keyed by ticker, in request order
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnalysisReport {
    pub tickers: Vec<String>,
    pub results: HashMap<String, AnalysisResult>,
}

impl AnalysisReport {
    /// Create an empty report for the given ticker set
    ///
    /// A ticker repeated in the request keeps its first position and ends
    /// up with a single entry, holding the last result recorded for it.
    pub fn new(tickers: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            if !deduped.contains(&ticker) {
                deduped.push(ticker);
            }
        }
        Self {
            tickers: deduped,
            results: HashMap::new(),
        }
    }

    /// Record one ticker's result
    pub fn insert(&mut self, ticker: String, result: AnalysisResult) {
        self.results.insert(ticker, result);
    }

    /// Look up one ticker's result
    pub fn get(&self, ticker: &str) -> Option<&AnalysisResult> {
        self.results.get(ticker)
    }

    /// Iterate results in request order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnalysisResult)> {
        self.tickers
            .iter()
            .filter_map(|t| self.results.get(t).map(|r| (t.as_str(), r)))
    }

    /// Number of recorded results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no results have been recorded
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether every requested ticker has a result
    pub fn is_complete(&self) -> bool {
        self.tickers.iter().all(|t| self.results.contains_key(t))
    }

    /// Fraction of results that carry a recommendation
    pub fn success_rate(&self) -> f64 {
        if self.results.is_empty() {
            return 0.0;
        }
        let successes = self.results.values().filter(|r| r.is_success()).count();
        successes as f64 / self.results.len() as f64
    }

    /// The `{results, disclaimer}` document exposed to presentation layers
    pub fn to_document(&self) -> serde_json::Value {
        json!({
            "results": self.results,
            "disclaimer": DISCLAIMER,
        })
    }
}
