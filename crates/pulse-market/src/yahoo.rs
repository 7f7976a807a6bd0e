//! Yahoo Finance backed market-data provider
//!
//! Three upstream surfaces feed one ticker:
//!
//! - the quote-summary endpoint for fundamentals (any module or field of
//!   the payload may be missing, so every decoded field is optional)
//! - the chart history via the `yahoo_finance_api` crate for daily closes
//! - the search endpoint for recent news entries

use crate::error::{MarketError, Result};
use crate::news::RawNewsEntry;
use crate::provider::MarketDataProvider;
use crate::types::{CompanyFacts, DailyBar, LookbackPeriod};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

const QUOTE_SUMMARY_URL: &str = "https://query2.finance.yahoo.com/v10/finance/quoteSummary";
const SEARCH_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";
const QUOTE_SUMMARY_MODULES: &str =
    "price,summaryProfile,summaryDetail,financialData,defaultKeyStatistics";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const TIMEOUT_SECS: u64 = 30;

/// Yahoo Finance market-data provider
#[derive(Debug, Clone)]
pub struct YahooMarketData {
    client: Client,
}

impl YahooMarketData {
    /// Create a new Yahoo provider
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    /// Fetch fundamentals from the quote-summary endpoint
    async fn fetch_company_facts(&self, symbol: &str) -> Result<CompanyFacts> {
        debug!("Fetching quote summary for {}", symbol);

        let response = self
            .client
            .get(format!("{QUOTE_SUMMARY_URL}/{symbol}"))
            .query(&[("modules", QUOTE_SUMMARY_MODULES)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::YahooError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let envelope: QuoteSummaryEnvelope = response.json().await?;
        summary_to_facts(symbol, envelope)
    }

    /// Fetch daily closes over the lookback window
    async fn fetch_close_history(
        &self,
        symbol: &str,
        period: LookbackPeriod,
    ) -> Result<Vec<DailyBar>> {
        debug!("Fetching {} of close history for {}", period, symbol);

        let provider =
            yahoo::YahooConnector::new().map_err(|e| MarketError::YahooError(e.to_string()))?;

        let (start, end) = period.window();

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::YahooError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::YahooError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::YahooError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::YahooError(e.to_string()))?;

        Ok(quotes
            .iter()
            .map(|q| DailyBar {
                date: DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
                close: q.close,
            })
            .collect())
    }

    /// Fetch recent news entries from the search endpoint
    async fn fetch_recent_news(&self, symbol: &str, count: usize) -> Result<Vec<RawNewsEntry>> {
        debug!("Fetching up to {} news entries for {}", count, symbol);

        let count_param = count.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("q", symbol),
                ("newsCount", count_param.as_str()),
                ("quotesCount", "0"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::YahooError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let envelope: SearchEnvelope = response.json().await?;
        Ok(decode_news_entries(envelope.news))
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    async fn company_facts(&self, symbol: &str) -> Result<CompanyFacts> {
        self.fetch_company_facts(symbol).await
    }

    async fn close_history(&self, symbol: &str, period: LookbackPeriod) -> Result<Vec<DailyBar>> {
        self.fetch_close_history(symbol, period).await
    }

    async fn recent_news(&self, symbol: &str, count: usize) -> Result<Vec<RawNewsEntry>> {
        self.fetch_recent_news(symbol, count).await
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

// ============================================================================
// Quote-summary wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct QuoteSummaryEnvelope {
    #[serde(rename = "quoteSummary")]
    quote_summary: QuoteSummaryBody,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryBody {
    #[serde(default)]
    result: Option<Vec<QuoteSummaryResult>>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSummaryResult {
    #[serde(default)]
    price: Option<PriceModule>,
    #[serde(default, rename = "summaryProfile")]
    summary_profile: Option<ProfileModule>,
    #[serde(default, rename = "summaryDetail")]
    summary_detail: Option<SummaryDetailModule>,
    #[serde(default, rename = "financialData")]
    financial_data: Option<FinancialDataModule>,
    #[serde(default, rename = "defaultKeyStatistics")]
    key_statistics: Option<KeyStatisticsModule>,
}

#[derive(Debug, Default, Deserialize)]
struct PriceModule {
    #[serde(default, rename = "shortName")]
    short_name: Option<String>,
    #[serde(default, rename = "longName")]
    long_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileModule {
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    industry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SummaryDetailModule {
    #[serde(default, rename = "trailingPE")]
    trailing_pe: Option<RawNum>,
    #[serde(default, rename = "forwardPE")]
    forward_pe: Option<RawNum>,
    #[serde(default, rename = "dividendYield")]
    dividend_yield: Option<RawNum>,
}

#[derive(Debug, Default, Deserialize)]
struct FinancialDataModule {
    #[serde(default, rename = "currentPrice")]
    current_price: Option<RawNum>,
    #[serde(default, rename = "targetMeanPrice")]
    target_mean_price: Option<RawNum>,
    #[serde(default, rename = "returnOnEquity")]
    return_on_equity: Option<RawNum>,
    #[serde(default, rename = "returnOnAssets")]
    return_on_assets: Option<RawNum>,
    #[serde(default, rename = "debtToEquity")]
    debt_to_equity: Option<RawNum>,
    #[serde(default, rename = "quickRatio")]
    quick_ratio: Option<RawNum>,
    #[serde(default, rename = "currentRatio")]
    current_ratio: Option<RawNum>,
    #[serde(default, rename = "recommendationKey")]
    recommendation_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct KeyStatisticsModule {
    #[serde(default, rename = "trailingEps")]
    trailing_eps: Option<RawNum>,
    #[serde(default, rename = "pegRatio")]
    peg_ratio: Option<RawNum>,
    #[serde(default, rename = "priceToBook")]
    price_to_book: Option<RawNum>,
    #[serde(default, rename = "forwardPE")]
    forward_pe: Option<RawNum>,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`; absent values
/// come through as `{}`
#[derive(Debug, Default, Deserialize)]
struct RawNum {
    #[serde(default)]
    raw: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    news: Vec<serde_json::Value>,
}

// ============================================================================
// Decoding
// ============================================================================

/// Turn a quote-summary envelope into company facts
fn summary_to_facts(symbol: &str, envelope: QuoteSummaryEnvelope) -> Result<CompanyFacts> {
    let body = envelope.quote_summary;

    if let Some(err) = body.error {
        return Err(MarketError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: err
                .description
                .or(err.code)
                .unwrap_or_else(|| "provider error".to_string()),
        });
    }

    let result = body
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .ok_or_else(|| MarketError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "empty quote summary".to_string(),
        })?;

    Ok(flatten_summary(result))
}

/// Flatten the module structure into the one-level facts record
fn flatten_summary(result: QuoteSummaryResult) -> CompanyFacts {
    let price = result.price.unwrap_or_default();
    let profile = result.summary_profile.unwrap_or_default();
    let detail = result.summary_detail.unwrap_or_default();
    let financial = result.financial_data.unwrap_or_default();
    let stats = result.key_statistics.unwrap_or_default();

    CompanyFacts {
        name: price.short_name.or(price.long_name),
        sector: profile.sector,
        industry: profile.industry,
        current_price: raw(financial.current_price),
        target_price: raw(financial.target_mean_price),
        trailing_pe: raw(detail.trailing_pe),
        forward_pe: raw(detail.forward_pe).or(raw(stats.forward_pe)),
        peg_ratio: raw(stats.peg_ratio),
        price_to_book: raw(stats.price_to_book),
        dividend_yield: raw(detail.dividend_yield),
        eps: raw(stats.trailing_eps),
        roe: raw(financial.return_on_equity),
        roa: raw(financial.return_on_assets),
        debt_to_equity: raw(financial.debt_to_equity),
        quick_ratio: raw(financial.quick_ratio),
        current_ratio: raw(financial.current_ratio),
        recommendation_key: financial.recommendation_key,
    }
}

fn raw(num: Option<RawNum>) -> Option<f64> {
    num.and_then(|n| n.raw)
}

/// Decode search-endpoint news values, skipping entries that do not parse
fn decode_news_entries(values: Vec<serde_json::Value>) -> Vec<RawNewsEntry> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<RawNewsEntry>(value) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("Skipping undecodable news entry: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quote_summary_decodes_and_flattens() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {"shortName": "Apple Inc.", "longName": "Apple Inc. (AAPL)"},
                    "summaryProfile": {"sector": "Technology", "industry": "Consumer Electronics"},
                    "summaryDetail": {
                        "trailingPE": {"raw": 29.4, "fmt": "29.40"},
                        "forwardPE": {"raw": 25.1, "fmt": "25.10"},
                        "dividendYield": {"raw": 0.0044, "fmt": "0.44%"}
                    },
                    "financialData": {
                        "currentPrice": {"raw": 150.0},
                        "targetMeanPrice": {"raw": 180.0},
                        "returnOnEquity": {"raw": 1.2},
                        "returnOnAssets": {"raw": 0.2},
                        "debtToEquity": {"raw": 170.0},
                        "quickRatio": {"raw": 0.9},
                        "currentRatio": {"raw": 1.1},
                        "recommendationKey": "buy"
                    },
                    "defaultKeyStatistics": {
                        "trailingEps": {"raw": 6.1},
                        "pegRatio": {"raw": 2.3},
                        "priceToBook": {"raw": 45.0}
                    }
                }],
                "error": null
            }
        }"#;

        let envelope: QuoteSummaryEnvelope = serde_json::from_str(body).unwrap();
        let facts = summary_to_facts("AAPL", envelope).unwrap();

        assert_eq!(facts.name.as_deref(), Some("Apple Inc."));
        assert_eq!(facts.sector.as_deref(), Some("Technology"));
        assert_eq!(facts.current_price, Some(150.0));
        assert_eq!(facts.target_price, Some(180.0));
        assert_eq!(facts.trailing_pe, Some(29.4));
        assert_eq!(facts.forward_pe, Some(25.1));
        assert_eq!(facts.dividend_yield, Some(0.0044));
        assert_eq!(facts.eps, Some(6.1));
        assert_eq!(facts.recommendation_key.as_deref(), Some("buy"));
    }

    #[test]
    fn test_quote_summary_tolerates_missing_modules_and_empty_nums() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {"shortName": "Mystery Corp"},
                    "summaryDetail": {"trailingPE": {}}
                }],
                "error": null
            }
        }"#;

        let envelope: QuoteSummaryEnvelope = serde_json::from_str(body).unwrap();
        let facts = summary_to_facts("MYST", envelope).unwrap();

        assert_eq!(facts.name.as_deref(), Some("Mystery Corp"));
        assert_eq!(facts.sector, None);
        assert_eq!(facts.trailing_pe, None);
        assert_eq!(facts.current_price, None);
    }

    #[test]
    fn test_quote_summary_error_becomes_data_unavailable() {
        let body = r#"{
            "quoteSummary": {
                "result": null,
                "error": {"code": "Not Found", "description": "Quote not found for ticker symbol: ZZZZ"}
            }
        }"#;

        let envelope: QuoteSummaryEnvelope = serde_json::from_str(body).unwrap();
        let err = summary_to_facts("ZZZZ", envelope).unwrap_err();

        match err {
            MarketError::DataUnavailable { symbol, reason } => {
                assert_eq!(symbol, "ZZZZ");
                assert!(reason.contains("Quote not found"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_result_becomes_data_unavailable() {
        let body = r#"{"quoteSummary": {"result": [], "error": null}}"#;
        let envelope: QuoteSummaryEnvelope = serde_json::from_str(body).unwrap();
        let err = summary_to_facts("NONE", envelope).unwrap_err();
        assert!(matches!(err, MarketError::DataUnavailable { .. }));
    }

    #[test]
    fn test_forward_pe_falls_back_to_key_statistics() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "defaultKeyStatistics": {"forwardPE": {"raw": 18.5}}
                }],
                "error": null
            }
        }"#;

        let envelope: QuoteSummaryEnvelope = serde_json::from_str(body).unwrap();
        let facts = summary_to_facts("X", envelope).unwrap();
        assert_eq!(facts.forward_pe, Some(18.5));
    }

    #[test]
    fn test_decode_news_entries_skips_bad_values() {
        let values = vec![
            json!({"title": "Good entry", "publisher": "Desk"}),
            json!(null),
            json!("just a string"),
            json!({"content": {"title": "Nested entry"}}),
        ];

        let entries = decode_news_entries(values);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("Good entry"));
        assert!(entries[1].content.is_some());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_company_facts() {
        let provider = YahooMarketData::new().unwrap();
        let facts = provider.company_facts("AAPL").await.unwrap();
        assert!(facts.name.is_some());
        assert!(facts.current_price.is_some());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_close_history() {
        let provider = YahooMarketData::new().unwrap();
        let bars = provider
            .close_history("AAPL", LookbackPeriod::OneMonth)
            .await
            .unwrap();
        assert!(!bars.is_empty());
        assert!(bars[0].close > 0.0);
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_recent_news() {
        let provider = YahooMarketData::new().unwrap();
        let entries = provider.recent_news("AAPL", 5).await.unwrap();
        assert!(entries.len() <= 5);
    }
}
