//! Analyst prompt template and rendering
//!
//! One fixed natural-language template, filled per ticker with the metrics
//! record, a preformatted news block and the format instructions for the
//! structured reply. Rendering is a pure function of its inputs.

use crate::error::{CoreError, Result};
use pulse_market::{NewsItem, StockMetrics};
use serde_json::{Value, json};
use std::fmt::Write;

/// Fixed sentence used when a ticker has no news
pub const NO_NEWS_SENTENCE: &str = "No recent news available.";

/// Placeholder for metrics the provider did not report
const NOT_AVAILABLE: &str = "N/A";

const ANALYST_PROMPT: &str = r"You are a professional stock analyst with expertise in financial analysis and market trends.
Analyze the following stock data and provide a clear investment recommendation.

Stock Information:
- Ticker: {{ ticker }}
- Company Name: {{ name }}
- Sector: {{ sector }}
- Industry: {{ industry }}
- Current Price: ${{ current_price }}
- Target Price: ${{ target_price }}
- Target Upside: {{ target_upside }}%

Financial Metrics:
- 1-Year Return: {{ yearly_return }}%
- P/E Ratio: {{ pe_ratio }}
- Forward P/E: {{ forward_pe }}
- PEG Ratio: {{ peg_ratio }}
- Price-to-Book: {{ price_to_book }}
- Dividend Yield: {{ dividend_yield }}%
- EPS: ${{ eps }}
- ROE: {{ roe }}%
- ROA: {{ roa }}%
- Debt-to-Equity: {{ debt_to_equity }}
- Quick Ratio: {{ quick_ratio }}
- Current Ratio: {{ current_ratio }}
- Analyst Recommendation: {{ recommendation }}

Recent News:
{{ news }}

Based on the above information, provide:
1. A clear investment signal: BUY, SELL, or HOLD
2. A concise explanation of your recommendation (3-5 sentences)
3. Key factors that influenced your decision
4. Potential risks to your recommendation

{{ format_instructions }}";

/// Format news items into the numbered block the prompt expects
///
/// An empty list yields the fixed no-news sentence, never an empty string.
pub fn format_news(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return NO_NEWS_SENTENCE.to_string();
    }

    let mut formatted = String::new();
    for (i, item) in news.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = writeln!(
            formatted,
            "{}. {} ({} - {})",
            i + 1,
            item.title,
            item.published,
            item.publisher
        );
    }
    formatted
}

/// Render the analyst prompt for one ticker
pub fn render_analyst_prompt(
    metrics: &StockMetrics,
    news: &[NewsItem],
    format_instructions: &str,
) -> Result<String> {
    let vars = prompt_vars(metrics, &format_news(news), format_instructions);

    let env = minijinja::Environment::new();
    env.render_str(ANALYST_PROMPT, minijinja::value::Value::from_serialize(&vars))
        .map_err(|e| CoreError::PromptRenderFailed(e.to_string()))
}

fn prompt_vars(metrics: &StockMetrics, news_block: &str, format_instructions: &str) -> Value {
    json!({
        "ticker": metrics.ticker,
        "name": metrics.name,
        "sector": metrics.sector,
        "industry": metrics.industry,
        "current_price": metric(metrics.current_price),
        "target_price": metric(metrics.target_price),
        "target_upside": metric(metrics.target_upside),
        "yearly_return": metric(metrics.yearly_return),
        "pe_ratio": metric(metrics.pe_ratio),
        "forward_pe": metric(metrics.forward_pe),
        "peg_ratio": metric(metrics.peg_ratio),
        "price_to_book": metric(metrics.price_to_book),
        "dividend_yield": metric(metrics.dividend_yield),
        "eps": metric(metrics.eps),
        "roe": metric(metrics.roe),
        "roa": metric(metrics.roa),
        "debt_to_equity": metric(metrics.debt_to_equity),
        "quick_ratio": metric(metrics.quick_ratio),
        "current_ratio": metric(metrics.current_ratio),
        "recommendation": metrics.recommendation,
        "news": news_block,
        "format_instructions": format_instructions,
    })
}

fn metric(value: Option<f64>) -> Value {
    value.map_or_else(|| Value::String(NOT_AVAILABLE.to_string()), |v| json!(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, publisher: &str, published: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            publisher: publisher.to_string(),
            link: "https://example.com".to_string(),
            published: published.to_string(),
        }
    }

    fn sample_metrics() -> StockMetrics {
        StockMetrics {
            ticker: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            sector: "Technology".to_string(),
            industry: "Consumer Electronics".to_string(),
            current_price: Some(150.0),
            target_price: Some(180.0),
            yearly_return: Some(12.5),
            pe_ratio: Some(28.4),
            forward_pe: None,
            peg_ratio: None,
            price_to_book: Some(44.1),
            dividend_yield: Some(0.55),
            eps: Some(6.1),
            roe: Some(147.25),
            roa: Some(28.5),
            debt_to_equity: None,
            quick_ratio: Some(0.88),
            current_ratio: Some(1.04),
            recommendation: "BUY".to_string(),
            target_upside: Some(20.0),
        }
    }

    #[test]
    fn test_format_news_numbers_items() {
        let news = vec![
            item("Apple unveils new chip", "Reuters", "2024-05-01"),
            item("iPhone sales beat estimates", "Bloomberg", "2024-04-28"),
        ];

        let block = format_news(&news);
        assert_eq!(
            block,
            "1. Apple unveils new chip (2024-05-01 - Reuters)\n\
             2. iPhone sales beat estimates (2024-04-28 - Bloomberg)\n"
        );
    }

    #[test]
    fn test_format_news_empty_list() {
        assert_eq!(format_news(&[]), "No recent news available.");
    }

    #[test]
    fn test_format_news_repeatable() {
        let news = vec![item("Guidance raised", "WSJ", "2024-03-12")];
        assert_eq!(format_news(&news), format_news(&news));
    }

    #[test]
    fn test_render_fills_stock_information() {
        let metrics = sample_metrics();
        let prompt = render_analyst_prompt(&metrics, &[], "Reply as JSON.").unwrap();

        assert!(prompt.contains("- Ticker: AAPL"));
        assert!(prompt.contains("- Company Name: Apple Inc."));
        assert!(prompt.contains("- Analyst Recommendation: BUY"));
        assert!(prompt.contains("Reply as JSON."));
    }

    #[test]
    fn test_render_absent_metrics_show_na() {
        let metrics = sample_metrics();
        let prompt = render_analyst_prompt(&metrics, &[], "").unwrap();

        assert!(prompt.contains("- Forward P/E: N/A"));
        assert!(prompt.contains("- PEG Ratio: N/A"));
        assert!(prompt.contains("- Debt-to-Equity: N/A"));
    }

    #[test]
    fn test_render_empty_news_uses_fixed_sentence() {
        let metrics = sample_metrics();
        let prompt = render_analyst_prompt(&metrics, &[], "").unwrap();

        assert!(prompt.contains("Recent News:\nNo recent news available."));
    }

    #[test]
    fn test_render_includes_news_block() {
        let metrics = sample_metrics();
        let news = vec![item("Buybacks announced", "Reuters", "2024-02-02")];
        let prompt = render_analyst_prompt(&metrics, &news, "").unwrap();

        assert!(prompt.contains("1. Buybacks announced (2024-02-02 - Reuters)"));
    }
}
