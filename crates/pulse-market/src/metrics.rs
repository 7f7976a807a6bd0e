//! Flat per-ticker metrics record and its derivations

use crate::types::{CompanyFacts, DailyBar};
use serde::{Deserialize, Serialize};

/// Flat financial metrics for one ticker
///
/// Numeric fields are `None` whenever the provider omitted them; an absent
/// value is rendered as unknown downstream, never as zero.
/// `dividend_yield`, `roe` and `roa` are percentages here (fractional
/// provider values scaled by 100).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockMetrics {
    pub ticker: String,
    pub name: String,
    pub sector: String,
    pub industry: String,
    pub current_price: Option<f64>,
    pub target_price: Option<f64>,
    /// Percent price change over the lookback window, rounded to 2 decimals
    pub yearly_return: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub eps: Option<f64>,
    pub roe: Option<f64>,
    pub roa: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub current_ratio: Option<f64>,
    /// Analyst consensus rating, uppercased ("BUY", "HOLD", ... or "N/A")
    pub recommendation: String,
    /// Percent distance from current price to the analyst target
    pub target_upside: Option<f64>,
}

/// Build the metrics record for one ticker from provider facts and history
pub fn build_metrics(ticker: &str, facts: &CompanyFacts, history: &[DailyBar]) -> StockMetrics {
    StockMetrics {
        ticker: ticker.to_string(),
        name: facts.name.clone().unwrap_or_else(|| ticker.to_string()),
        sector: facts
            .sector
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        industry: facts
            .industry
            .clone()
            .unwrap_or_else(|| "Unknown".to_string()),
        current_price: facts.current_price,
        target_price: facts.target_price,
        yearly_return: window_return(history),
        pe_ratio: facts.trailing_pe,
        forward_pe: facts.forward_pe,
        peg_ratio: facts.peg_ratio,
        price_to_book: facts.price_to_book,
        dividend_yield: facts.dividend_yield.map(to_percent),
        eps: facts.eps,
        roe: facts.roe.map(to_percent),
        roa: facts.roa.map(to_percent),
        debt_to_equity: facts.debt_to_equity,
        quick_ratio: facts.quick_ratio,
        current_ratio: facts.current_ratio,
        recommendation: facts
            .recommendation_key
            .as_deref()
            .map_or_else(|| "N/A".to_string(), str::to_uppercase),
        target_upside: target_upside(facts.target_price, facts.current_price),
    }
}

/// Percent price change from the first close to the last close
///
/// `None` for an empty window or a zero starting close; the division would
/// carry no meaning either way.
pub fn window_return(history: &[DailyBar]) -> Option<f64> {
    let first = history.first()?.close;
    let last = history.last()?.close;
    if first == 0.0 {
        return None;
    }
    Some(round2((last - first) / first * 100.0))
}

/// Percent distance from the current price to the analyst target
///
/// Computed only when both prices are present and the current price is
/// nonzero; otherwise unknown.
pub fn target_upside(target: Option<f64>, current: Option<f64>) -> Option<f64> {
    match (target, current) {
        (Some(t), Some(c)) if c != 0.0 => Some((t / c - 1.0) * 100.0),
        _ => None,
    }
}

fn to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
