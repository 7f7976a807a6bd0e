use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("index.html");

/// GET / - single-page dashboard.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health - liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeParams {
    pub tickers: Option<String>,
}

/// GET /api/analyze?tickers=AAPL,MSFT - run the full pipeline and return
/// the report document as JSON.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyzeParams>,
) -> Result<Json<Value>, AppError> {
    let Some(raw) = params.tickers else {
        return Err(AppError::bad_request(
            "Missing required query parameter: tickers",
        ));
    };
    let tickers = parse_tickers(&raw);
    if tickers.is_empty() {
        return Err(AppError::bad_request(
            "Please enter at least one valid stock ticker.",
        ));
    }

    info!("Analyzing {} stocks: {}", tickers.len(), tickers.join(", "));
    let report = state.pipeline.run(&tickers).await;
    Ok(Json(report.to_document()))
}

/// Splits user input on commas and whitespace and uppercases each symbol.
fn parse_tickers(raw: &str) -> Vec<String> {
    raw.replace(',', " ")
        .split_whitespace()
        .map(str::to_uppercase)
        .collect()
}
