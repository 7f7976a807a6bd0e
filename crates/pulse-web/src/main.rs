//! Web dashboard for stock-pulse.
//!
//! Serves a small single-page UI plus a JSON API that runs the same
//! analysis pipeline as the CLI.

mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use pulse_core::{AnalysisPipeline, PulseConfig};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::state::AppState;

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/analyze", get(routes::analyze))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = PulseConfig::from_env();
    if config.validate().is_err() {
        eprintln!("Error: OPENAI_API_KEY environment variable is not set.");
        eprintln!("Please set it in a .env file or export it in your shell.");
        std::process::exit(1);
    }

    let pipeline = AnalysisPipeline::from_config(config)?;
    let state = Arc::new(AppState { pipeline });

    let addr =
        std::env::var("PULSE_WEB_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Stock Pulse dashboard listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
