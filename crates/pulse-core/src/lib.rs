//! Analysis pipeline for stock-pulse
//!
//! Wires the market-data layer to the text-generation layer:
//!
//! - A fixed analyst prompt template rendered per ticker
//! - A recommendation engine that parses model replies into a
//!   four-field recommendation and converts every failure to data
//! - A two-stage pipeline (fetch, then analyze) over a ticker set
//! - Run configuration with environment loading and validation

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod recommendation;

// Re-export main types
pub use analysis::{AnalysisReport, AnalysisResult, DISCLAIMER};
pub use config::{DEFAULT_MODEL, DEFAULT_TEMPERATURE, PulseConfig};
pub use engine::RecommendationEngine;
pub use error::{CoreError, Result};
pub use pipeline::{AnalysisPipeline, PipelineStage};
pub use prompt::{NO_NEWS_SENTENCE, format_news, render_analyst_prompt};
pub use recommendation::{Recommendation, output_schema};
