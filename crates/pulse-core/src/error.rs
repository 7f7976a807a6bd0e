//! Error types for the analysis pipeline

use thiserror::Error;

/// Pipeline-level errors
///
/// Per-ticker fetch and generation failures are carried as data inside
/// [`FetchResult`](pulse_market::FetchResult) and
/// [`crate::AnalysisResult`] and never surface here. This enum covers what
/// remains: configuration problems, which are fatal before any per-ticker
/// work starts, and the provider construction paths.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Prompt template failed to render
    #[error("Prompt rendering failed: {0}")]
    PromptRenderFailed(String),

    /// Text-generation provider error
    #[error(transparent)]
    Llm(#[from] pulse_llm::LlmError),

    /// Market-data provider error
    #[error(transparent)]
    Market(#[from] pulse_market::MarketError),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, CoreError>;
