//! Runtime configuration for an analysis run

use crate::error::{CoreError, Result};
use pulse_market::{DEFAULT_NEWS_LIMIT, LookbackPeriod};
use tracing::warn;

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Low temperature for near-deterministic analysis output
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone)]
pub struct PulseConfig {
    /// OpenAI API key; a run cannot start without one
    pub api_key: Option<String>,

    /// Base URL override for OpenAI-compatible deployments; `None` keeps
    /// the provider default
    pub api_base: Option<String>,

    /// Chat model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Historical window for the return calculation
    pub lookback: LookbackPeriod,

    /// News entries carried per ticker
    pub news_limit: usize,
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: 1024,
            lookback: LookbackPeriod::OneYear,
            news_limit: DEFAULT_NEWS_LIMIT,
        }
    }
}

impl PulseConfig {
    /// Build a configuration from the environment
    ///
    /// Reads `OPENAI_API_KEY`, `OPENAI_API_BASE`, `MODEL_NAME` and
    /// `LOOKBACK_PERIOD`; anything unset keeps its default. An unparseable
    /// `LOOKBACK_PERIOD` falls back to the default window with a warning.
    /// Call [`validate`](Self::validate) before starting a run.
    pub fn from_env() -> Self {
        let lookback = match std::env::var("LOOKBACK_PERIOD") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                let fallback = LookbackPeriod::default();
                warn!("Unrecognized LOOKBACK_PERIOD {raw:?}, using {fallback}");
                fallback
            }),
            Err(_) => LookbackPeriod::default(),
        };
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            api_base: std::env::var("OPENAI_API_BASE").ok(),
            model: std::env::var("MODEL_NAME").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            lookback,
            ..Self::default()
        }
    }

    /// Override the chat model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the lookback period
    pub fn with_lookback(mut self, lookback: LookbackPeriod) -> Self {
        self.lookback = lookback;
        self
    }

    /// Override the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Point the OpenAI-compatible API at a custom base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Validate the configuration
    ///
    /// An absent or empty API key is a fatal configuration error, surfaced
    /// before any per-ticker work begins.
    pub fn validate(&self) -> Result<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(()),
            _ => Err(CoreError::ConfigurationError(
                "OPENAI_API_KEY environment variable is not set".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PulseConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.lookback, LookbackPeriod::OneYear);
        assert_eq!(config.news_limit, 5);
        assert!(config.api_key.is_none());
        assert!(config.api_base.is_none());
    }

    #[test]
    fn test_from_env_reads_api_base() {
        unsafe {
            std::env::set_var("OPENAI_API_BASE", "http://localhost:8000/v1");
        }

        let config = PulseConfig::from_env();
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:8000/v1"));

        unsafe {
            std::env::remove_var("OPENAI_API_BASE");
        }
    }

    #[test]
    fn test_validate_requires_api_key() {
        let config = PulseConfig::default();
        assert!(config.validate().is_err());

        let config = PulseConfig::default().with_api_key("");
        assert!(config.validate().is_err());

        let config = PulseConfig::default().with_api_key("sk-test");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PulseConfig::default()
            .with_model("gpt-4o")
            .with_lookback(LookbackPeriod::SixMonths)
            .with_api_base("http://localhost:8000/v1");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.lookback, LookbackPeriod::SixMonths);
        assert_eq!(config.api_base.as_deref(), Some("http://localhost:8000/v1"));
    }
}
