//! Error types for market-data operations

use thiserror::Error;

/// Result type for market-data operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors that can occur while fetching market data
#[derive(Error, Debug)]
pub enum MarketError {
    /// Yahoo Finance call failed
    #[error("Yahoo Finance error: {0}")]
    YahooError(String),

    /// Provider answered but had nothing for the symbol
    #[error("No data available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Lookback period string not recognized
    #[error("Invalid lookback period: {0}")]
    InvalidPeriod(String),

    /// Network/HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::YahooError("connection refused".to_string());
        assert_eq!(err.to_string(), "Yahoo Finance error: connection refused");

        let err = MarketError::DataUnavailable {
            symbol: "ZZZZ".to_string(),
            reason: "Quote not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No data available for ZZZZ: Quote not found"
        );

        let err = MarketError::InvalidPeriod("7w".to_string());
        assert_eq!(err.to_string(), "Invalid lookback period: 7w");
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: MarketError = parse_err.into();
        assert!(matches!(err, MarketError::JsonError(_)));
    }
}
