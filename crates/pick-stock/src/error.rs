//! Error types for the daily pick pipeline

use pick_llm::LLMError;
use pick_utils::EnvError;
use thiserror::Error;

/// Errors raised by the pick pipeline
#[derive(Debug, Error)]
pub enum PickError {
    /// Required environment variable missing or blank
    #[error("Configuration error: {0}")]
    Env(#[from] EnvError),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Fundamentals for one symbol could not be retrieved
    #[error("Market data unavailable for {symbol}: {reason}")]
    MarketData { symbol: String, reason: String },

    /// Market data source could not be set up at all
    #[error("Market data source error: {0}")]
    Source(String),

    /// Prompt rendering failed
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// LLM request failed
    #[error("LLM error: {0}")]
    Llm(#[from] LLMError),

    /// LLM reply carried no text content
    #[error("LLM reply contained no text")]
    EmptyResponse,

    /// Mail composition or delivery failed
    #[error("Mail error: {0}")]
    Mail(String),
}

impl PickError {
    /// Shorthand for a per-symbol retrieval failure
    pub fn market_data(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MarketData {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for pick operations
pub type Result<T> = std::result::Result<T, PickError>;
