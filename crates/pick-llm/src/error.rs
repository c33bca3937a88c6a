//! Failures of a Messages API call
//!
//! Every variant maps to one way the single Anthropic round trip can go wrong.
//! None of them is retried; callers treat each as final.

use thiserror::Error;

/// Result type for model calls
pub type Result<T> = std::result::Result<T, LLMError>;

/// Why a completion could not be produced
#[derive(Error, Debug)]
pub enum LLMError {
    /// Non-success status without a more specific mapping
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// HTTP 401 or 403: the `x-api-key` was rejected
    #[error("Invalid API key or authentication failed")]
    AuthenticationFailed,

    /// HTTP 429
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// HTTP 400, with the API's own error message
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP 404 for the requested model id
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// HTTP 529
    #[error("Provider overloaded: {0}")]
    Overloaded(String),

    /// Transport failure, including the client timeout
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// 2xx body that is not a Messages API response
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// Provider could not be built, e.g. a blank API key
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
