//! Error types for the RUIAN client
//!
//! This module defines all error types used throughout the library.
//! Every failure is a typed variant; nothing is retried or swallowed at
//! this layer, and no partial results are returned on error.

use thiserror::Error;

/// Error type for RUIAN client operations
#[derive(Error, Debug)]
pub enum RuianError {
    /// Transport-level failure (DNS, connection refused, TLS, timeout)
    #[error("connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    /// The API rejected the API key (HTTP 401)
    #[error("invalid API key")]
    Auth,

    /// The hourly request quota was exhausted (HTTP 429)
    #[error("rate limit exceeded ({limit} requests per hour)")]
    RateLimited {
        /// The quota the API enforces
        limit: u32,
    },

    /// The API reported an error (422, 5xx, unexpected status, bad JSON)
    #[error("API error: {0}")]
    Api(String),

    /// A response decoded as JSON but did not match the expected shape
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl RuianError {
    /// HTTP 422: a required query parameter was not supplied.
    pub fn missing_parameters() -> Self {
        RuianError::Api("missing required parameters".to_string())
    }

    /// HTTP 5xx.
    pub fn server_error() -> Self {
        RuianError::Api("server error".to_string())
    }

    /// Any status code the API contract does not document.
    pub fn unexpected_status(status: u16) -> Self {
        RuianError::Api(format!("unexpected status: {}", status))
    }

    /// A 200 body that failed to parse as JSON.
    pub fn invalid_json(err: &serde_json::Error) -> Self {
        RuianError::Api(format!("invalid JSON response: {}", err))
    }
}

/// Result type alias for RUIAN client operations
pub type Result<T> = std::result::Result<T, RuianError>;
