//! Error types for the application

use thiserror::Error;

/// Result type alias using our ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request errors
    #[error("HTTP request error: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Exchange answered with a non-success code in its response envelope
    #[error("Exchange API error {code}: {message}")]
    Api { code: String, message: String },

    /// Invalid API response
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration file could not be located
    #[error("Configuration file not found: {0}")]
    ConfigNotFound(String),

    /// Strategy name not recognised
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),

    /// Exchange has no connectivity implementation
    #[error("Exchange not supported: {0}")]
    UnsupportedExchange(String),

    /// Order side other than buy/sell
    #[error("side {0} does not exist")]
    InvalidOrderSide(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
