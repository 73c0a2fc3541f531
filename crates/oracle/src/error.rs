//! Error types for oracle backends.

use thiserror::Error;

/// Errors raised while calling a text-generation backend.
#[derive(Error, Debug)]
pub enum OracleError {
    /// HTTP request error (connection, body decoding)
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    /// The backend did not answer within the request timeout
    #[error("HTTP request timed out: {0}")]
    Timeout(reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// No API key configured for the provider
    #[error("Missing API key: set {0}")]
    MissingApiKey(&'static str),

    /// The reply contained no text
    #[error("Empty response from {0}")]
    EmptyResponse(&'static str),

    /// Unknown provider name
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OracleError::Timeout(err)
        } else {
            OracleError::Http(err)
        }
    }
}

/// Result type for oracle operations
pub type Result<T> = std::result::Result<T, OracleError>;

impl From<OracleError> for deck_core::Error {
    fn from(err: OracleError) -> Self {
        deck_core::Error::OracleCallFailed(err.to_string())
    }
}
