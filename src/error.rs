//! Error types for the contact export engine.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the profiles REST backend.
#[derive(Error, Debug)]
pub enum CardApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to serialize or parse JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Response body exceeded the allowed size
    #[error("Response too large (limit {limit} bytes)")]
    PayloadTooLarge { limit: usize },

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by the runtime while handing a file to the user.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The in-memory blob could not be constructed
    #[error("Blob construction failed: {0}")]
    Blob(String),

    /// No temporary object URL could be created for the blob
    #[error("Object URL creation failed: {0}")]
    ObjectUrl(String),

    /// The save could not be triggered
    #[error("Download trigger failed: {0}")]
    Download(String),

    /// Filesystem failure in a native runtime
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The fatal outcome of an export: every delivery strategy was exhausted.
#[derive(Error, Debug)]
pub enum ExportError {
    /// The profile has no id or slug to request a server copy with
    #[error("Profile has no identifier for the server fallback")]
    MissingIdentifier,

    /// The profile has neither a first nor a last name
    #[error("Profile has no name to build a file name from")]
    Unnamed,

    /// The server fallback request failed
    #[error("Server fallback failed: {0}")]
    Fallback(#[from] CardApiError),

    /// The server fallback request did not finish in time
    #[error("Server fallback timed out after {0} seconds")]
    FallbackTimeout(u64),

    /// The server copy arrived but could not be delivered either
    #[error("Server fallback delivery failed: {0}")]
    FallbackDelivery(#[from] PlatformError),

    /// The fallback chain ended without a terminal strategy
    #[error("No delivery strategy succeeded")]
    Exhausted,
}

impl ExportError {
    /// The single message shown to the user when an export fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::MissingIdentifier | ExportError::Unnamed => {
                "This contact can't be saved yet because the profile is incomplete."
            }
            _ => "Failed to save contact. Please try again.",
        }
    }
}

/// Convenience type alias for Results with CardApiError
pub type CardApiResult<T> = Result<T, CardApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with PlatformError
pub type PlatformResult<T> = Result<T, PlatformError>;
