//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided ID is empty.
    EmptyId,

    /// The provided `data:` URI is malformed.
    InvalidDataUri(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "ID cannot be empty"),
            Self::InvalidDataUri(reason) => write!(f, "Invalid data URI: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
