//! ProfileId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A type-safe wrapper for profile identifiers (database id or public slug).
///
/// Surrounding whitespace is trimmed and blank identifiers are rejected, so a
/// `ProfileId` is always usable as a URL path segment once encoded.
///
/// # Example
///
/// ```
/// use contact_export::domain::ProfileId;
///
/// let id = ProfileId::new("ada-lovelace").unwrap();
/// assert_eq!(id.as_str(), "ada-lovelace");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileId(String);

impl ProfileId {
    /// Create a new ProfileId, validating that it's not blank.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the provided ID is empty or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ID percent-encoded for use inside a URL path.
    pub fn path_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl Serialize for ProfileId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProfileId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ProfileId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
