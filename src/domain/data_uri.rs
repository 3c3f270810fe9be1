//! `data:` URI decoding for inline profile photos.

use super::errors::ValidationError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;

static DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<mime>[^;,]*)(?P<params>(?:;[^;,]*)*),(?P<data>.*)$")
        .expect("data URI pattern is valid")
});

/// Media type of a `data:` URI that names none (RFC 2397).
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// A decoded `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type, lowercased. `text/plain` when the URI leaves it out.
    pub mime_type: String,

    /// Decoded payload.
    pub bytes: Vec<u8>,
}

impl DataUri {
    /// Whether the string looks like a `data:` URI at all.
    pub fn is_data_uri(value: &str) -> bool {
        value
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"))
    }

    /// Parse and decode a `data:` URI.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidDataUri` when the URI has no payload
    /// separator or the base64 payload does not decode.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();
        let rest = trimmed
            .get(5..)
            .filter(|_| Self::is_data_uri(trimmed))
            .ok_or_else(|| ValidationError::InvalidDataUri("missing data: scheme".to_string()))?;

        let caps = DATA_URI
            .captures(rest)
            .ok_or_else(|| ValidationError::InvalidDataUri("missing ',' separator".to_string()))?;

        let mime = caps["mime"].trim().to_ascii_lowercase();
        let is_base64 = caps["params"]
            .split(';')
            .any(|p| p.trim().eq_ignore_ascii_case("base64"));
        let data = &caps["data"];

        let bytes = if is_base64 {
            let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact.as_bytes())
                .map_err(|e| ValidationError::InvalidDataUri(e.to_string()))?
        } else {
            urlencoding::decode_binary(data.as_bytes()).into_owned()
        };

        Ok(Self {
            mime_type: if mime.is_empty() {
                DEFAULT_MIME_TYPE.to_string()
            } else {
                mime
            },
            bytes,
        })
    }
}
