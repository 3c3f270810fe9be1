//! Profile model as returned by the profiles REST endpoints.
//!
//! The export core consumes profiles read-only. Every sub-object is optional
//! on the wire and deserializes to its empty default when missing.

use crate::domain::ProfileId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A digital business card profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    /// Database identifier (`_id` in some API responses)
    #[serde(alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Public slug used in vanity URLs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Name, title, company, bio and images
    pub personal_info: PersonalInfo,

    /// Phone, email, WhatsApp, website and postal address
    pub contact_info: ContactInfo,

    /// Social platform links plus custom labelled links
    pub social_links: SocialLinks,
}

/// Personal details of a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Photo as an `http(s)` URL or a `data:` URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Contact channels of a profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Postal address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

/// Social links keyed by platform name, in the order the user arranged them.
///
/// `null` values are accepted and treated like empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SocialLinks {
    /// Custom `{label, url}` entries
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom: Vec<CustomLink>,

    /// Platform name → URL
    #[serde(flatten)]
    pub platforms: IndexMap<String, Option<String>>,
}

/// A user-defined link with its own label.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CustomLink {
    pub label: String,
    pub url: String,
}

/// Trimmed value of an optional field, `None` when absent or blank.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl Profile {
    /// Stable identifier used for public URLs and the server fallback.
    ///
    /// Prefers the database id and falls back to the slug.
    pub fn identifier(&self) -> Option<ProfileId> {
        present(self.id.as_ref())
            .or_else(|| present(self.slug.as_ref()))
            .and_then(|id| ProfileId::new(id).ok())
    }

    /// `first last`, trimmed, skipping whichever half is blank.
    pub fn full_name(&self) -> String {
        let first = self.personal_info.first_name.trim();
        let last = self.personal_info.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{} {}", first, last),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => String::new(),
        }
    }
}

impl SocialLinks {
    /// Non-empty platform links as `(platform, url)`, in stored order.
    pub fn platform_links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.platforms
            .iter()
            .filter_map(|(name, url)| present(url.as_ref()).map(|url| (name.as_str(), url)))
            .filter(|(name, _)| !name.trim().is_empty())
    }

    /// Custom links whose URL is non-empty.
    pub fn custom_links(&self) -> impl Iterator<Item = &CustomLink> {
        self.custom.iter().filter(|link| !link.url.trim().is_empty())
    }
}
