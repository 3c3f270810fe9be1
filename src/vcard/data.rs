//! Flattened projection of a profile into what the encoder understands.

use crate::models::{present, Profile};

/// An image ready to embed in a full-tier card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// MIME type such as `image/jpeg`, when known
    pub mime_type: Option<String>,

    /// Raw image bytes
    pub bytes: Vec<u8>,
}

impl Photo {
    /// vCard `TYPE` value for the photo (`image/jpeg` → `JPEG`).
    pub fn type_param(&self) -> Option<String> {
        let mime = self.mime_type.as_deref()?;
        let subtype = mime.split_once('/').map_or(mime, |(_, sub)| sub);
        let subtype = subtype.split(';').next().unwrap_or_default().trim();
        (!subtype.is_empty()).then(|| subtype.to_ascii_uppercase())
    }
}

/// Structured address components, each already trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl AddressParts {
    /// Whether at least one component is set.
    pub fn is_empty(&self) -> bool {
        self.street.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }

    /// `street, city, state postalCode, country` with blank parts skipped.
    pub fn single_line(&self) -> String {
        let region = [self.state.as_deref(), self.postal_code.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.street.as_deref(),
            self.city.as_deref(),
            (!region.is_empty()).then_some(region.as_str()),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// A labelled URL (social platform or custom link).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelledUrl {
    pub label: String,
    pub url: String,
}

/// Everything the encoder needs, built once per export and never mutated.
///
/// Optional fields are `None` when the profile value is absent or blank, so
/// the encoder only has to check presence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VCardData {
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub organization: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub website: Option<String>,
    pub address: AddressParts,
    pub profile_url: Option<String>,
    pub social: Vec<LabelledUrl>,
    pub note: Option<String>,
    pub photo: Option<Photo>,
}

fn owned(value: Option<&String>) -> Option<String> {
    present(value).map(str::to_string)
}

/// Label used when a link's own label has nothing printable.
const FALLBACK_LABEL: &str = "custom";

/// Printable, trimmed link label; control characters never reach `TYPE=`.
fn link_label(raw: &str) -> String {
    let printable: String = raw.chars().filter(|c| !c.is_control()).collect();
    match printable.trim() {
        "" => FALLBACK_LABEL.to_string(),
        label => label.to_string(),
    }
}

impl VCardData {
    /// Project a profile.
    ///
    /// `profile_url` is the public link to embed; `photo` is the already
    /// resolved image (only used by the full tier).
    pub fn from_profile(profile: &Profile, profile_url: Option<&str>, photo: Option<Photo>) -> Self {
        let personal = &profile.personal_info;
        let contact = &profile.contact_info;
        let address = contact.address.clone().unwrap_or_default();

        let social = profile
            .social_links
            .platform_links()
            .map(|(name, url)| LabelledUrl {
                label: link_label(name),
                url: url.to_string(),
            })
            .chain(profile.social_links.custom_links().map(|link| LabelledUrl {
                label: link_label(&link.label),
                url: link.url.trim().to_string(),
            }))
            .collect();

        Self {
            first_name: personal.first_name.trim().to_string(),
            last_name: personal.last_name.trim().to_string(),
            title: owned(personal.title.as_ref()),
            organization: owned(personal.company.as_ref()),
            phone: owned(contact.phone.as_ref()),
            email: owned(contact.email.as_ref()),
            whatsapp: owned(contact.whatsapp.as_ref()),
            website: owned(contact.website.as_ref()),
            address: AddressParts {
                street: owned(address.street.as_ref()),
                city: owned(address.city.as_ref()),
                state: owned(address.state.as_ref()),
                postal_code: owned(address.postal_code.as_ref()),
                country: owned(address.country.as_ref()),
            },
            profile_url: profile_url
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            social,
            note: owned(personal.bio.as_ref()),
            photo,
        }
    }

    /// `first last` with blank halves skipped.
    pub fn full_name(&self) -> String {
        [self.first_name.as_str(), self.last_name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
