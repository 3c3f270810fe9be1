//! vCard 3.0 encoding of business-card profiles.
//!
//! - [`sanitize`]: text value escaping
//! - [`fold`]: 75-octet line folding (full tier)
//! - [`data`]: the flattened [`VCardData`] projection
//! - [`encoder`]: tiered record assembly

pub mod data;
pub mod encoder;
pub mod fold;
pub mod sanitize;

pub use data::{AddressParts, LabelledUrl, Photo, VCardData};
pub use encoder::{encode, file_name_for, EncodedCard, Tier, VCARD_MIME_TYPE};
pub use fold::{fold_line, unfold, MAX_LINE_OCTETS};
pub use sanitize::{escape_param, sanitize, unescape};
