//! Data models for profiles consumed by the export engine.

pub mod profile;

pub use profile::{Address, ContactInfo, CustomLink, PersonalInfo, Profile, SocialLinks};
pub(crate) use profile::present;
