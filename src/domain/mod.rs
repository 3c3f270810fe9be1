//! Domain value objects and types.
//!
//! Type-safe wrappers for profile identifiers and inline photo payloads.
//! These value objects validate at construction time so invalid data never
//! reaches the encoder or the delivery layer.

pub mod data_uri;
pub mod errors;
pub mod profile_id;

pub use data_uri::DataUri;
pub use errors::ValidationError;
pub use profile_id::ProfileId;
