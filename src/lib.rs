//! Contact Export - turns digital business card profiles into vCard files and
//! delivers them across devices and browsers.
//!
//! # Architecture
//!
//! - **vcard**: field sanitizing, line folding and tiered vCard encoding
//! - **delivery**: runtime capability detection, native share / download / server
//!   fallback chain, object URL lifetimes
//! - **services**: the export service tying encoding and delivery together
//! - **client**: HTTP client for the profiles REST backend
//! - **analytics**: session context and best-effort download events
//! - **feedback**: the transient "saved" acknowledgment
//! - **models** / **domain**: profile data and validated value objects
//! - **config**, **error**, **metrics**, **observability**: ambient plumbing

pub mod analytics;
pub mod client;
pub mod config;
pub mod delivery;
pub mod domain;
pub mod error;
pub mod feedback;
pub mod metrics;
pub mod models;
pub mod observability;
pub mod services;
pub mod vcard;

pub use analytics::{AnalyticsEvent, SessionContext};
pub use client::{AsyncCardApi, AsyncCardApiImpl, CardApiClient};
pub use config::Config;
pub use delivery::{Deliverer, DeliveryStrategy, DirectoryPlatform, Platform};
pub use error::{CardApiError, ConfigError, ExportError, PlatformError};
pub use feedback::SavedIndicator;
pub use metrics::{Metrics, MetricsSummary};
pub use models::Profile;
pub use services::{ExportReport, ExportResult, ExportService, ExportServiceImpl};
pub use vcard::{encode, sanitize, EncodedCard, Tier, VCardData};
