//! Contact export service.
//!
//! Public entry point of the export engine: profile → [`VCardData`] →
//! [`encode`] → [`Deliverer`], then the success side effects
//! (acknowledgment, analytics).

use crate::analytics::{AnalyticsEvent, AnalyticsNotifier, SessionContext};
use crate::client::AsyncCardApi;
use crate::config::Config;
use crate::delivery::{DeliveryStrategy, Deliverer, Platform};
use crate::domain::{DataUri, ProfileId};
use crate::error::ExportError;
use crate::feedback::SavedIndicator;
use crate::metrics::Metrics;
use crate::models::{present, Profile};
use crate::vcard::{encode, Photo, Tier, VCardData};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// What a successful export did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Strategy that delivered the file
    pub strategy: DeliveryStrategy,

    /// Tier the card was encoded at
    pub tier: Tier,

    /// Suggested file name
    pub file_name: String,

    /// Size of the locally encoded record in bytes
    pub bytes: usize,
}

/// Outcome of one export invocation.
pub type ExportResult = Result<ExportReport, ExportError>;

/// Contact export operations.
#[async_trait]
pub trait ExportService: Send + Sync {
    /// Encode `profile` at `tier` and deliver it to the user.
    ///
    /// Resolves once a strategy has delivered the file or every strategy
    /// failed. A dismissed share sheet is not an error.
    async fn export_contact(&self, profile: &Profile, tier: Tier) -> ExportResult;
}

/// Default implementation of ExportService.
pub struct ExportServiceImpl {
    config: Config,
    api: Arc<dyn AsyncCardApi>,
    deliverer: Deliverer,
    analytics: AnalyticsNotifier,
    session: SessionContext,
    indicator: SavedIndicator,
    metrics: Metrics,
}

impl ExportServiceImpl {
    /// Create a new export service.
    pub fn new(
        config: &Config,
        platform: Arc<dyn Platform>,
        api: Arc<dyn AsyncCardApi>,
        session: SessionContext,
        metrics: Metrics,
    ) -> Self {
        let deliverer = Deliverer::new(
            platform,
            api.clone(),
            config.revoke_delay(),
            config.timeout(),
        );

        Self {
            config: config.clone(),
            analytics: AnalyticsNotifier::new(api.clone(), metrics.clone()),
            api,
            deliverer,
            session,
            indicator: SavedIndicator::new(),
            metrics,
        }
    }

    /// The "contact saved" acknowledgment driven by this service.
    pub fn indicator(&self) -> &SavedIndicator {
        &self.indicator
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Load the profile photo for embedding, or `None` to skip it.
    ///
    /// Oversized, untyped, non-image, malformed and unreachable photos are all
    /// skipped with a warning; the card is still produced.
    async fn resolve_photo(&self, profile: &Profile) -> Option<Photo> {
        let source = present(profile.personal_info.profile_photo.as_ref())?;
        let max_bytes = self.config.max_photo_bytes;

        let photo = if DataUri::is_data_uri(source) {
            match DataUri::parse(source) {
                Ok(uri) => Photo {
                    mime_type: Some(uri.mime_type),
                    bytes: uri.bytes,
                },
                Err(e) => {
                    warn!(error = %e, "Skipping photo with malformed data URI");
                    return None;
                }
            }
        } else {
            let fetch = self.api.fetch_photo(source, max_bytes);
            match tokio::time::timeout(self.config.timeout(), fetch).await {
                Ok(Ok(photo)) => photo,
                Ok(Err(e)) => {
                    warn!(error = %e, "Skipping unreachable photo");
                    return None;
                }
                Err(_) => {
                    warn!("Skipping photo, fetch timed out");
                    return None;
                }
            }
        };

        if photo.bytes.is_empty() || photo.bytes.len() > max_bytes {
            warn!(bytes = photo.bytes.len(), max_bytes, "Skipping photo outside size limits");
            return None;
        }
        if !photo
            .mime_type
            .as_deref()
            .is_some_and(|mime| mime.starts_with("image/"))
        {
            warn!(mime_type = ?photo.mime_type, "Skipping non-image photo");
            return None;
        }

        Some(photo)
    }

    fn on_delivered(&self, id: Option<ProfileId>, strategy: DeliveryStrategy) {
        self.metrics.record_delivery(strategy);
        self.indicator.acknowledge();

        match id {
            Some(id) => {
                // Handle dropped: analytics never holds up the export.
                let _ = self
                    .analytics
                    .notify(id, AnalyticsEvent::vcard_download(&self.session));
            }
            None => debug!("No profile identifier, analytics event skipped"),
        }
    }
}

#[async_trait]
impl ExportService for ExportServiceImpl {
    async fn export_contact(&self, profile: &Profile, tier: Tier) -> ExportResult {
        self.metrics.record_export_started();

        let id = profile.identifier();
        let photo = match tier {
            Tier::Full => self.resolve_photo(profile).await,
            Tier::Minimal | Tier::Simple => None,
        };
        let profile_url = id
            .as_ref()
            .and_then(|id| self.config.public_profile_url(id));

        let data = VCardData::from_profile(profile, profile_url.as_deref(), photo);
        let card = encode(&data, tier);
        debug!(tier = %tier, bytes = card.text.len(), file_name = %card.file_name, "Encoded card");

        match self.deliverer.deliver(&card, id.as_ref()).await {
            Ok(strategy) => {
                info!(strategy = %strategy, file_name = %card.file_name, "Contact exported");
                self.on_delivered(id, strategy);
                Ok(ExportReport {
                    strategy,
                    tier,
                    file_name: card.file_name,
                    bytes: card.text.len(),
                })
            }
            Err(e) => {
                self.metrics.record_export_failed();
                error!(error = %e, "Contact export failed");
                Err(e)
            }
        }
    }
}
