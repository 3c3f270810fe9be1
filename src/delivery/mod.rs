//! Delivery of encoded cards to the user.
//!
//! Per export, capability detection picks the first [`DeliveryStrategy`]; a
//! failing strategy hands over to its [`DeliveryStrategy::fallback`]:
//!
//! 1. native share sheet (only when the runtime can share a `text/vcard` file)
//! 2. direct download through a temporary object URL
//! 3. server-rendered copy, downloaded the same way
//!
//! Share cancellation and local download failures are logged and fall
//! through. Only a failing server fallback is an error.

pub mod directory;
pub mod object_url;
pub mod platform;
pub mod strategy;

pub use directory::DirectoryPlatform;
pub use object_url::ObjectUrlLease;
pub use platform::{
    Blob, DeviceKind, ObjectUrl, Platform, RuntimeInfo, ShareError, ShareFile, SharePayload,
};
pub use strategy::{select_strategy, Capabilities, DeliveryStrategy, DownloadMethod};

use crate::client::AsyncCardApi;
use crate::domain::ProfileId;
use crate::error::{ExportError, PlatformResult};
use crate::vcard::EncodedCard;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Delivers one encoded card through the first strategy that works.
#[derive(Clone)]
pub struct Deliverer {
    platform: Arc<dyn Platform>,
    api: Arc<dyn AsyncCardApi>,
    revoke_delay: Duration,
    fallback_timeout: Duration,
}

impl Deliverer {
    pub fn new(
        platform: Arc<dyn Platform>,
        api: Arc<dyn AsyncCardApi>,
        revoke_delay: Duration,
        fallback_timeout: Duration,
    ) -> Self {
        Self {
            platform,
            api,
            revoke_delay,
            fallback_timeout,
        }
    }

    /// Deliver `card`, returning the strategy that succeeded.
    ///
    /// `profile_id` is only needed if the server fallback is reached.
    pub async fn deliver(
        &self,
        card: &EncodedCard,
        profile_id: Option<&ProfileId>,
    ) -> Result<DeliveryStrategy, ExportError> {
        let file = ShareFile {
            name: card.file_name.clone(),
            mime_type: card.mime_type.to_string(),
            bytes: card.bytes().to_vec(),
        };
        let caps = Capabilities::detect(self.platform.as_ref(), &file);

        let method = caps.download_method();
        let mut next = Some(select_strategy(&caps));

        while let Some(strategy) = next {
            match strategy {
                DeliveryStrategy::NativeShare => {
                    let payload = SharePayload {
                        file: file.clone(),
                        title: card.display_name.clone(),
                        text: format!("Contact card for {}", card.display_name),
                    };
                    match self.platform.share(payload).await {
                        Ok(()) => return Ok(strategy),
                        Err(ShareError::Cancelled) => {
                            info!("Share sheet dismissed, falling back to download")
                        }
                        Err(e) => warn!(error = %e, "Native share failed, falling back to download"),
                    }
                }
                DeliveryStrategy::DirectDownload => {
                    match self.download(card.bytes(), &card.file_name, card.mime_type, method) {
                        Ok(()) => return Ok(strategy),
                        Err(e) => warn!(error = %e, "Local download failed, requesting server copy"),
                    }
                }
                DeliveryStrategy::ServerFallback => {
                    self.server_fallback(card, profile_id, method).await?;
                    return Ok(strategy);
                }
            }
            next = strategy.fallback();
        }

        Err(ExportError::Exhausted)
    }

    /// Blob → object URL → save. The URL is revoked on every exit path.
    fn download(
        &self,
        bytes: &[u8],
        file_name: &str,
        mime_type: &str,
        method: DownloadMethod,
    ) -> PlatformResult<()> {
        let blob = self.platform.create_blob(bytes, mime_type)?;
        let url = self.platform.create_object_url(&blob)?;
        let lease = ObjectUrlLease::new(self.platform.clone(), url, self.revoke_delay);

        match method {
            DownloadMethod::AnchorClick => self.platform.click_download(lease.url(), file_name),
            DownloadMethod::OpenUrl => self.platform.open_url(lease.url()),
        }
    }

    async fn server_fallback(
        &self,
        card: &EncodedCard,
        profile_id: Option<&ProfileId>,
        method: DownloadMethod,
    ) -> Result<(), ExportError> {
        let id = profile_id.ok_or(ExportError::MissingIdentifier)?;
        if !card.named {
            return Err(ExportError::Unnamed);
        }

        debug!(profile_id = %id, "Requesting server-rendered vCard");
        let bytes = tokio::time::timeout(self.fallback_timeout, self.api.fetch_vcard(id))
            .await
            .map_err(|_| ExportError::FallbackTimeout(self.fallback_timeout.as_secs()))??;

        self.download(&bytes, &card.file_name, card.mime_type, method)?;
        Ok(())
    }
}
