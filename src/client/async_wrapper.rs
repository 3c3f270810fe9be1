//! Async wrapper around the synchronous CardApiClient.
//!
//! Runs each HTTP call on tokio's blocking thread pool so the export pipeline
//! never stalls the async runtime.

use crate::analytics::AnalyticsEvent;
use crate::client::CardApiClient;
use crate::domain::ProfileId;
use crate::error::{CardApiError, CardApiResult};
use crate::vcard::Photo;
use async_trait::async_trait;
use std::sync::Arc;

/// Backend operations the export engine depends on.
#[async_trait]
pub trait AsyncCardApi: Send + Sync {
    /// Server-rendered vCard for a profile.
    async fn fetch_vcard(&self, id: &ProfileId) -> CardApiResult<Vec<u8>>;

    /// Profile photo, at most `max_bytes` long.
    async fn fetch_photo(&self, url: &str, max_bytes: usize) -> CardApiResult<Photo>;

    /// Analytics event for a profile.
    async fn record_event(&self, id: &ProfileId, event: &AnalyticsEvent) -> CardApiResult<()>;
}

/// Async wrapper around the synchronous [`CardApiClient`].
#[derive(Clone)]
pub struct AsyncCardApiImpl {
    client: Arc<CardApiClient>,
}

impl AsyncCardApiImpl {
    pub fn new(client: CardApiClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> CardApiError {
    CardApiError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncCardApi for AsyncCardApiImpl {
    async fn fetch_vcard(&self, id: &ProfileId) -> CardApiResult<Vec<u8>> {
        let client = self.client.clone();
        let id = id.clone();

        tokio::task::spawn_blocking(move || client.fetch_vcard(&id))
            .await
            .map_err(join_error)?
    }

    async fn fetch_photo(&self, url: &str, max_bytes: usize) -> CardApiResult<Photo> {
        let client = self.client.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || client.fetch_photo(&url, max_bytes))
            .await
            .map_err(join_error)?
    }

    async fn record_event(&self, id: &ProfileId, event: &AnalyticsEvent) -> CardApiResult<()> {
        let client = self.client.clone();
        let id = id.clone();
        let event = event.clone();

        tokio::task::spawn_blocking(move || client.record_event(&id, &event))
            .await
            .map_err(join_error)?
    }
}
