use async_trait::async_trait;
use contact_export::analytics::AnalyticsEvent;
use contact_export::client::AsyncCardApi;
use contact_export::domain::ProfileId;
use contact_export::error::{CardApiError, CardApiResult};
use contact_export::vcard::Photo;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory stand-in for the profiles backend.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCardApi {
    vcards: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    photos: Arc<Mutex<HashMap<String, Photo>>>,
    events: Arc<Mutex<Vec<(String, AnalyticsEvent)>>>,
    fail_events: Arc<Mutex<bool>>,
    vcard_delay: Arc<Mutex<Option<Duration>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockCardApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` as the server-rendered vCard for `id`.
    pub fn add_vcard(&self, id: &str, bytes: &[u8]) {
        self.vcards
            .lock()
            .unwrap()
            .insert(id.to_string(), bytes.to_vec());
    }

    /// Serve `photo` at `url`.
    pub fn add_photo(&self, url: &str, photo: Photo) {
        self.photos.lock().unwrap().insert(url.to_string(), photo);
    }

    /// Make every analytics call fail.
    pub fn fail_events(&self) {
        *self.fail_events.lock().unwrap() = true;
    }

    /// Delay vCard responses (paired with paused tokio time).
    pub fn delay_vcards(&self, delay: Duration) {
        *self.vcard_delay.lock().unwrap() = Some(delay);
    }

    pub fn events(&self) -> Vec<(String, AnalyticsEvent)> {
        self.events.lock().unwrap().clone()
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
    }
}

#[async_trait]
impl AsyncCardApi for MockCardApi {
    async fn fetch_vcard(&self, id: &ProfileId) -> CardApiResult<Vec<u8>> {
        self.track_call("fetch_vcard");

        let delay = *self.vcard_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.vcards
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| CardApiError::NotFound(format!("vCard for {}", id)))
    }

    async fn fetch_photo(&self, url: &str, max_bytes: usize) -> CardApiResult<Photo> {
        self.track_call("fetch_photo");

        let photo = self
            .photos
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| CardApiError::NotFound(url.to_string()))?;
        if photo.bytes.len() > max_bytes {
            return Err(CardApiError::PayloadTooLarge { limit: max_bytes });
        }
        Ok(photo)
    }

    async fn record_event(&self, id: &ProfileId, event: &AnalyticsEvent) -> CardApiResult<()> {
        self.track_call("record_event");

        if *self.fail_events.lock().unwrap() {
            return Err(CardApiError::ApiError {
                status: 500,
                message: "analytics unavailable".to_string(),
            });
        }
        self.events
            .lock()
            .unwrap()
            .push((id.to_string(), event.clone()));
        Ok(())
    }
}
