use async_trait::async_trait;
use contact_export::delivery::{
    Blob, DeviceKind, ObjectUrl, Platform, RuntimeInfo, ShareError, ShareFile, SharePayload,
};
use contact_export::error::{PlatformError, PlatformResult};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Mock runtime for delivery tests.
///
/// Capabilities and failures are configured up front; every call is tracked
/// so tests can assert on the exact side effects of an export.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockPlatform {
    info: Arc<Mutex<RuntimeInfo>>,
    accepts_vcard: Arc<Mutex<bool>>,
    share_results: Arc<Mutex<VecDeque<Result<(), ShareError>>>>,
    blob_failures: Arc<Mutex<usize>>,
    click_failures: Arc<Mutex<usize>>,
    next_url: Arc<Mutex<usize>>,
    shares: Arc<Mutex<Vec<SharePayload>>>,
    downloads: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    opened: Arc<Mutex<Vec<ObjectUrl>>>,
    created: Arc<Mutex<Vec<ObjectUrl>>>,
    revoked: Arc<Mutex<Vec<ObjectUrl>>>,
    live: Arc<Mutex<HashMap<ObjectUrl, Blob>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl MockPlatform {
    /// Desktop browser without native file sharing.
    pub fn desktop() -> Self {
        Self::with_info(RuntimeInfo {
            device: DeviceKind::Desktop,
            share_files: false,
            anchor_download: true,
        })
    }

    /// Mobile browser that can share `text/vcard` files.
    pub fn mobile_with_share() -> Self {
        let platform = Self::with_info(RuntimeInfo {
            device: DeviceKind::Mobile,
            share_files: true,
            anchor_download: true,
        });
        platform.set_accepts_vcard(true);
        platform
    }

    /// Mobile browser without share support that ignores synthetic clicks.
    pub fn mobile_without_anchor() -> Self {
        Self::with_info(RuntimeInfo {
            device: DeviceKind::Mobile,
            share_files: false,
            anchor_download: false,
        })
    }

    pub fn with_info(info: RuntimeInfo) -> Self {
        Self {
            info: Arc::new(Mutex::new(info)),
            accepts_vcard: Arc::new(Mutex::new(false)),
            share_results: Arc::new(Mutex::new(VecDeque::new())),
            blob_failures: Arc::new(Mutex::new(0)),
            click_failures: Arc::new(Mutex::new(0)),
            next_url: Arc::new(Mutex::new(0)),
            shares: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(Vec::new())),
            opened: Arc::new(Mutex::new(Vec::new())),
            created: Arc::new(Mutex::new(Vec::new())),
            revoked: Arc::new(Mutex::new(Vec::new())),
            live: Arc::new(Mutex::new(HashMap::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether `can_share` accepts vCard files.
    pub fn set_accepts_vcard(&self, accepts: bool) {
        *self.accepts_vcard.lock().unwrap() = accepts;
    }

    /// Queue the outcome of the next share invocation (default: success).
    pub fn push_share_result(&self, result: Result<(), ShareError>) {
        self.share_results.lock().unwrap().push_back(result);
    }

    /// Make the next `count` blob constructions throw.
    pub fn fail_blobs(&self, count: usize) {
        *self.blob_failures.lock().unwrap() = count;
    }

    /// Make the next `count` download triggers throw.
    pub fn fail_clicks(&self, count: usize) {
        *self.click_failures.lock().unwrap() = count;
    }

    pub fn shares(&self) -> Vec<SharePayload> {
        self.shares.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<(String, Vec<u8>)> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<ObjectUrl> {
        self.opened.lock().unwrap().clone()
    }

    pub fn created_urls(&self) -> Vec<ObjectUrl> {
        self.created.lock().unwrap().clone()
    }

    pub fn revoked_urls(&self) -> Vec<ObjectUrl> {
        self.revoked.lock().unwrap().clone()
    }

    pub fn live_urls(&self) -> usize {
        self.live.lock().unwrap().len()
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

    fn take_failure(counter: &Mutex<usize>) -> bool {
        let mut remaining = counter.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            true
        } else {
            false
        }
    }
}

#[async_trait]
impl Platform for MockPlatform {
    fn runtime_info(&self) -> RuntimeInfo {
        self.track_call("runtime_info");
        *self.info.lock().unwrap()
    }

    fn can_share(&self, file: &ShareFile) -> bool {
        self.track_call("can_share");
        *self.accepts_vcard.lock().unwrap() && file.mime_type == "text/vcard"
    }

    async fn share(&self, payload: SharePayload) -> Result<(), ShareError> {
        self.track_call("share");
        self.shares.lock().unwrap().push(payload);
        self.share_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }

    fn create_blob(&self, bytes: &[u8], mime_type: &str) -> PlatformResult<Blob> {
        self.track_call("create_blob");
        if Self::take_failure(&self.blob_failures) {
            return Err(PlatformError::Blob("synthetic blob failure".to_string()));
        }
        Ok(Blob::new(bytes, mime_type))
    }

    fn create_object_url(&self, blob: &Blob) -> PlatformResult<ObjectUrl> {
        self.track_call("create_object_url");
        let mut next = self.next_url.lock().unwrap();
        *next += 1;
        let url = ObjectUrl(format!("blob:mock/{}", *next));
        self.created.lock().unwrap().push(url.clone());
        self.live.lock().unwrap().insert(url.clone(), blob.clone());
        Ok(url)
    }

    fn click_download(&self, url: &ObjectUrl, file_name: &str) -> PlatformResult<()> {
        self.track_call("click_download");
        if Self::take_failure(&self.click_failures) {
            return Err(PlatformError::Download("synthetic click failure".to_string()));
        }
        let blob = self
            .live
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| PlatformError::Download(format!("revoked URL {}", url)))?;
        self.downloads
            .lock()
            .unwrap()
            .push((file_name.to_string(), blob.bytes().to_vec()));
        Ok(())
    }

    fn open_url(&self, url: &ObjectUrl) -> PlatformResult<()> {
        self.track_call("open_url");
        if Self::take_failure(&self.click_failures) {
            return Err(PlatformError::Download("synthetic open failure".to_string()));
        }
        self.opened.lock().unwrap().push(url.clone());
        Ok(())
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        self.track_call("revoke_object_url");
        self.revoked.lock().unwrap().push(url.clone());
        self.live.lock().unwrap().remove(url);
    }
}
