//! Headless desktop runtime that saves cards into a directory.

use super::platform::{
    Blob, DeviceKind, ObjectUrl, Platform, RuntimeInfo, ShareError, ShareFile, SharePayload,
};
use crate::error::{PlatformError, PlatformResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A [`Platform`] for native hosts without a browser.
///
/// It has no share sheet. Object URLs live in an in-process table until they
/// are revoked, and a "download" writes the blob into `dir`.
pub struct DirectoryPlatform {
    dir: PathBuf,
    next_id: AtomicU64,
    object_urls: Mutex<HashMap<ObjectUrl, Blob>>,
}

impl DirectoryPlatform {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            next_id: AtomicU64::new(1),
            object_urls: Mutex::new(HashMap::new()),
        }
    }

    /// Directory files are saved into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of object URLs not yet revoked.
    pub fn live_object_urls(&self) -> usize {
        self.object_urls.lock().map(|table| table.len()).unwrap_or(0)
    }

    fn lookup(&self, url: &ObjectUrl) -> PlatformResult<Blob> {
        let table = self
            .object_urls
            .lock()
            .map_err(|_| PlatformError::Download("object URL table poisoned".to_string()))?;
        table
            .get(url)
            .cloned()
            .ok_or_else(|| PlatformError::Download(format!("unknown object URL {}", url)))
    }

    fn save(&self, file_name: &str, blob: &Blob) -> PlatformResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, blob.bytes())?;
        tracing::info!(path = %path.display(), bytes = blob.len(), "Saved contact card");
        Ok(())
    }
}

#[async_trait]
impl Platform for DirectoryPlatform {
    fn runtime_info(&self) -> RuntimeInfo {
        RuntimeInfo {
            device: DeviceKind::Desktop,
            share_files: false,
            anchor_download: true,
        }
    }

    fn can_share(&self, _file: &ShareFile) -> bool {
        false
    }

    async fn share(&self, _payload: SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Failed("sharing is not available".to_string()))
    }

    fn create_blob(&self, bytes: &[u8], mime_type: &str) -> PlatformResult<Blob> {
        Ok(Blob::new(bytes, mime_type))
    }

    fn create_object_url(&self, blob: &Blob) -> PlatformResult<ObjectUrl> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let url = ObjectUrl(format!("blob:contact-export/{}", id));
        self.object_urls
            .lock()
            .map_err(|_| PlatformError::ObjectUrl("object URL table poisoned".to_string()))?
            .insert(url.clone(), blob.clone());
        Ok(url)
    }

    fn click_download(&self, url: &ObjectUrl, file_name: &str) -> PlatformResult<()> {
        let blob = self.lookup(url)?;
        self.save(file_name, &blob)
    }

    fn open_url(&self, url: &ObjectUrl) -> PlatformResult<()> {
        let blob = self.lookup(url)?;
        let name = url
            .as_str()
            .rsplit('/')
            .next()
            .map(|id| format!("download-{}.vcf", id))
            .unwrap_or_else(|| "download.vcf".to_string());
        self.save(&name, &blob)
    }

    fn revoke_object_url(&self, url: &ObjectUrl) {
        if let Ok(mut table) = self.object_urls.lock() {
            table.remove(url);
        }
    }
}
