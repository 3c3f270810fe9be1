//! The runtime seam: capability probing and browser-style side effects.

use crate::error::PlatformResult;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Kind of device the runtime reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceKind {
    Mobile,
    Desktop,
}

/// What the runtime reports about itself, before looking at a specific file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub device: DeviceKind,

    /// The runtime exposes a native "share with files" capability.
    pub share_files: bool,

    /// Synthetic anchor clicks trigger a save. Some mobile browsers ignore
    /// them and need the object URL opened directly.
    pub anchor_download: bool,
}

/// An in-memory file handed to the runtime.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    bytes: Arc<[u8]>,
    mime_type: String,
}

impl Blob {
    pub fn new(bytes: &[u8], mime_type: &str) -> Self {
        Self {
            bytes: Arc::from(bytes),
            mime_type: mime_type.to_string(),
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("len", &self.bytes.len())
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// A temporary URL pointing at a blob; must be revoked after use.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(pub String);

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file offered to the native share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Everything passed to one native share invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub file: ShareFile,
    pub title: String,
    pub text: String,
}

/// How a native share attempt ended without success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The user dismissed the share sheet.
    Cancelled,

    /// The runtime rejected or failed the share.
    Failed(String),
}

impl fmt::Display for ShareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled => write!(f, "share cancelled by user"),
            Self::Failed(reason) => write!(f, "share failed: {}", reason),
        }
    }
}

impl std::error::Error for ShareError {}

/// Runtime the export is delivered through (a browser, a webview host, or a
/// native desktop shell).
///
/// Implementations must be safe to call from concurrent exports; each export
/// owns the object URLs it creates.
#[async_trait]
pub trait Platform: Send + Sync {
    /// Device kind and native capabilities.
    fn runtime_info(&self) -> RuntimeInfo;

    /// Whether the native share capability accepts this particular file.
    fn can_share(&self, file: &ShareFile) -> bool;

    /// Open the native share sheet. Suspends until the user finishes or
    /// dismisses it.
    async fn share(&self, payload: SharePayload) -> Result<(), ShareError>;

    /// Build an in-memory blob.
    fn create_blob(&self, bytes: &[u8], mime_type: &str) -> PlatformResult<Blob>;

    /// Register a temporary URL for a blob.
    fn create_object_url(&self, blob: &Blob) -> PlatformResult<ObjectUrl>;

    /// Save through a hidden anchor with a `download` attribute.
    fn click_download(&self, url: &ObjectUrl, file_name: &str) -> PlatformResult<()>;

    /// Navigate to the object URL directly.
    fn open_url(&self, url: &ObjectUrl) -> PlatformResult<()>;

    /// Release a temporary URL.
    fn revoke_object_url(&self, url: &ObjectUrl);
}
