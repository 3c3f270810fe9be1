//! Delivery strategy selection.
//!
//! Capability detection runs once per export; everything after it is a pure
//! decision over [`Capabilities`].

use super::platform::{Platform, ShareFile};
use serde::Serialize;
use std::fmt;

/// How an encoded card reaches the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStrategy {
    NativeShare,
    DirectDownload,
    ServerFallback,
}

impl DeliveryStrategy {
    /// Strategy to try when this one fails; `None` after the server fallback.
    pub fn fallback(self) -> Option<Self> {
        match self {
            Self::NativeShare => Some(Self::DirectDownload),
            Self::DirectDownload => Some(Self::ServerFallback),
            Self::ServerFallback => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NativeShare => "native_share",
            Self::DirectDownload => "direct_download",
            Self::ServerFallback => "server_fallback",
        }
    }
}

impl fmt::Display for DeliveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the download step hands the object URL over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMethod {
    /// Hidden anchor with a `download` attribute, clicked synthetically.
    AnchorClick,
    /// Open the object URL directly.
    OpenUrl,
}

/// Runtime capabilities detected for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Native file sharing exists and accepts this file's type.
    pub share_file: bool,
    pub anchor_download: bool,
}

impl Capabilities {
    /// Detect what the runtime supports for a specific file.
    ///
    /// `can_share` is only consulted when the runtime has a file-share
    /// capability at all.
    pub fn detect(platform: &dyn Platform, file: &ShareFile) -> Self {
        let info = platform.runtime_info();
        let caps = Self {
            share_file: info.share_files && platform.can_share(file),
            anchor_download: info.anchor_download,
        };
        tracing::debug!(
            device = ?info.device,
            share_files = info.share_files,
            share_file = caps.share_file,
            anchor_download = caps.anchor_download,
            "Capabilities detected"
        );
        caps
    }

    pub fn download_method(&self) -> DownloadMethod {
        if self.anchor_download {
            DownloadMethod::AnchorClick
        } else {
            DownloadMethod::OpenUrl
        }
    }
}

/// First strategy to attempt.
pub fn select_strategy(caps: &Capabilities) -> DeliveryStrategy {
    if caps.share_file {
        DeliveryStrategy::NativeShare
    } else {
        DeliveryStrategy::DirectDownload
    }
}
