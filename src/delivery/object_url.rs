//! Scoped ownership of temporary object URLs.

use super::platform::{ObjectUrl, Platform};
use std::sync::Arc;
use std::time::Duration;

/// Holds an object URL and revokes it when dropped.
///
/// Revocation is delayed so the runtime can finish reading the blob. Without a
/// tokio runtime to wait on the URL is revoked immediately, and a runtime that
/// shuts down during the delay revokes it as the pending task is dropped.
pub struct ObjectUrlLease {
    platform: Arc<dyn Platform>,
    url: ObjectUrl,
    delay: Duration,
}

impl ObjectUrlLease {
    pub fn new(platform: Arc<dyn Platform>, url: ObjectUrl, delay: Duration) -> Self {
        Self {
            platform,
            url,
            delay,
        }
    }

    pub fn url(&self) -> &ObjectUrl {
        &self.url
    }
}

/// Revokes its URL when dropped.
///
/// Moved into the delayed task so the URL is still released if the runtime
/// drops the task before the delay elapses.
struct Revocation {
    platform: Arc<dyn Platform>,
    url: ObjectUrl,
}

impl Drop for Revocation {
    fn drop(&mut self) {
        self.platform.revoke_object_url(&self.url);
        tracing::trace!(url = %self.url, "Object URL revoked");
    }
}

impl Drop for ObjectUrlLease {
    fn drop(&mut self) {
        let revocation = Revocation {
            platform: self.platform.clone(),
            url: self.url.clone(),
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) if !self.delay.is_zero() => {
                let delay = self.delay;
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    drop(revocation);
                });
            }
            _ => drop(revocation),
        }
    }
}
