//! Best-effort analytics for completed exports.
//!
//! A [`SessionContext`] is created once when the application starts and is
//! passed into the export service explicitly; nothing here reads ambient
//! state.

use crate::client::AsyncCardApi;
use crate::domain::ProfileId;
use crate::metrics::Metrics;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Per-application-session identity used to correlate analytics events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    session_id: Uuid,
}

impl SessionContext {
    /// Start a new session with a random identifier.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
        }
    }

    /// Resume a session with a known identifier.
    pub fn with_id(session_id: Uuid) -> Self {
        Self { session_id }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Payload detail of an analytics event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventData {
    pub download_type: String,
}

/// An analytics event as the backend expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
    pub event_type: String,
    pub event_data: EventData,
    pub session_id: Uuid,
    /// RFC 3339 timestamp
    pub timestamp: String,
}

impl AnalyticsEvent {
    /// The event recorded after every successful vCard delivery.
    pub fn vcard_download(session: &SessionContext) -> Self {
        Self {
            event_type: "download".to_string(),
            event_data: EventData {
                download_type: "vcard".to_string(),
            },
            session_id: session.session_id(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Fire-and-forget sender for analytics events.
#[derive(Clone)]
pub struct AnalyticsNotifier {
    api: Arc<dyn AsyncCardApi>,
    metrics: Metrics,
}

impl AnalyticsNotifier {
    pub fn new(api: Arc<dyn AsyncCardApi>, metrics: Metrics) -> Self {
        Self { api, metrics }
    }

    /// Send the event on a background task.
    ///
    /// The returned handle may be dropped; failures are logged and counted
    /// and never reach the caller.
    pub fn notify(&self, id: ProfileId, event: AnalyticsEvent) -> JoinHandle<()> {
        let api = self.api.clone();
        let metrics = self.metrics.clone();

        tokio::spawn(async move {
            match api.record_event(&id, &event).await {
                Ok(()) => tracing::debug!(profile_id = %id, "Analytics event recorded"),
                Err(e) => {
                    metrics.record_analytics_dropped();
                    tracing::warn!(profile_id = %id, error = %e, "Analytics event dropped");
                }
            }
        })
    }
}
