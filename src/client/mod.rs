//! HTTP client for the profiles REST backend.
//!
//! The export engine only needs three collaborator calls: the pre-rendered
//! vCard used by the server fallback, profile photos for the full tier, and
//! the analytics event. The client is synchronous (`ureq`) and is used from
//! async contexts through [`AsyncCardApiImpl`], which runs each call on
//! `tokio::task::spawn_blocking`.

mod async_wrapper;
pub use async_wrapper::{AsyncCardApi, AsyncCardApiImpl};

use crate::analytics::AnalyticsEvent;
use crate::config::Config;
use crate::domain::ProfileId;
use crate::error::{CardApiError, CardApiResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::vcard::Photo;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

/// Upper bound on a server-rendered vCard body.
const MAX_VCARD_BYTES: usize = 5 * 1024 * 1024;

/// HTTP client for the profiles REST backend.
#[derive(Clone)]
pub struct CardApiClient {
    /// Base URL for the API
    base_url: String,

    /// Optional bearer token
    api_token: Option<String>,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl CardApiClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();

        Self {
            base_url: config.api_base_url.clone(),
            api_token: config.api_token.clone(),
            agent: Arc::new(agent),
            metrics,
        }
    }

    /// Create a client with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_token: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_token,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.api_token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Execute a timed request, mapping transport and status failures.
    fn send(
        &self,
        request: ureq::Request,
        body: Option<&serde_json::Value>,
    ) -> CardApiResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let method = request.method().to_string();
        let url = request.url().to_string();

        let result = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        }
        .map_err(map_error);

        match &result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
                timer.complete();
            }
            Err(e) => {
                tracing::debug!("{} {} - Error: {:?}", method, url, e);
                timer.complete_with_error();
            }
        }

        result
    }

    /// Download the server-rendered vCard for a profile.
    ///
    /// `GET /api/public/profiles/:id/vcard`
    pub fn fetch_vcard(&self, id: &ProfileId) -> CardApiResult<Vec<u8>> {
        let url = self.build_url(&format!("/api/public/profiles/{}/vcard", id.path_segment()));
        let request = self.authorize(self.agent.get(&url)).set("Accept", "text/vcard");
        let response = self.send(request, None)?;

        let bytes = read_limited(response, MAX_VCARD_BYTES)?;
        if bytes.is_empty() {
            return Err(CardApiError::NotFound(format!("empty vCard for profile {}", id)));
        }
        Ok(bytes)
    }

    /// Download a profile photo from an absolute URL.
    ///
    /// Fails with `PayloadTooLarge` when the image exceeds `max_bytes` and with
    /// `InvalidRequest` when the response is not an `image/*` type.
    pub fn fetch_photo(&self, url: &str, max_bytes: usize) -> CardApiResult<Photo> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CardApiError::InvalidRequest(format!(
                "unsupported photo URL: {}",
                url
            )));
        }

        let response = self.send(self.agent.get(url), None)?;

        let declared = response
            .header("Content-Length")
            .and_then(|len| len.trim().parse::<usize>().ok());
        if declared.is_some_and(|len| len > max_bytes) {
            return Err(CardApiError::PayloadTooLarge { limit: max_bytes });
        }

        let mime_type = response.content_type().trim().to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(CardApiError::InvalidRequest(format!(
                "photo has non-image content type: {}",
                mime_type
            )));
        }

        let bytes = read_limited(response, max_bytes)?;
        Ok(Photo {
            mime_type: Some(mime_type),
            bytes,
        })
    }

    /// Record an analytics event for a profile.
    ///
    /// `POST /api/public/profiles/:id/analytics`
    pub fn record_event(&self, id: &ProfileId, event: &AnalyticsEvent) -> CardApiResult<()> {
        let url = self.build_url(&format!(
            "/api/public/profiles/{}/analytics",
            id.path_segment()
        ));
        let body = serde_json::to_value(event)?;
        let request = self
            .authorize(self.agent.post(&url))
            .set("Content-Type", "application/json");

        self.send(request, Some(&body))?;
        Ok(())
    }
}

/// Read a response body, failing once it grows past `limit` bytes.
fn read_limited(response: ureq::Response, limit: usize) -> CardApiResult<Vec<u8>> {
    let mut bytes = Vec::new();
    response
        .into_reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| {
            if is_timeout(&e) {
                CardApiError::Timeout
            } else {
                CardApiError::HttpError(e.to_string())
            }
        })?;

    if bytes.len() > limit {
        return Err(CardApiError::PayloadTooLarge { limit });
    }
    Ok(bytes)
}

/// Whether an I/O failure is a deadline expiring rather than a broken transfer.
fn is_timeout(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}

/// Map a ureq error to a CardApiError.
fn map_error(error: ureq::Error) -> CardApiError {
    match error {
        ureq::Error::Status(code, response) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "Unknown error".to_string());

            match code {
                401 | 403 => CardApiError::Unauthorized,
                404 => CardApiError::NotFound(message),
                _ => CardApiError::ApiError {
                    status: code,
                    message,
                },
            }
        }
        ureq::Error::Transport(transport) => match transport.kind() {
            ureq::ErrorKind::ConnectionFailed => {
                CardApiError::HttpError("Connection failed".to_string())
            }
            ureq::ErrorKind::Io => {
                let timed_out = std::error::Error::source(&transport)
                    .and_then(|source| source.downcast_ref::<std::io::Error>())
                    .is_some_and(is_timeout);
                if timed_out {
                    CardApiError::Timeout
                } else {
                    CardApiError::HttpError(transport.to_string())
                }
            }
            _ => CardApiError::HttpError(transport.to_string()),
        },
    }
}
