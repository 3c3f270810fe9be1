//! Transient "contact saved" acknowledgment.
//!
//! The indicator turns on when an export succeeds and switches itself off
//! after [`ACK_DURATION`]; nothing has to clear it.

use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::Instant;

/// How long the acknowledgment stays visible.
pub const ACK_DURATION: Duration = Duration::from_secs(3);

/// Shared, cheaply cloneable acknowledgment state for one view.
#[derive(Debug, Clone)]
pub struct SavedIndicator {
    shown_at: Arc<RwLock<Option<Instant>>>,
    ttl: Duration,
}

impl Default for SavedIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl SavedIndicator {
    pub fn new() -> Self {
        Self::with_duration(ACK_DURATION)
    }

    pub fn with_duration(ttl: Duration) -> Self {
        Self {
            shown_at: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Show the acknowledgment, restarting the timer if already visible.
    pub fn acknowledge(&self) {
        if let Ok(mut shown_at) = self.shown_at.write() {
            *shown_at = Some(Instant::now());
        }
    }

    /// Whether the acknowledgment is currently visible.
    pub fn is_visible(&self) -> bool {
        self.remaining().is_some()
    }

    /// Time left before the acknowledgment clears.
    pub fn remaining(&self) -> Option<Duration> {
        let shown_at = (*self.shown_at.read().ok()?)?;
        self.ttl.checked_sub(shown_at.elapsed()).filter(|left| !left.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_hidden_until_acknowledged() {
        let indicator = SavedIndicator::new();
        assert!(!indicator.is_visible());

        indicator.acknowledge();
        assert!(indicator.is_visible());
        assert_eq!(indicator.remaining(), Some(ACK_DURATION));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clears_after_three_seconds() {
        let indicator = SavedIndicator::new();
        indicator.acknowledge();

        tokio::time::advance(Duration::from_millis(2_999)).await;
        assert!(indicator.is_visible());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(!indicator.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reacknowledge_restarts_timer() {
        let indicator = SavedIndicator::new();
        indicator.acknowledge();
        tokio::time::advance(Duration::from_secs(2)).await;

        let clone = indicator.clone();
        clone.acknowledge();
        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(indicator.is_visible());
    }
}
