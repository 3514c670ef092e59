//! Notification Emitter
//!
//! Transient messages for the user. A notification expires a fixed delay
//! after it is emitted and cannot be dismissed early; expired entries are
//! pruned whenever the visible set is read.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(1700);

/// One transient message
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Message text
    pub text: String,
    /// Error styling instead of success styling
    pub is_error: bool,
    /// When it was emitted
    pub shown_at: Instant,
}

/// Shared handle to the notification area
#[derive(Clone, Debug)]
pub struct Notifier {
    active: Arc<Mutex<Vec<Notification>>>,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    /// Notifier with the standard lifetime
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(NOTIFICATION_TTL)
    }

    /// Notifier whose messages live for `ttl`
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            active: Arc::new(Mutex::new(Vec::new())),
            ttl,
        }
    }

    /// Lifetime of each message
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Show `message`; never fails
    pub fn notify(&self, message: impl Into<String>, is_error: bool) {
        let text = message.into();
        if is_error {
            tracing::debug!(%text, "error notification");
        }
        self.active.lock().push(Notification {
            text,
            is_error,
            shown_at: Instant::now(),
        });
    }

    /// Messages still on screen, oldest first
    #[must_use]
    pub fn visible(&self) -> Vec<Notification> {
        self.visible_at(Instant::now())
    }

    fn visible_at(&self, now: Instant) -> Vec<Notification> {
        let mut active = self.active.lock();
        active.retain(|n| now.saturating_duration_since(n.shown_at) < self.ttl);
        active.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_is_visible() {
        let notifier = Notifier::new();
        notifier.notify("Echo failed", true);
        notifier.notify("Saved", false);

        let visible = notifier.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].text, "Echo failed");
        assert!(visible[0].is_error);
        assert!(!visible[1].is_error);
    }

    #[test]
    fn test_default_ttl() {
        assert_eq!(Notifier::new().ttl(), Duration::from_millis(1700));
    }

    #[test]
    fn test_expires_after_ttl() {
        let notifier = Notifier::new();
        notifier.notify("Hello failed", true);
        let shown_at = notifier.visible()[0].shown_at;

        assert_eq!(notifier.visible_at(shown_at + Duration::from_millis(1699)).len(), 1);
        assert!(notifier.visible_at(shown_at + NOTIFICATION_TTL).is_empty());
        // pruned for good
        assert!(notifier.visible().is_empty());
    }

    #[test]
    fn test_clones_share_area() {
        let notifier = Notifier::with_ttl(Duration::from_secs(60));
        let other = notifier.clone();
        other.notify("Chat request failed", true);
        assert_eq!(notifier.visible().len(), 1);
    }
}
