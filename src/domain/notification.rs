use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// Lifetime of a toast unless configured otherwise.
pub const DEFAULT_NOTIFICATION_DURATION: Duration = Duration::from_millis(3000);

/// Queue-unique notification id, increasing in posting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

impl std::fmt::Display for NotificationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationKind {
    #[default]
    Success,
    Info,
    Error,
}

impl NotificationKind {
    /// Lowercase name used in rendered output.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

/// A toast message that disappears after `duration`.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Id assigned by the queue.
    pub id: NotificationId,
    /// Severity.
    pub kind: NotificationKind,
    /// Text shown to the user.
    pub message: String,
    /// Posting time on the tokio clock, used for expiry.
    pub created_at: Instant,
    /// Wall-clock time shown next to the message.
    pub posted_at: DateTime<Utc>,
    /// Time the notification stays visible.
    pub duration: Duration,
}

impl Notification {
    /// Creates a notification posted now with the default duration.
    #[must_use]
    pub fn new(id: NotificationId, kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
            created_at: Instant::now(),
            posted_at: Utc::now(),
            duration: DEFAULT_NOTIFICATION_DURATION,
        }
    }

    /// Overrides the visible duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Instant at which the notification is removed.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.created_at + self.duration
    }

    /// Returns whether the notification is gone at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}
