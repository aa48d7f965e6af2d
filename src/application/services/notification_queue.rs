use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;
use tracing::debug;

use crate::domain::notification::DEFAULT_NOTIFICATION_DURATION;
use crate::domain::{Notification, NotificationId, NotificationKind};

/// Toast queue whose entries expire on their own.
///
/// Each posted notification gets a one-shot reaper task that removes it by
/// id once its lifetime elapses. Snapshots also hide entries whose deadline
/// has passed, so visibility never depends on when the reaper gets polled.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    inner: Arc<QueueInner>,
}

#[derive(Debug)]
struct QueueInner {
    entries: Mutex<Vec<Notification>>,
    reapers: Mutex<HashMap<NotificationId, AbortHandle>>,
    next_id: AtomicU64,
    duration: Duration,
}

impl QueueInner {
    fn remove(&self, id: NotificationId) -> bool {
        self.reapers.lock().remove(&id);
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }
}

/// Handle to the scheduled removal of one notification.
#[derive(Debug)]
pub struct NotificationHandle {
    id: NotificationId,
    reaper: Option<AbortHandle>,
}

impl NotificationHandle {
    /// Id of the posted notification.
    #[must_use]
    pub const fn id(&self) -> NotificationId {
        self.id
    }

    /// Cancels the scheduled removal. The entry still stops showing in
    /// snapshots once expired.
    pub fn cancel(&self) {
        if let Some(reaper) = &self.reaper {
            reaper.abort();
        }
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DURATION)
    }
}

impl NotificationQueue {
    /// Creates an empty queue whose entries live for `duration`.
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            inner: Arc::new(QueueInner {
                entries: Mutex::new(Vec::new()),
                reapers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
                duration,
            }),
        }
    }

    /// Appends a notification and schedules its removal.
    pub fn post(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationHandle {
        let id = NotificationId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let notification = Notification::new(id, kind, message).with_duration(self.inner.duration);
        let deadline = notification.expires_at();

        debug!(id = %id, kind = kind.label(), message = %notification.message, "Notification posted");
        self.inner.entries.lock().push(notification);

        let reaper = tokio::runtime::Handle::try_current().ok().map(|runtime| {
            let weak: Weak<QueueInner> = Arc::downgrade(&self.inner);
            runtime
                .spawn(async move {
                    tokio::time::sleep_until(deadline).await;
                    if let Some(inner) = weak.upgrade() {
                        inner.remove(id);
                    }
                })
                .abort_handle()
        });

        if let Some(reaper) = &reaper {
            self.inner.reapers.lock().insert(id, reaper.clone());
        }

        NotificationHandle { id, reaper }
    }

    /// Posts a success notification.
    pub fn success(&self, message: impl Into<String>) -> NotificationHandle {
        self.post(message, NotificationKind::Success)
    }

    /// Posts an info notification.
    pub fn info(&self, message: impl Into<String>) -> NotificationHandle {
        self.post(message, NotificationKind::Info)
    }

    /// Posts an error notification.
    pub fn error(&self, message: impl Into<String>) -> NotificationHandle {
        self.post(message, NotificationKind::Error)
    }

    /// Removes a notification immediately and cancels its timer.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        if let Some(reaper) = self.inner.reapers.lock().get(&id) {
            reaper.abort();
        }
        self.inner.remove(id)
    }

    /// Drops every notification and pending timer.
    pub fn clear(&self) {
        for (_, reaper) in self.inner.reapers.lock().drain() {
            reaper.abort();
        }
        self.inner.entries.lock().clear();
    }

    /// Notifications that have not yet expired, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<Notification> {
        let now = tokio::time::Instant::now();
        self.inner
            .entries
            .lock()
            .iter()
            .filter(|n| !n.is_expired_at(now))
            .cloned()
            .collect()
    }

    /// Number of stored entries, including expired ones not yet reaped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.entries.lock().len()
    }

    /// Returns whether no notification is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{advance, sleep};

    fn messages(queue: &NotificationQueue) -> Vec<String> {
        queue.active().into_iter().map(|n| n.message).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_for_exactly_three_seconds() {
        let queue = NotificationQueue::default();
        queue.success("Added to favorites");

        advance(Duration::from_millis(2999)).await;
        assert_eq!(messages(&queue), vec!["Added to favorites"]);

        advance(Duration::from_millis(1)).await;
        assert!(queue.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_are_independent() {
        let queue = NotificationQueue::default();
        queue.success("first");

        advance(Duration::from_millis(2000)).await;
        queue.error("second");

        advance(Duration::from_millis(1000)).await;
        assert_eq!(messages(&queue), vec!["second"]);

        advance(Duration::from_millis(1999)).await;
        assert_eq!(messages(&queue), vec!["second"]);

        advance(Duration::from_millis(1)).await;
        assert!(queue.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reaper_removes_entry() {
        let queue = NotificationQueue::default();
        queue.info("You have been logged out.");
        assert_eq!(queue.len(), 1);

        sleep(Duration::from_millis(3001)).await;

        assert!(queue.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_timer_keeps_entry_but_hides_it() {
        let queue = NotificationQueue::default();
        let handle = queue.success("kept");
        handle.cancel();

        sleep(Duration::from_millis(3001)).await;

        assert_eq!(queue.len(), 1);
        assert!(queue.active().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_removes_immediately() {
        let queue = NotificationQueue::default();
        let first = queue.success("one");
        queue.success("two");

        assert!(queue.dismiss(first.id()));
        assert!(!queue.dismiss(first.id()));
        assert_eq!(messages(&queue), vec!["two"]);
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_increasing() {
        let queue = NotificationQueue::default();
        let a = queue.success("a").id();
        let b = queue.success("b").id();
        let c = queue.error("c").id();

        assert!(a < b && b < c);
    }

    #[test]
    fn test_post_outside_runtime_still_expires_by_time() {
        let queue = NotificationQueue::new(Duration::ZERO);
        let handle = queue.success("no runtime");

        handle.cancel();
        assert_eq!(queue.len(), 1);
        assert!(queue.active().is_empty());

        queue.clear();
        assert!(queue.is_empty());
    }
}
