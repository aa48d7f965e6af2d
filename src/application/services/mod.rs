mod image_resolver;
mod notification_queue;

pub use image_resolver::{ImageFallback, ImageFallbackTracker, ImageResolver};
pub use notification_queue::{NotificationHandle, NotificationQueue};
