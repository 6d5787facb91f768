//! Notification queue implementations.

mod memory;

pub use memory::{InMemoryNotificationQueue, NotificationQueueConfig};
