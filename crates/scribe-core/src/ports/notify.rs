//! Notification queue port - fire-and-forget delivery of notifications.
//!
//! Toggle and comment endpoints enqueue here; a background worker persists
//! the notification. Enqueue failure must never fail the originating
//! request.

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

use crate::domain::Notification;

/// A queued notification delivery.
#[derive(Debug, Clone)]
pub struct NotificationJob {
    /// Unique job identifier.
    pub id: String,
    /// The notification to persist.
    pub notification: Notification,
    /// Number of delivery attempts so far.
    pub attempts: u32,
    /// Maximum delivery attempts.
    pub max_attempts: u32,
    /// When the job was created.
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl NotificationJob {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            notification,
            attempts: 0,
            max_attempts: 3,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn with_max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }
}

/// Result of processing a notification job.
#[derive(Debug)]
pub enum JobResult {
    /// Delivered successfully.
    Success,
    /// Delivery failed, should be retried.
    Retry(String),
    /// Delivery failed permanently.
    Failed(String),
}

/// Job handler function type.
pub type NotificationHandler =
    Box<dyn Fn(NotificationJob) -> Pin<Box<dyn Future<Output = JobResult> + Send>> + Send + Sync>;

/// Notification queue trait - abstraction over queue backends.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Enqueue a notification for delivery.
    async fn enqueue(&self, job: NotificationJob) -> Result<(), QueueError>;

    /// Start processing jobs with the given handler.
    async fn start_worker(&self, handler: NotificationHandler) -> Result<(), QueueError>;

    /// Get queue statistics.
    async fn stats(&self) -> Result<QueueStats, QueueError>;
}

/// Queue statistics.
#[derive(Debug, Clone, Default)]
pub struct QueueStats {
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Notification queue errors.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Failed to enqueue job: {0}")]
    EnqueueError(String),

    #[error("Queue is full")]
    QueueFull,

    #[error("Backend error: {0}")]
    Backend(String),
}
