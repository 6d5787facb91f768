//! In-memory notification queue implementation.
//!
//! Notifications are fire-and-forget: the toggle/comment endpoints enqueue
//! and move on, and a local worker persists the rows off the request path.
//! Note: Jobs are lost on server restart.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

use scribe_core::ports::{
    JobResult, NotificationHandler, NotificationJob, NotificationQueue, QueueError, QueueStats,
};

/// In-memory notification queue configuration.
#[derive(Debug, Clone)]
pub struct NotificationQueueConfig {
    /// Maximum queue size (0 = unlimited).
    pub max_size: usize,
    /// Number of worker tasks.
    pub workers: usize,
}

impl Default for NotificationQueueConfig {
    fn default() -> Self {
        Self {
            max_size: 10000,
            workers: 2,
        }
    }
}

/// In-memory notification queue.
pub struct InMemoryNotificationQueue {
    stats: Arc<JobStats>,
    config: NotificationQueueConfig,
    job_sender: mpsc::Sender<NotificationJob>,
    job_receiver: Arc<Mutex<mpsc::Receiver<NotificationJob>>>,
}

struct JobStats {
    pending: AtomicUsize,
    processing: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl InMemoryNotificationQueue {
    pub fn new(config: NotificationQueueConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.max_size.max(100));

        Self {
            stats: Arc::new(JobStats {
                pending: AtomicUsize::new(0),
                processing: AtomicUsize::new(0),
                completed: AtomicUsize::new(0),
                failed: AtomicUsize::new(0),
            }),
            config,
            job_sender: tx,
            job_receiver: Arc::new(Mutex::new(rx)),
        }
    }

    pub fn from_env() -> Self {
        let config = NotificationQueueConfig {
            max_size: std::env::var("NOTIFY_QUEUE_MAX_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10000),
            workers: std::env::var("NOTIFY_QUEUE_WORKERS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        };
        Self::new(config)
    }
}

#[async_trait]
impl NotificationQueue for InMemoryNotificationQueue {
    async fn enqueue(&self, job: NotificationJob) -> Result<(), QueueError> {
        // Check queue size
        if self.config.max_size > 0 {
            let current_size = self.stats.pending.load(Ordering::Relaxed);
            if current_size >= self.config.max_size {
                return Err(QueueError::QueueFull);
            }
        }

        self.stats.pending.fetch_add(1, Ordering::Relaxed);

        self.job_sender
            .send(job)
            .await
            .map_err(|e| QueueError::EnqueueError(e.to_string()))?;

        tracing::debug!(
            "Notification enqueued. Queue size: {}",
            self.stats.pending.load(Ordering::Relaxed)
        );

        Ok(())
    }

    async fn start_worker(&self, handler: NotificationHandler) -> Result<(), QueueError> {
        let handler = Arc::new(handler);
        let receiver = self.job_receiver.clone();
        let stats = self.stats.clone();
        let sender = self.job_sender.clone();

        for worker_id in 0..self.config.workers {
            let handler = handler.clone();
            let receiver = receiver.clone();
            let stats = stats.clone();
            let sender = sender.clone();

            tokio::spawn(async move {
                tracing::info!("Notification worker {} started", worker_id);

                loop {
                    let job = {
                        let mut rx = receiver.lock().await;
                        rx.recv().await
                    };

                    match job {
                        Some(mut job) => {
                            stats.pending.fetch_sub(1, Ordering::Relaxed);
                            stats.processing.fetch_add(1, Ordering::Relaxed);

                            tracing::debug!(
                                worker = worker_id,
                                job_id = %job.id,
                                kind = job.notification.kind.as_str(),
                                "Processing notification"
                            );

                            job.attempts += 1;
                            let result = handler(job.clone()).await;

                            stats.processing.fetch_sub(1, Ordering::Relaxed);

                            match result {
                                JobResult::Success => {
                                    stats.completed.fetch_add(1, Ordering::Relaxed);
                                    tracing::debug!(job_id = %job.id, "Notification delivered");
                                }
                                JobResult::Retry(reason) => {
                                    if job.attempts < job.max_attempts {
                                        tracing::warn!(
                                            job_id = %job.id,
                                            attempt = job.attempts,
                                            max_attempts = job.max_attempts,
                                            reason = %reason,
                                            "Notification delivery failed, will retry"
                                        );
                                        // Small delay before retry to prevent tight loops
                                        let sender = sender.clone();
                                        let stats = stats.clone();
                                        stats.pending.fetch_add(1, Ordering::Relaxed);
                                        tokio::spawn(async move {
                                            tokio::time::sleep(tokio::time::Duration::from_millis(
                                                100 * job.attempts as u64,
                                            ))
                                            .await;
                                            if let Err(e) = sender.send(job).await {
                                                stats.pending.fetch_sub(1, Ordering::Relaxed);
                                                tracing::error!(
                                                    "Failed to re-enqueue notification: {}",
                                                    e
                                                );
                                            }
                                        });
                                    } else {
                                        stats.failed.fetch_add(1, Ordering::Relaxed);
                                        tracing::error!(
                                            job_id = %job.id,
                                            reason = %reason,
                                            "Notification dropped after max retries"
                                        );
                                    }
                                }
                                JobResult::Failed(reason) => {
                                    stats.failed.fetch_add(1, Ordering::Relaxed);
                                    tracing::error!(
                                        job_id = %job.id,
                                        reason = %reason,
                                        "Notification delivery failed permanently"
                                    );
                                }
                            }
                        }
                        None => {
                            tracing::info!("Notification worker {} shutting down", worker_id);
                            break;
                        }
                    }
                }
            });
        }

        Ok(())
    }

    async fn stats(&self) -> Result<QueueStats, QueueError> {
        Ok(QueueStats {
            pending: self.stats.pending.load(Ordering::Relaxed),
            processing: self.stats.processing.load(Ordering::Relaxed),
            completed: self.stats.completed.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    use super::*;
    use scribe_core::domain::{Notification, NotificationKind};
    use uuid::Uuid;

    fn sample_notification() -> Notification {
        Notification::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            NotificationKind::Like,
            "Someone liked your post".into(),
        )
    }

    #[tokio::test]
    async fn worker_processes_enqueued_jobs() {
        let queue = InMemoryNotificationQueue::new(NotificationQueueConfig {
            max_size: 10,
            workers: 1,
        });

        let delivered = Arc::new(AtomicU32::new(0));
        let counter = delivered.clone();
        queue
            .start_worker(Box::new(move |_job| {
                let counter = counter.clone();
                Box::pin(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    JobResult::Success
                })
            }))
            .await
            .unwrap();

        queue
            .enqueue(NotificationJob::new(sample_notification()))
            .await
            .unwrap();
        queue
            .enqueue(NotificationJob::new(sample_notification()))
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            while delivered.load(Ordering::SeqCst) < 2 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("jobs were not processed in time");

        let stats = queue.stats().await.unwrap();
        assert_eq!(stats.completed, 2);
        assert_eq!(stats.failed, 0);
    }

    #[tokio::test]
    async fn retryable_failure_is_reattempted_up_to_budget() {
        let queue = InMemoryNotificationQueue::new(NotificationQueueConfig {
            max_size: 10,
            workers: 1,
        });

        let attempts = Arc::new(AtomicU32::new(0));
        let counter = attempts.clone();
        queue
            .start_worker(Box::new(move |_job| {
                let counter = counter.clone();
                Box::pin(async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    JobResult::Retry("storage unavailable".into())
                })
            }))
            .await
            .unwrap();

        queue
            .enqueue(NotificationJob::new(sample_notification()).with_max_attempts(3))
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            while attempts.load(Ordering::SeqCst) < 3 {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("job was not retried in time");

        // Give the final bookkeeping a moment, then confirm it stopped at 3.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
        assert_eq!(queue.stats().await.unwrap().failed, 1);
    }
}
