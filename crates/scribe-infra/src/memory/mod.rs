//! In-memory repository implementations - used as fallback when no
//! database is configured, and as the substrate for concurrency tests.
//! Note: Data is lost on process restart.

mod engagement;
mod repos;

pub use engagement::InMemoryEngagementRepository;
pub use repos::{
    InMemoryCommentRepository, InMemoryNotificationRepository, InMemoryPostRepository,
    InMemoryUserRepository,
};
