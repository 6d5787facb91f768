//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`.
//! This crate contains database, queue, and external service integrations.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `ai` - Upstream AI provider client via reqwest

pub mod database;
pub mod jobs;
pub mod memory;
pub mod render;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "ai")]
pub mod ai;

// Re-exports - In-Memory
pub use jobs::InMemoryNotificationQueue;
pub use memory::{
    InMemoryCommentRepository, InMemoryEngagementRepository, InMemoryNotificationRepository,
    InMemoryPostRepository, InMemoryUserRepository,
};
pub use render::HtmlCommentRenderer;

pub use database::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCommentRepository, PostgresEngagementRepository, PostgresNotificationRepository,
    PostgresPostRepository, PostgresUserRepository,
};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtTokenService};

#[cfg(feature = "ai")]
pub use ai::{OpenAiProvider, OpenAiProviderConfig, call_with_retry};
