//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod ai;
mod auth;
mod notify;
mod render;
mod repository;

pub use ai::{AiProvider, ProviderError, SeoSuggestion, TaxonomySuggestion};
pub use auth::{AuthError, PasswordService, ROLE_MODERATOR, TokenClaims, TokenService};
pub use notify::{
    JobResult, NotificationHandler, NotificationJob, NotificationQueue, QueueError, QueueStats,
};
pub use render::CommentRenderer;
pub use repository::{
    BaseRepository, CommentRepository, EngagementRepository, NotificationRepository,
    PostRepository, UserRepository,
};
