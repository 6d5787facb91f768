use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, EdgeKind, Notification, Post, ToggleOutcome, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find a post by its URL slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;
}

/// Engagement edge repository.
///
/// Edges are never CRUD'd individually; the only mutation is the atomic
/// flip. The (kind, user, post) uniqueness invariant must be enforced by
/// the storage layer itself, not by a read-then-write check.
#[async_trait]
pub trait EngagementRepository: Send + Sync {
    /// Atomically flip the edge for (kind, user, post) and return the
    /// resulting state together with the post's edge count, both observed
    /// within the transaction that performed the flip.
    async fn toggle(
        &self,
        kind: EdgeKind,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<ToggleOutcome, RepoError>;

    /// Current edge count for a post.
    async fn count(&self, kind: EdgeKind, post_id: Uuid) -> Result<u64, RepoError>;

    /// Whether the edge is currently active.
    async fn is_active(
        &self,
        kind: EdgeKind,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<bool, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Hard-delete a comment and return the remaining comment count of its
    /// post, computed after the deletion in the same transaction.
    /// Returns `None` when the comment no longer exists.
    async fn delete_counting(&self, id: Uuid) -> Result<Option<u64>, RepoError>;

    /// Active comment count for a post.
    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

/// Notification repository - written by the background worker.
#[async_trait]
pub trait NotificationRepository: BaseRepository<Notification, Uuid> {
    /// Recent notifications for a user, newest first.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Notification>, RepoError>;
}
