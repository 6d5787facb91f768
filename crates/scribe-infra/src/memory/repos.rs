//! In-memory CRUD repositories backed by async RwLock maps.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Comment, Notification, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    BaseRepository, CommentRepository, NotificationRepository, PostRepository, UserRepository,
};

/// In-memory user repository.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        let duplicate = users
            .values()
            .any(|u| u.email == user.email && u.id != user.id);
        if duplicate {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// In-memory post repository.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }
}

/// In-memory comment repository.
pub struct InMemoryCommentRepository {
    comments: RwLock<HashMap<Uuid, Comment>>,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self {
            comments: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryCommentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryCommentRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.comments.read().await.get(&id).cloned())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, RepoError> {
        self.comments
            .write()
            .await
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.comments
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn delete_counting(&self, id: Uuid) -> Result<Option<u64>, RepoError> {
        let mut comments = self.comments.write().await;

        let Some(removed) = comments.remove(&id) else {
            return Ok(None);
        };

        let remaining = comments
            .values()
            .filter(|c| c.post_id == removed.post_id)
            .count() as u64;

        Ok(Some(remaining))
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        Ok(self
            .comments
            .read()
            .await
            .values()
            .filter(|c| c.post_id == post_id)
            .count() as u64)
    }
}

/// In-memory notification repository.
pub struct InMemoryNotificationRepository {
    notifications: RwLock<HashMap<Uuid, Notification>>,
}

impl InMemoryNotificationRepository {
    pub fn new() -> Self {
        Self {
            notifications: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryNotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Notification, Uuid> for InMemoryNotificationRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, RepoError> {
        Ok(self.notifications.read().await.get(&id).cloned())
    }

    async fn save(&self, notification: Notification) -> Result<Notification, RepoError> {
        self.notifications
            .write()
            .await
            .insert(notification.id, notification.clone());
        Ok(notification)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.notifications
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Notification>, RepoError> {
        let notifications = self.notifications.read().await;
        let mut result: Vec<Notification> = notifications
            .values()
            .filter(|n| n.recipient_id == user_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        result.truncate(limit as usize);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::domain::PostStatus;

    #[tokio::test]
    async fn delete_counting_on_missing_comment_is_a_noop() {
        let repo = InMemoryCommentRepository::new();
        let post_id = Uuid::new_v4();

        let kept = repo
            .save(Comment::new(post_id, Uuid::new_v4(), "still here".into()))
            .await
            .unwrap();

        let result = repo.delete_counting(Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());

        // The miss must not disturb any other comment.
        assert!(repo.find_by_id(kept.id).await.unwrap().is_some());
        assert_eq!(repo.count_for_post(post_id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_counting_returns_post_deletion_count() {
        let repo = InMemoryCommentRepository::new();
        let post_id = Uuid::new_v4();

        let first = repo
            .save(Comment::new(post_id, Uuid::new_v4(), "one".into()))
            .await
            .unwrap();
        repo.save(Comment::new(post_id, Uuid::new_v4(), "two".into()))
            .await
            .unwrap();

        let remaining = repo.delete_counting(first.id).await.unwrap();
        assert_eq!(remaining, Some(1));

        // Second delete of the same id is a miss.
        assert!(repo.delete_counting(first.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.save(User::new("a@b.c".into(), "h".into(), "A".into()))
            .await
            .unwrap();

        let err = repo
            .save(User::new("a@b.c".into(), "h".into(), "B".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn post_lookup_by_slug() {
        let repo = InMemoryPostRepository::new();
        let mut post = Post::new(Uuid::new_v4(), "Hello".into(), "hello".into(), "c".into());
        post.status = PostStatus::Published;
        repo.save(post.clone()).await.unwrap();

        let found = repo.find_by_slug("hello").await.unwrap().unwrap();
        assert_eq!(found.id, post.id);
        assert!(repo.find_by_slug("nope").await.unwrap().is_none());
    }
}
