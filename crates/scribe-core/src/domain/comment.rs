use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - free-text comment owned by (author, post).
///
/// Deletion is a hard removal, not a tombstone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            body,
            created_at: Utc::now(),
        }
    }

    /// Whether `actor` may delete this comment. Only the author or a
    /// moderator may; moderator status is decided by the caller from
    /// token claims.
    pub fn deletable_by(&self, actor: Uuid, is_moderator: bool) -> bool {
        is_moderator || self.author_id == actor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_can_delete_own_comment() {
        let author = Uuid::new_v4();
        let comment = Comment::new(Uuid::new_v4(), author, "hi".into());
        assert!(comment.deletable_by(author, false));
    }

    #[test]
    fn stranger_cannot_delete_unless_moderator() {
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "hi".into());
        let stranger = Uuid::new_v4();
        assert!(!comment.deletable_by(stranger, false));
        assert!(comment.deletable_by(stranger, true));
    }
}
