use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Bookmark,
    Comment,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Like => "like",
            NotificationKind::Bookmark => "bookmark",
            NotificationKind::Comment => "comment",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(NotificationKind::Like),
            "bookmark" => Some(NotificationKind::Bookmark),
            "comment" => Some(NotificationKind::Comment),
            _ => None,
        }
    }
}

/// Notification entity - tells a post author about an interaction.
///
/// Written by the background notification worker, never on the request path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub post_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        recipient_id: Uuid,
        actor_id: Uuid,
        post_id: Uuid,
        kind: NotificationKind,
        message: String,
    ) -> Self {
        // Message column is capped at 255 in the schema.
        let mut message = message;
        message.truncate(255);

        Self {
            id: Uuid::new_v4(),
            recipient_id,
            actor_id,
            post_id,
            kind,
            message,
            is_read: false,
            created_at: Utc::now(),
        }
    }

    /// Users do not get notified about their own actions.
    pub fn is_self_directed(&self) -> bool {
        self.recipient_id == self.actor_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_capped_at_column_length() {
        let n = Notification::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            NotificationKind::Comment,
            "x".repeat(300),
        );
        assert_eq!(n.message.len(), 255);
    }

    #[test]
    fn self_directed_when_actor_is_recipient() {
        let user = Uuid::new_v4();
        let n = Notification::new(
            user,
            user,
            Uuid::new_v4(),
            NotificationKind::Like,
            "you liked your own post".to_string(),
        );
        assert!(n.is_self_directed());
    }
}
