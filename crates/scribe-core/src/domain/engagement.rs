use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The two kinds of engagement edge a user can hold against a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Like,
    Bookmark,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Like => "like",
            EdgeKind::Bookmark => "bookmark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(EdgeKind::Like),
            "bookmark" => Some(EdgeKind::Bookmark),
            _ => None,
        }
    }
}

/// Engagement edge - a unique (kind, user, post) relation.
///
/// Presence of the edge means "active"; there is never more than one edge
/// per (kind, user, post). The edge is hard-deleted on toggle-off.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementEdge {
    pub id: Uuid,
    pub kind: EdgeKind,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl EngagementEdge {
    pub fn new(kind: EdgeKind, user_id: Uuid, post_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            user_id,
            post_id,
            created_at: Utc::now(),
        }
    }
}

/// Result of an atomic edge flip: the state after the flip and the total
/// edge count for the post, read inside the same transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub active: bool,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_kind_round_trips_through_str() {
        for kind in [EdgeKind::Like, EdgeKind::Bookmark] {
            assert_eq!(EdgeKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EdgeKind::parse("favorite"), None);
    }
}
