//! In-memory engagement edge store.

use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{EdgeKind, ToggleOutcome};
use scribe_core::error::RepoError;
use scribe_core::ports::EngagementRepository;

/// In-memory engagement repository.
///
/// The write lock held across the flip-and-count is this backend's
/// equivalent of the Postgres transaction: concurrent toggles for the
/// same key serialize on it, so the (kind, user, post) uniqueness
/// invariant holds and the returned count always includes the caller's
/// own flip.
pub struct InMemoryEngagementRepository {
    edges: RwLock<HashSet<(EdgeKind, Uuid, Uuid)>>,
}

impl InMemoryEngagementRepository {
    pub fn new() -> Self {
        Self {
            edges: RwLock::new(HashSet::new()),
        }
    }
}

impl Default for InMemoryEngagementRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EngagementRepository for InMemoryEngagementRepository {
    async fn toggle(
        &self,
        kind: EdgeKind,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<ToggleOutcome, RepoError> {
        let mut edges = self.edges.write().await;

        let key = (kind, user_id, post_id);
        let active = if edges.remove(&key) {
            false
        } else {
            edges.insert(key);
            true
        };

        let count = edges
            .iter()
            .filter(|(k, _, p)| *k == kind && *p == post_id)
            .count() as u64;

        Ok(ToggleOutcome { active, count })
    }

    async fn count(&self, kind: EdgeKind, post_id: Uuid) -> Result<u64, RepoError> {
        let edges = self.edges.read().await;
        Ok(edges
            .iter()
            .filter(|(k, _, p)| *k == kind && *p == post_id)
            .count() as u64)
    }

    async fn is_active(
        &self,
        kind: EdgeKind,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<bool, RepoError> {
        let edges = self.edges.read().await;
        Ok(edges.contains(&(kind, user_id, post_id)))
    }
}
