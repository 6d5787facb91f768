//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, TryInsertResult,
};
use uuid::Uuid;

use scribe_core::domain::{EdgeKind, EngagementEdge, Notification, Post, ToggleOutcome, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    CommentRepository, EngagementRepository, NotificationRepository, PostRepository,
    UserRepository,
};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::engagement::{self, Entity as EngagementEntity};
use super::entity::notification::{self, Entity as NotificationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

fn query_err(e: sea_orm::DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL notification repository.
pub type PostgresNotificationRepository = PostgresBaseRepository<NotificationEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        // Mask email for logging to avoid PII in logs
        let masked = if let Some(at_pos) = email.find('@') {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = if local.len() > 1 {
                format!("{}***", &local[..1])
            } else {
                "***".to_string()
            };
            format!("{}{}", masked_local, domain)
        } else {
            "***".to_string()
        };
        tracing::debug!(user_email = %masked, "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn delete_counting(&self, id: Uuid) -> Result<Option<u64>, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let Some(model) = CommentEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(query_err)?
        else {
            // Already gone: a no-op, not an error.
            txn.commit().await.map_err(query_err)?;
            return Ok(None);
        };

        let post_id = model.post_id;

        CommentEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(query_err)?;

        let remaining = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&txn)
            .await
            .map_err(query_err)?;

        txn.commit().await.map_err(query_err)?;

        Ok(Some(remaining))
    }

    async fn count_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }
}

#[async_trait]
impl NotificationRepository for PostgresNotificationRepository {
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Notification>, RepoError> {
        let result = NotificationEntity::find()
            .filter(notification::Column::RecipientId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL engagement repository.
///
/// The flip is a single transaction: insert with `ON CONFLICT DO NOTHING`
/// on the `(kind, user_id, post_id)` unique index; a conflict means the
/// edge already existed, so the flip becomes a delete. The count is read
/// inside the same transaction so it always reflects the caller's own
/// just-applied change.
pub struct PostgresEngagementRepository {
    db: DbConn,
}

impl PostgresEngagementRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn toggle(
        &self,
        kind: EdgeKind,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<ToggleOutcome, RepoError> {
        let txn = self.db.begin().await.map_err(query_err)?;

        let edge = EngagementEdge::new(kind, user_id, post_id);
        let insert = EngagementEntity::insert(engagement::ActiveModel::from(edge))
            .on_conflict(
                OnConflict::columns([
                    engagement::Column::Kind,
                    engagement::Column::UserId,
                    engagement::Column::PostId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(&txn)
            .await
            .map_err(query_err)?;

        let active = match insert {
            TryInsertResult::Inserted(_) => true,
            _ => {
                // Edge already present: this toggle is a removal.
                EngagementEntity::delete_many()
                    .filter(engagement::Column::Kind.eq(kind.as_str()))
                    .filter(engagement::Column::UserId.eq(user_id))
                    .filter(engagement::Column::PostId.eq(post_id))
                    .exec(&txn)
                    .await
                    .map_err(query_err)?;
                false
            }
        };

        let count = EngagementEntity::find()
            .filter(engagement::Column::Kind.eq(kind.as_str()))
            .filter(engagement::Column::PostId.eq(post_id))
            .count(&txn)
            .await
            .map_err(query_err)?;

        txn.commit().await.map_err(query_err)?;

        tracing::debug!(
            kind = kind.as_str(),
            %post_id,
            active,
            count,
            "Engagement edge toggled"
        );

        Ok(ToggleOutcome { active, count })
    }

    async fn count(&self, kind: EdgeKind, post_id: Uuid) -> Result<u64, RepoError> {
        EngagementEntity::find()
            .filter(engagement::Column::Kind.eq(kind.as_str()))
            .filter(engagement::Column::PostId.eq(post_id))
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn is_active(
        &self,
        kind: EdgeKind,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<bool, RepoError> {
        let found = EngagementEntity::find()
            .filter(engagement::Column::Kind.eq(kind.as_str()))
            .filter(engagement::Column::UserId.eq(user_id))
            .filter(engagement::Column::PostId.eq(post_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(found.is_some())
    }
}
