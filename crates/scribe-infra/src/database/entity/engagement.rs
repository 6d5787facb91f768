//! Engagement edge entity for SeaORM.
//!
//! One row per active like/bookmark. The `(kind, user_id, post_id)` unique
//! index is created by the migration and is what makes concurrent toggles
//! safe; the repository relies on insert conflicts, never on a
//! read-then-write existence check.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::EdgeKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "engagement_edges")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    #[sea_orm(indexed)]
    pub user_id: Uuid,
    #[sea_orm(indexed)]
    pub post_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for scribe_core::domain::EngagementEdge {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            kind: EdgeKind::parse(&model.kind).unwrap_or(EdgeKind::Like),
            user_id: model.user_id,
            post_id: model.post_id,
            created_at: model.created_at.into(),
        }
    }
}

impl From<scribe_core::domain::EngagementEdge> for ActiveModel {
    fn from(edge: scribe_core::domain::EngagementEdge) -> Self {
        Self {
            id: Set(edge.id),
            kind: Set(edge.kind.as_str().to_string()),
            user_id: Set(edge.user_id),
            post_id: Set(edge.post_id),
            created_at: Set(edge.created_at.into()),
        }
    }
}
