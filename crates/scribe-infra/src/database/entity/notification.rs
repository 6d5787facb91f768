//! Notification entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::NotificationKind;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub recipient_id: Uuid,
    pub actor_id: Uuid,
    pub post_id: Uuid,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RecipientId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Recipient,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recipient.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for scribe_core::domain::Notification {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            recipient_id: model.recipient_id,
            actor_id: model.actor_id,
            post_id: model.post_id,
            kind: NotificationKind::parse(&model.kind).unwrap_or(NotificationKind::Like),
            message: model.message,
            is_read: model.is_read,
            created_at: model.created_at.into(),
        }
    }
}

impl From<scribe_core::domain::Notification> for ActiveModel {
    fn from(n: scribe_core::domain::Notification) -> Self {
        Self {
            id: Set(n.id),
            recipient_id: Set(n.recipient_id),
            actor_id: Set(n.actor_id),
            post_id: Set(n.post_id),
            kind: Set(n.kind.as_str().to_string()),
            message: Set(n.message),
            is_read: Set(n.is_read),
            created_at: Set(n.created_at.into()),
        }
    }
}
