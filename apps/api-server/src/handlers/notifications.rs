//! Notification listing endpoint.

use actix_web::{HttpResponse, web};

use scribe_core::domain::Notification;
use scribe_core::ports::NotificationRepository;
use scribe_shared::dto::NotificationResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

const LIST_LIMIT: u64 = 20;

fn to_response(n: Notification) -> NotificationResponse {
    NotificationResponse {
        id: n.id.to_string(),
        post_id: n.post_id.to_string(),
        kind: n.kind.as_str().to_string(),
        message: n.message,
        is_read: n.is_read,
        created_at: n.created_at.to_rfc3339(),
    }
}

/// GET /api/notifications
///
/// Recent notifications for the authenticated user, newest first.
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let notifications = state
        .notifications
        .list_for_user(identity.user_id, LIST_LIMIT)
        .await?;

    let body: Vec<NotificationResponse> = notifications.into_iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use chrono::TimeDelta;
    use scribe_core::domain::NotificationKind;
    use scribe_core::ports::BaseRepository;
    use uuid::Uuid;

    use super::*;

    fn identity(user_id: Uuid) -> Identity {
        Identity {
            user_id,
            email: "reader@example.com".to_string(),
            roles: vec!["user".to_string()],
        }
    }

    #[actix_web::test]
    async fn lists_only_own_notifications_newest_first() {
        let state = crate::state::AppState::in_memory_for_tests();
        let recipient = Uuid::new_v4();

        let mut older = Notification::new(
            recipient,
            Uuid::new_v4(),
            Uuid::new_v4(),
            NotificationKind::Like,
            "A liked your post".into(),
        );
        older.created_at -= TimeDelta::minutes(5);
        state.notifications.save(older).await.unwrap();

        let newer = state
            .notifications
            .save(Notification::new(
                recipient,
                Uuid::new_v4(),
                Uuid::new_v4(),
                NotificationKind::Comment,
                "B commented on your post".into(),
            ))
            .await
            .unwrap();

        // Someone else's row must not leak into the listing.
        state
            .notifications
            .save(Notification::new(
                Uuid::new_v4(),
                Uuid::new_v4(),
                Uuid::new_v4(),
                NotificationKind::Bookmark,
                "C bookmarked your post".into(),
            ))
            .await
            .unwrap();

        let resp = list(web::Data::new(state), identity(recipient))
            .await
            .unwrap();

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: Vec<NotificationResponse> = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.len(), 2);
        assert_eq!(body[0].id, newer.id.to_string());
        assert_eq!(body[0].kind, "comment");
        assert_eq!(body[1].kind, "like");
    }
}
