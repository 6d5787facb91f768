//! Toggle-action endpoints for like/bookmark engagement edges.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::{EdgeKind, Notification, NotificationKind, Post};
use scribe_core::ports::{BaseRepository, EngagementRepository, NotificationJob, NotificationQueue};
use scribe_shared::dto::ToggleResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/toggle/{kind}/{post_id}
///
/// Atomically flips the (kind, user, post) engagement edge and returns
/// the resulting state with the post's edge count. The count is read
/// inside the same storage transaction as the flip, so it always
/// reflects the caller's own change.
pub async fn toggle(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, Uuid)>,
) -> AppResult<HttpResponse> {
    let (kind_raw, post_id) = path.into_inner();

    let kind = EdgeKind::parse(&kind_raw)
        .ok_or_else(|| AppError::NotFound(format!("Unknown toggle kind '{}'", kind_raw)))?;

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .filter(|p| p.visible_to(Some(identity.user_id)))
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let outcome = state
        .engagements
        .toggle(kind, identity.user_id, post_id)
        .await?;

    // Notify the post author on edge creation only, fire-and-forget.
    if outcome.active {
        let notif_kind = match kind {
            EdgeKind::Like => NotificationKind::Like,
            EdgeKind::Bookmark => NotificationKind::Bookmark,
        };
        let verb = match kind {
            EdgeKind::Like => "liked",
            EdgeKind::Bookmark => "bookmarked",
        };
        notify(&state, &identity, &post, notif_kind, verb).await;
    }

    Ok(HttpResponse::Ok().json(ToggleResponse {
        active: outcome.active,
        count: outcome.count,
    }))
}

/// Enqueue an interaction notification for the post author.
///
/// Self-directed notifications are skipped; enqueue failures are logged
/// and never surface to the caller.
pub(super) async fn notify(
    state: &AppState,
    actor: &Identity,
    post: &Post,
    kind: NotificationKind,
    verb: &str,
) {
    if post.author_id == actor.user_id {
        return;
    }

    let actor_name = display_name(state, actor).await;
    let notification = Notification::new(
        post.author_id,
        actor.user_id,
        post.id,
        kind,
        format!("{} {} your post", actor_name, verb),
    );

    if let Err(e) = state
        .notify_queue
        .enqueue(NotificationJob::new(notification))
        .await
    {
        tracing::warn!(
            kind = kind.as_str(),
            post_id = %post.id,
            "Failed to enqueue notification: {}",
            e
        );
    }
}

/// Display name for the acting user; the token email is the fallback
/// when the account row is missing or unreadable.
pub(super) async fn display_name(state: &AppState, identity: &Identity) -> String {
    match state.users.find_by_id(identity.user_id).await {
        Ok(Some(user)) => user.display_name,
        _ => identity.email.clone(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use scribe_core::domain::PostStatus;

    use super::*;

    fn identity(user_id: Uuid) -> Identity {
        Identity {
            user_id,
            email: "reader@example.com".to_string(),
            roles: vec!["user".to_string()],
        }
    }

    async fn json_body(resp: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn pair_of_toggles_round_trips_through_the_endpoint() {
        let state = crate::state::AppState::in_memory_for_tests();
        let post = state
            .posts
            .save(Post::new(Uuid::new_v4(), "T".into(), "t".into(), "c".into()))
            .await
            .unwrap();
        let user = Uuid::new_v4();

        let first = toggle(
            web::Data::new(state.clone()),
            identity(user),
            web::Path::from(("like".to_string(), post.id)),
        )
        .await
        .unwrap();
        assert_eq!(
            json_body(first).await,
            serde_json::json!({"active": true, "count": 1})
        );

        let second = toggle(
            web::Data::new(state),
            identity(user),
            web::Path::from(("like".to_string(), post.id)),
        )
        .await
        .unwrap();
        assert_eq!(
            json_body(second).await,
            serde_json::json!({"active": false, "count": 0})
        );
    }

    #[actix_web::test]
    async fn unknown_kind_is_a_404() {
        let state = crate::state::AppState::in_memory_for_tests();

        let result = toggle(
            web::Data::new(state),
            identity(Uuid::new_v4()),
            web::Path::from(("favorite".to_string(), Uuid::new_v4())),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn draft_post_is_invisible_to_other_users() {
        let state = crate::state::AppState::in_memory_for_tests();
        let mut post = Post::new(Uuid::new_v4(), "T".into(), "t".into(), "c".into());
        post.status = PostStatus::Draft;
        let post = state.posts.save(post).await.unwrap();

        let result = toggle(
            web::Data::new(state),
            identity(Uuid::new_v4()),
            web::Path::from(("bookmark".to_string(), post.id)),
        )
        .await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
