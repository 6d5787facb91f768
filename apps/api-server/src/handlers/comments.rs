//! Comment creation and deletion endpoints.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::{Comment, NotificationKind};
use scribe_core::ports::{BaseRepository, CommentRenderer, CommentRepository};
use scribe_shared::dto::{CommentCreatedResponse, CommentDeletedResponse, CreateCommentRequest};

use crate::handlers::toggle::{display_name, notify};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/posts/{post_id}/comments
///
/// Appends a comment and returns a pre-rendered fragment the client
/// inserts without a page reload.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let text = body.into_inner().body.trim().to_string();

    if text.is_empty() {
        return Err(AppError::BadRequest("Comment body is required".to_string()));
    }

    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .filter(|p| p.visible_to(Some(identity.user_id)))
        .ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

    let comment = state
        .comments
        .save(Comment::new(post_id, identity.user_id, text))
        .await?;

    let comment_count = state.comments.count_for_post(post_id).await?;

    let author_name = display_name(&state, &identity).await;
    let html = state
        .renderer
        .render_comment_fragment(&comment, &author_name);

    notify(
        &state,
        &identity,
        &post,
        NotificationKind::Comment,
        "commented on",
    )
    .await;

    Ok(HttpResponse::Ok().json(CommentCreatedResponse {
        success: true,
        html,
        comment_count,
    }))
}

/// POST /api/comments/{comment_id}/delete
///
/// Hard-deletes a comment. Allowed for the comment's author or a
/// moderator. Deleting an id that no longer exists is a no-op the
/// client ignores, not an error page.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment_id = path.into_inner();

    let Some(comment) = state.comments.find_by_id(comment_id).await? else {
        return Ok(HttpResponse::NotFound().json(CommentDeletedResponse {
            success: false,
            comment_count: None,
        }));
    };

    if !comment.deletable_by(identity.user_id, identity.is_moderator()) {
        return Err(AppError::Forbidden);
    }

    // The comment may have been removed between the authorization read
    // and the delete; that race resolves to the same 404 no-op.
    let Some(comment_count) = state.comments.delete_counting(comment_id).await? else {
        return Ok(HttpResponse::NotFound().json(CommentDeletedResponse {
            success: false,
            comment_count: None,
        }));
    };

    tracing::debug!(%comment_id, comment_count, "Comment deleted");

    Ok(HttpResponse::Ok().json(CommentDeletedResponse {
        success: true,
        comment_count: Some(comment_count),
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use scribe_core::domain::Post;

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
    async fn create_returns_fragment_and_count() {
        let state = crate::state::AppState::in_memory_for_tests();
        let author = Uuid::new_v4();
        let post = state
            .posts
            .save(Post::new(author, "T".into(), "t".into(), "c".into()))
            .await
            .unwrap();

        let resp = create(
            web::Data::new(state),
            identity(Uuid::new_v4()),
            web::Path::from(post.id),
            web::Json(CreateCommentRequest {
                body: "Nice post!".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["comment_count"], 1);
        assert!(body["html"].as_str().unwrap().contains("Nice post!"));
    }

    #[actix_web::test]
    async fn empty_comment_body_is_rejected() {
        let state = crate::state::AppState::in_memory_for_tests();

        let result = create(
            web::Data::new(state),
            identity(Uuid::new_v4()),
            web::Path::from(Uuid::new_v4()),
            web::Json(CreateCommentRequest {
                body: "   ".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[actix_web::test]
    async fn forbidden_delete_leaves_comment_intact() {
        let state = crate::state::AppState::in_memory_for_tests();
        let comment = state
            .comments
            .save(Comment::new(Uuid::new_v4(), Uuid::new_v4(), "mine".into()))
            .await
            .unwrap();

        let result = delete(
            web::Data::new(state.clone()),
            identity(Uuid::new_v4()),
            web::Path::from(comment.id),
        )
        .await;

        assert!(matches!(result, Err(AppError::Forbidden)));
        assert!(state.comments.find_by_id(comment.id).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn deleting_missing_comment_is_a_404_noop() {
        let state = crate::state::AppState::in_memory_for_tests();

        let resp = delete(
            web::Data::new(state),
            identity(Uuid::new_v4()),
            web::Path::from(Uuid::new_v4()),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), actix_web::http::StatusCode::NOT_FOUND);
        let body = json_body(resp).await;
        assert_eq!(body, serde_json::json!({"success": false}));
    }

    #[actix_web::test]
    async fn author_delete_returns_remaining_count() {
        let state = crate::state::AppState::in_memory_for_tests();
        let author = Uuid::new_v4();
        let post_id = Uuid::new_v4();
        let comment = state
            .comments
            .save(Comment::new(post_id, author, "going away".into()))
            .await
            .unwrap();
        state
            .comments
            .save(Comment::new(post_id, Uuid::new_v4(), "staying".into()))
            .await
            .unwrap();

        let resp = delete(
            web::Data::new(state),
            identity(author),
            web::Path::from(comment.id),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), actix_web::http::StatusCode::OK);
        let body = json_body(resp).await;
        assert_eq!(body, serde_json::json!({"success": true, "comment_count": 1}));
    }
}
