//! AI metadata pass-through endpoints.
//!
//! These forward draft title/content to the configured provider and
//! translate the result into fixed response shapes. Provider failures
//! come back as `{success: false, error}` bodies, never as HTML error
//! pages, because the caller is editor-side script.

use actix_web::{HttpResponse, http::StatusCode, web};

use scribe_core::ports::{AiProvider, ProviderError};
use scribe_infra::ai::call_with_retry;
use scribe_shared::dto::{
    AiSeoRequest, AiSeoResponse, AiSummaryRequest, AiSummaryResponse, AiTagsRequest,
    AiTagsResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// HTTP status for a provider failure. Credential problems are the
/// caller's to fix; everything else is a bad upstream.
fn failure_status(err: &ProviderError) -> StatusCode {
    match err {
        ProviderError::NotConfigured | ProviderError::Unauthorized => StatusCode::UNAUTHORIZED,
        ProviderError::Timeout
        | ProviderError::Unreachable(_)
        | ProviderError::Reported(_)
        | ProviderError::Malformed => StatusCode::BAD_GATEWAY,
    }
}

/// POST /api/ai/tags
pub async fn tags(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<AiTagsRequest>,
) -> AppResult<HttpResponse> {
    let content = body.into_inner().content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }

    match call_with_retry(|| state.ai.suggest_taxonomy(&content)).await {
        Ok(suggestion) => {
            Ok(HttpResponse::Ok().json(AiTagsResponse::ok(suggestion.category, suggestion.tags)))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Tag suggestion failed");
            Ok(HttpResponse::build(failure_status(&e)).json(AiTagsResponse::failure(e.to_string())))
        }
    }
}

/// POST /api/ai/seo
pub async fn seo(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<AiSeoRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let title = req.title.trim().to_string();
    let content = req.content.trim().to_string();
    if title.is_empty() || content.is_empty() {
        return Err(AppError::BadRequest(
            "Title and content are required".to_string(),
        ));
    }

    match call_with_retry(|| state.ai.generate_seo(&title, &content)).await {
        Ok(seo) => Ok(HttpResponse::Ok().json(AiSeoResponse {
            success: true,
            seo_title: Some(seo.seo_title),
            meta_description: Some(seo.meta_description),
            slug_suggestion: Some(seo.slug_suggestion),
            seo_keywords: Some(seo.seo_keywords),
            error: None,
        })),
        Err(e) => {
            tracing::warn!(error = %e, "SEO generation failed");
            Ok(HttpResponse::build(failure_status(&e)).json(AiSeoResponse::failure(e.to_string())))
        }
    }
}

/// POST /api/ai/summary
pub async fn summary(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<AiSummaryRequest>,
) -> AppResult<HttpResponse> {
    let content = body.into_inner().content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::BadRequest("Content is required".to_string()));
    }

    match call_with_retry(|| state.ai.summarize(&content)).await {
        Ok(summary) => Ok(HttpResponse::Ok().json(AiSummaryResponse::ok(summary))),
        Err(e) => {
            tracing::warn!(error = %e, "Summary generation failed");
            Ok(HttpResponse::build(failure_status(&e))
                .json(AiSummaryResponse::failure(e.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;

    use super::*;

    fn identity() -> Identity {
        Identity {
            user_id: uuid::Uuid::new_v4(),
            email: "writer@example.com".to_string(),
            roles: vec!["user".to_string()],
        }
    }

    #[actix_web::test]
    async fn empty_content_is_rejected_before_any_upstream_call() {
        let state = crate::state::AppState::in_memory_for_tests();

        let result = tags(
            web::Data::new(state),
            identity(),
            web::Json(AiTagsRequest {
                content: "  ".to_string(),
            }),
        )
        .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[actix_web::test]
    async fn unconfigured_provider_answers_structured_401_failure() {
        let state = crate::state::AppState::in_memory_for_tests();

        let resp = summary(
            web::Data::new(state),
            identity(),
            web::Json(AiSummaryRequest {
                content: "A post about Rust.".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("not configured"));
    }
}
