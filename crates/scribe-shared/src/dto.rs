//! Data Transfer Objects - request/response types for the API.
//!
//! The toggle/comment/AI response shapes are a compact contract consumed by
//! client-side script; field names and optionality are fixed.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Result of a like/bookmark toggle. `active` and `count` are the server
/// truth after the flip; the client applies them verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleResponse {
    pub active: bool,
    pub count: u64,
}

/// Request to create a comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub body: String,
}

/// Result of creating a comment. `html` is a pre-rendered fragment the
/// client inserts without a page reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreatedResponse {
    pub success: bool,
    pub html: String,
    pub comment_count: u64,
}

/// Result of deleting a comment. `comment_count` is present only on
/// success; a miss is `{success: false}` and a client no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentDeletedResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<u64>,
}

/// A notification row as listed for its recipient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub post_id: String,
    pub kind: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}

/// Request for tag/category suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTagsRequest {
    pub content: String,
}

/// Tag/category suggestions, or a structured failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiTagsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiTagsResponse {
    pub fn ok(category: String, tags: Vec<String>) -> Self {
        Self {
            success: true,
            category: Some(category),
            tags: Some(tags),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            category: None,
            tags: None,
            error: Some(error.into()),
        }
    }
}

/// Request for SEO metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSeoRequest {
    pub title: String,
    pub content: String,
}

/// Generated SEO metadata, or a structured failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSeoResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug_suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiSeoResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            seo_title: None,
            meta_description: None,
            slug_suggestion: None,
            seo_keywords: None,
            error: Some(error.into()),
        }
    }
}

/// Request for a content summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSummaryRequest {
    pub content: String,
}

/// Generated summary, or a structured failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSummaryResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AiSummaryResponse {
    pub fn ok(summary: String) -> Self {
        Self {
            success: true,
            summary: Some(summary),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            summary: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_deleted_miss_omits_count() {
        let body = serde_json::to_value(CommentDeletedResponse {
            success: false,
            comment_count: None,
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"success": false}));
    }

    #[test]
    fn ai_failure_carries_only_error() {
        let body = serde_json::to_value(AiTagsResponse::failure("provider unreachable")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"success": false, "error": "provider unreachable"})
        );
    }

    #[test]
    fn toggle_response_shape() {
        let body = serde_json::to_value(ToggleResponse {
            active: true,
            count: 3,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"active": true, "count": 3}));
    }
}
