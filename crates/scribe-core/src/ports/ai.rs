//! Upstream AI provider port.
//!
//! The metadata endpoints are pure pass-through: they forward title/content
//! to an external generation service and translate the response into fixed
//! shapes. Nothing is persisted. The error split below is what drives the
//! retry rule: only transient transport failures get a retry, provider-
//! reported errors and malformed bodies never do.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Suggested category and tags for a draft post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomySuggestion {
    pub category: String,
    pub tags: Vec<String>,
}

/// Suggested SEO metadata for a draft post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeoSuggestion {
    pub seo_title: String,
    pub meta_description: String,
    pub slug_suggestion: String,
    pub seo_keywords: Vec<String>,
}

/// Upstream provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request timed out")]
    Timeout,

    #[error("provider unreachable: {0}")]
    Unreachable(String),

    #[error("provider not configured")]
    NotConfigured,

    #[error("provider rejected credentials")]
    Unauthorized,

    #[error("provider error: {0}")]
    Reported(String),

    #[error("malformed provider response")]
    Malformed,
}

impl ProviderError {
    /// Transient transport failures are the only retryable class.
    pub fn is_transient(&self) -> bool {
        matches!(self, ProviderError::Timeout | ProviderError::Unreachable(_))
    }
}

/// External content-generation service.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Suggest a category and tags for the given content.
    async fn suggest_taxonomy(&self, content: &str) -> Result<TaxonomySuggestion, ProviderError>;

    /// Generate SEO metadata for the given title and content.
    async fn generate_seo(
        &self,
        title: &str,
        content: &str,
    ) -> Result<SeoSuggestion, ProviderError>;

    /// Generate a short summary of the given content.
    async fn summarize(&self, content: &str) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_failures_are_transient() {
        assert!(ProviderError::Timeout.is_transient());
        assert!(ProviderError::Unreachable("refused".into()).is_transient());
        assert!(!ProviderError::Unauthorized.is_transient());
        assert!(!ProviderError::Reported("quota".into()).is_transient());
        assert!(!ProviderError::Malformed.is_transient());
        assert!(!ProviderError::NotConfigured.is_transient());
    }
}
