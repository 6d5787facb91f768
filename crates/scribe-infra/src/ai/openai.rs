//! OpenAI-style chat-completions client.
//!
//! The provider is pure pass-through: content goes up, a fixed-shape
//! suggestion comes back, nothing is persisted here. Every request carries
//! a hard timeout so a stalled upstream can never hold a request open.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use scribe_core::ports::{AiProvider, ProviderError, SeoSuggestion, TaxonomySuggestion};

const MAX_CONTENT_CHARS: usize = 3000;

/// Upstream provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    /// API key; `None` leaves the provider disabled and every call
    /// answers `NotConfigured`.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OpenAiProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

impl OpenAiProviderConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("AI_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("AI_MODEL").unwrap_or(defaults.model),
            timeout: std::env::var("AI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// Chat-completions response, reduced to the fields we read.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyPayload {
    category: String,
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SeoPayload {
    seo_title: String,
    meta_description: String,
    slug_suggestion: String,
    seo_keywords: Vec<String>,
}

/// OpenAI-backed provider.
pub struct OpenAiProvider {
    client: reqwest::Client,
    config: OpenAiProviderConfig,
}

impl OpenAiProvider {
    pub fn new(config: OpenAiProviderConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    pub fn from_env() -> Self {
        Self::new(OpenAiProviderConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn map_transport_error(e: reqwest::Error) -> ProviderError {
        if e.is_timeout() {
            ProviderError::Timeout
        } else {
            ProviderError::Unreachable(e.to_string())
        }
    }

    /// Issue one chat-completions request and return the assistant text.
    async fn chat(
        &self,
        system: &str,
        prompt: &str,
        max_tokens: u32,
        force_json: bool,
    ) -> Result<String, ProviderError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(ProviderError::NotConfigured);
        };

        let mut body = json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
            "max_tokens": max_tokens,
            "temperature": 0.7,
        });
        if force_json {
            body["response_format"] = json!({"type": "json_object"});
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized);
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Provider returned an error");
            return Err(ProviderError::Reported(format!("{status}: {detail}")));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::Malformed)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .map(|content| content.trim().to_string())
            .ok_or(ProviderError::Malformed)
    }
}

fn truncated(content: &str) -> &str {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

/// Parse a JSON payload the model was asked to emit. A body that fails to
/// parse or misses fields is a malformed response, never a partial success.
fn parse_payload<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, ProviderError> {
    // Models occasionally wrap JSON in a markdown fence despite the
    // forced-JSON response format.
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    serde_json::from_str(trimmed).map_err(|_| ProviderError::Malformed)
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    async fn suggest_taxonomy(&self, content: &str) -> Result<TaxonomySuggestion, ProviderError> {
        let prompt = format!(
            "Analyze this blog post content and return a JSON object with exactly this \
             structure:\n\n{{\n    \"category\": \"exact category name here\",\n    \
             \"tags\": [\"tag1\", \"tag2\", \"tag3\", \"tag4\", \"tag5\"]\n}}\n\n\
             REQUIREMENTS:\n\
             - category: ONE specific category (examples: \"Technology\", \"Health & Wellness\", \
             \"Business\", \"Lifestyle\", \"Education\")\n\
             - tags: EXACTLY 5 tags as an array of strings (each tag 1-2 words max)\n\n\
             BLOG POST CONTENT:\n{}\n\n\
             Return only the JSON object.",
            truncated(content)
        );

        let text = self
            .chat(
                "You are a content classification expert. Always return valid JSON only.",
                &prompt,
                200,
                true,
            )
            .await?;

        let payload: TaxonomyPayload = parse_payload(&text)?;
        if payload.category.trim().is_empty() || payload.tags.is_empty() {
            return Err(ProviderError::Malformed);
        }

        let mut tags = payload.tags;
        tags.truncate(5);

        Ok(TaxonomySuggestion {
            category: payload.category,
            tags,
        })
    }

    async fn generate_seo(
        &self,
        title: &str,
        content: &str,
    ) -> Result<SeoSuggestion, ProviderError> {
        let prompt = format!(
            "Analyze this blog post and return a JSON object with exactly this \
             structure:\n\n{{\n    \"seo_title\": \"seo optimized title here\",\n    \
             \"meta_description\": \"compelling meta description here\",\n    \
             \"seo_keywords\": [\"keyword1\", \"keyword2\", \"keyword3\", \"keyword4\", \
             \"keyword5\", \"keyword6\"],\n    \"slug_suggestion\": \"url-slug-suggestion\"\n}}\n\n\
             REQUIREMENTS:\n\
             - seo_title: SEO-optimized title (max 60 chars)\n\
             - meta_description: compelling meta description (max 150 chars)\n\
             - seo_keywords: EXACTLY 6 relevant keywords as array\n\
             - slug_suggestion: URL-friendly slug (lowercase, hyphens, max 50 chars)\n\n\
             BLOG POST:\nTitle: {}\nContent: {}\n\n\
             Return only the JSON object.",
            title,
            truncated(content)
        );

        let text = self
            .chat(
                "You are an SEO expert. Always return valid JSON only.",
                &prompt,
                300,
                true,
            )
            .await?;

        let payload: SeoPayload = parse_payload(&text)?;
        if payload.seo_title.trim().is_empty() {
            return Err(ProviderError::Malformed);
        }

        let mut meta_description = payload.meta_description;
        if meta_description.chars().count() > 150 {
            meta_description = meta_description.chars().take(147).collect::<String>() + "...";
        }
        let mut seo_keywords = payload.seo_keywords;
        seo_keywords.truncate(6);

        Ok(SeoSuggestion {
            seo_title: payload.seo_title,
            meta_description,
            slug_suggestion: payload.slug_suggestion,
            seo_keywords,
        })
    }

    async fn summarize(&self, content: &str) -> Result<String, ProviderError> {
        let prompt = format!(
            "Generate a concise, engaging summary of the following blog post content. \
             The summary should be no more than 200 characters and capture the main \
             points and key takeaways.\n\nContent:\n{}\n\nSummary:",
            truncated(content)
        );

        let summary = self
            .chat(
                "You are a helpful assistant that creates concise blog post summaries.",
                &prompt,
                150,
                false,
            )
            .await?;

        // Trim on a word boundary if the model overran the limit.
        if summary.chars().count() > 200 {
            let cut: String = summary.chars().take(200).collect();
            let cut = cut.rsplit_once(' ').map(|(head, _)| head).unwrap_or(&cut);
            return Ok(format!("{cut}..."));
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_payload_accepts_plain_json() {
        let payload: TaxonomyPayload =
            parse_payload(r#"{"category": "Technology", "tags": ["rust", "web"]}"#).unwrap();
        assert_eq!(payload.category, "Technology");
        assert_eq!(payload.tags.len(), 2);
    }

    #[test]
    fn parse_payload_strips_markdown_fences() {
        let text = "```json\n{\"category\": \"Business\", \"tags\": [\"startups\"]}\n```";
        let payload: TaxonomyPayload = parse_payload(text).unwrap();
        assert_eq!(payload.category, "Business");
    }

    #[test]
    fn parse_payload_rejects_missing_fields() {
        let result: Result<SeoPayload, _> = parse_payload(r#"{"seo_title": "only this"}"#);
        assert!(matches!(result, Err(ProviderError::Malformed)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let long = "é".repeat(MAX_CONTENT_CHARS + 10);
        assert_eq!(truncated(&long).chars().count(), MAX_CONTENT_CHARS);
    }

    #[tokio::test]
    async fn unconfigured_provider_fails_without_calling_out() {
        let provider = OpenAiProvider::new(OpenAiProviderConfig::default());
        let result = provider.suggest_taxonomy("some content").await;
        assert!(matches!(result, Err(ProviderError::NotConfigured)));
    }

    #[tokio::test]
    async fn stalled_upstream_times_out() {
        // A listener that accepts connections and never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((socket, _)) = listener.accept().await else {
                    break;
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    use tokio::io::AsyncReadExt;
                    let mut socket = socket;
                    while let Ok(n) = socket.read(&mut buf).await {
                        if n == 0 {
                            break;
                        }
                    }
                });
            }
        });

        let provider = OpenAiProvider::new(OpenAiProviderConfig {
            api_key: Some("test-key".to_string()),
            base_url: format!("http://{addr}/v1"),
            model: "gpt-4o-mini".to_string(),
            timeout: Duration::from_millis(200),
        });

        let started = std::time::Instant::now();
        let result = provider.summarize("some content").await;
        let elapsed = started.elapsed();

        assert!(matches!(result, Err(ProviderError::Timeout)));
        assert!(elapsed >= Duration::from_millis(200));
        assert!(elapsed < Duration::from_secs(5));
    }
}
