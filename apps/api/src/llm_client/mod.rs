/// LLM Gateway: the single point of entry for all text-generation calls.
///
/// ARCHITECTURAL RULE: no other module may call a provider API directly
/// (the Perplexity research call in `company::research` is the one sanctioned
/// exception, since it is a search API rather than a generation backend).
///
/// Callers depend only on the `LlmBackend` trait; the concrete provider is
/// selected once at startup via `backend_from_config`. The gateway itself
/// never retries: transport errors, timeouts, non-2xx statuses, empty
/// bodies, and unparseable structured replies all collapse into `LlmError`,
/// and recovery policy (scripted fallbacks) lives with the callers.
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all Groq generation calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const GROQ_MODEL: &str = "llama-3.3-70b-versatile";
/// Bounded per-call timeout. A hung provider is treated the same as any
/// other gateway failure by callers.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Role tag for a prompt block. Maps onto the chat-completion wire roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One role-tagged instruction/context block of a composed prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBlock {
    pub role: Role,
    pub content: String,
}

impl PromptBlock {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A text-generation backend. One implementation per provider; callers never
/// see provider-specific types.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Runs one completion over the composed prompt blocks and returns the
    /// raw text reply. `json_mode` requests a JSON-only response mode where
    /// the provider supports it. No retries happen here.
    async fn complete(
        &self,
        blocks: &[PromptBlock],
        json_mode: bool,
        max_tokens: u32,
    ) -> Result<String, LlmError>;

    fn name(&self) -> &'static str;
}

/// Calls the backend in JSON mode and deserializes the reply.
/// Missing required fields or unparseable output count as a failure; the
/// caller never receives a half-populated object silently.
pub async fn call_json<T: DeserializeOwned>(
    backend: &dyn LlmBackend,
    blocks: &[PromptBlock],
    max_tokens: u32,
) -> Result<T, LlmError> {
    let text = backend.complete(blocks, true, max_tokens).await?;
    let text = strip_json_fences(&text);
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Selects the generation backend named by `LLM_PROVIDER`.
pub fn backend_from_config(config: &Config) -> anyhow::Result<Arc<dyn LlmBackend>> {
    match config.llm_provider.as_str() {
        "groq" => Ok(Arc::new(GroqBackend::new(config.groq_api_key.clone()))),
        other => anyhow::bail!("Unknown LLM_PROVIDER '{other}' (supported: groq)"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Groq backend (OpenAI-compatible chat completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

pub struct GroqBackend {
    client: reqwest::Client,
    api_key: String,
}

impl GroqBackend {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl LlmBackend for GroqBackend {
    async fn complete(
        &self,
        blocks: &[PromptBlock],
        json_mode: bool,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: GROQ_MODEL,
            messages: blocks
                .iter()
                .map(|b| WireMessage {
                    role: b.role.as_str(),
                    content: &b.content,
                })
                .collect(),
            max_tokens,
            response_format: json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        };

        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface the provider's error message when the body parses
            let message = serde_json::from_str::<GroqError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }

        debug!("LLM call succeeded: {} blocks, json_mode={json_mode}", blocks.len());
        Ok(content)
    }

    fn name(&self) -> &'static str {
        "groq"
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(Role::System.as_str(), "system");
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
    }

    #[test]
    fn test_chat_request_includes_response_format_in_json_mode() {
        let request = ChatRequest {
            model: GROQ_MODEL,
            messages: vec![WireMessage {
                role: "user",
                content: "hello",
            }],
            max_tokens: 64,
            response_format: Some(ResponseFormat {
                format_type: "json_object",
            }),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
    }

    #[test]
    fn test_chat_request_omits_response_format_otherwise() {
        let request = ChatRequest {
            model: GROQ_MODEL,
            messages: vec![],
            max_tokens: 64,
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_prompt_block_constructors_tag_roles() {
        assert_eq!(PromptBlock::system("a").role, Role::System);
        assert_eq!(PromptBlock::user("b").role, Role::User);
        assert_eq!(PromptBlock::assistant("c").role, Role::Assistant);
    }
}
