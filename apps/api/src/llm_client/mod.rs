/// LLM Client: the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the gateway directly.
/// All model interactions MUST go through `ChatGateway`.
///
/// Every call is one `system` + one `user` message. No streaming, no tools,
/// no conversation history. Failures are terminal for the request: nothing
/// here retries, caches or deduplicates.
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// OpenAI-compatible chat-completion endpoint used when `GATEWAY_URL` is unset.
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
/// Model identifier used when `GATEWAY_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";
/// Upstream error bodies are logged, truncated to this many bytes.
const MAX_ERROR_BODY_BYTES: usize = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("gateway credential is missing")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("gateway rate limit reached")]
    RateLimited,

    #[error("gateway requires payment")]
    PaymentRequired,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("gateway returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if it carries any non-blank text.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .filter(|s| !s.trim().is_empty())
    }
}

/// The seam between the analysis service and the hosted model.
///
/// Carried in `AppState` as `Arc<dyn ChatGateway>`.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Sends one system + user prompt pair and returns the raw assistant text.
    async fn invoke(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError>;
}

/// Gateway client for an OpenAI-compatible chat-completion service.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    url: String,
    model: String,
}

impl LlmClient {
    pub fn new(api_key: Option<String>, url: String, model: String) -> Result<Self, LlmError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            api_key,
            url,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatGateway for LlmClient {
    async fn invoke(&self, system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;

        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                warn!("Gateway returned 429");
                return Err(LlmError::RateLimited);
            }
            StatusCode::PAYMENT_REQUIRED => {
                warn!("Gateway returned 402");
                return Err(LlmError::PaymentRequired);
            }
            s if !s.is_success() => {
                let mut body = response.text().await.unwrap_or_default();
                truncate_on_char_boundary(&mut body, MAX_ERROR_BODY_BYTES);
                warn!(status = s.as_u16(), body = %body, "Gateway error");
                return Err(LlmError::Api {
                    status: s.as_u16(),
                    message: body,
                });
            }
            _ => {}
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion.text().ok_or(LlmError::EmptyContent)?;

        debug!(chars = text.len(), "Gateway call succeeded");
        Ok(text.to_string())
    }
}

fn truncate_on_char_boundary(text: &mut String, max_bytes: usize) {
    if text.len() <= max_bytes {
        return;
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    text.truncate(cut);
}
