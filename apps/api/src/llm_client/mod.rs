//! LLM client: the single point of entry for all chat-completion calls.
//!
//! Talks to an OpenAI-compatible gateway (OpenRouter by default). No other
//! module may call the gateway directly. Calls are made exactly once: there is
//! no retry loop and no timeout unless one is configured.

pub mod handlers;

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

/// Title header the gateway shows in its usage dashboard.
const APP_TITLE: &str = "Interview Helper";
/// Referer used when neither the caller's origin nor a deployment URL is known.
pub const DEFAULT_REFERER: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Chat gateway API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body of an OpenAI-compatible chat completion call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

/// Token counts; gateways differ in which fields they report.
#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice, if the gateway returned one.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct GatewayError {
    error: GatewayErrorBody,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    message: String,
}

/// The single chat-completion client used by all services.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<SecretString>,
    base_url: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.llm_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            api_key: config.openrouter_api_key.clone(),
            base_url: config.openrouter_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends the request and returns the gateway's JSON body untouched.
    /// Non-2xx responses become `LlmError::Api` carrying the vendor message.
    pub async fn send_raw(
        &self,
        request: &ChatRequest,
        referer: &str,
    ) -> Result<serde_json::Value, LlmError> {
        let api_key = self.api_key.as_ref().ok_or(LlmError::MissingApiKey)?;

        debug!(
            "Chat request: model={}, messages={}",
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key.expose_secret())
            .header("HTTP-Referer", referer)
            .header("X-Title", APP_TITLE)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Chat gateway returned {}: {}", status, body);
            let message = serde_json::from_str::<GatewayError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Sends the request and returns the text of the first choice.
    pub async fn complete(&self, request: &ChatRequest, referer: &str) -> Result<String, LlmError> {
        let body = self.send_raw(request, referer).await?;
        let response: ChatResponse = serde_json::from_value(body)?;

        if let Some(usage) = &response.usage {
            debug!(
                "Chat call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Picks the referer the gateway expects: the caller's origin, then the
/// deployment URL, then the local development address.
pub fn resolve_referer(origin: Option<&str>, deployment_url: Option<&str>) -> String {
    origin
        .filter(|o| !o.trim().is_empty())
        .or(deployment_url)
        .unwrap_or(DEFAULT_REFERER)
        .to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    /// Starts a stub gateway on an ephemeral port answering every chat call
    /// with `content` (or with `status` and an error body when not 200).
    /// Returns the base URL to put in `Config::openrouter_base_url`.
    pub async fn spawn_gateway(status: StatusCode, content: &str) -> String {
        let content = content.to_string();
        let app = Router::new().route(
            "/chat/completions",
            post(move |Json(_body): Json<Value>| {
                let content = content.clone();
                async move {
                    if status == StatusCode::OK {
                        (
                            status,
                            Json(json!({
                                "choices": [{"message": {"role": "assistant", "content": content}}],
                                "usage": {"prompt_tokens": 10, "completion_tokens": 20}
                            })),
                        )
                    } else {
                        (status, Json(json!({"error": {"message": "upstream refused"}})))
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub gateway");
        let addr = listener.local_addr().expect("stub gateway address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub gateway");
        });

        format!("http://{addr}")
    }
}
