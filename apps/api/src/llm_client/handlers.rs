use axum::{extract::State, http::HeaderMap, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::llm_client::{ChatMessage, ChatRequest};
use crate::state::AppState;

/// Body accepted by the chat proxy. Unset sampling fields fall back to the
/// server configuration.
#[derive(Debug, Deserialize)]
pub struct ChatProxyRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// POST /api/chat
///
/// Forwards a chat completion to the gateway and returns its JSON unchanged.
pub async fn handle_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChatProxyRequest>,
) -> Result<Json<Value>, AppError> {
    if req.messages.is_empty() {
        return Err(AppError::Validation("messages cannot be empty".to_string()));
    }

    let request = ChatRequest {
        model: req
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| state.generation.model.clone()),
        messages: req.messages,
        max_tokens: req.max_tokens.or(state.generation.max_tokens),
        temperature: req.temperature.or(Some(state.generation.temperature)),
    };

    let referer = state.referer(&headers);
    let body = state.llm.send_raw(&request, &referer).await?;
    Ok(Json(body))
}
