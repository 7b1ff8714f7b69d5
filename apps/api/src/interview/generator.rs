//! Interview question generation: one chat call, then record recovery.
//!
//! Flow: validate → build_prompt → LLM complete → extract_records →
//!       complete_records → response.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::AppError;
use crate::interview::extract::{
    complete_records, extract_records, CompletionPolicy, ExtractStage,
};
use crate::interview::models::{AnswerLine, QaRecord, ResponseFormat};
use crate::interview::prompts::{build_prompt, PromptStyle};
use crate::llm_client::{ChatMessage, ChatRequest, LlmClient};

/// Model parameters and completion policy, fixed at startup.
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub model: String,
    /// `None` means the prompt style's default.
    pub max_tokens: Option<u32>,
    pub temperature: f32,
    pub policy: CompletionPolicy,
}

impl GenerationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.llm_model.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
            policy: CompletionPolicy::with_target(config.question_count),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub resume_text: String,
    pub job_description: String,
    #[serde(default)]
    pub style: PromptStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub records: Vec<QaRecord>,
    pub format: ResponseFormat,
    pub stage: ExtractStage,
    /// Classified answer lines, index-aligned with `records`.
    pub answer_lines: Vec<Vec<AnswerLine>>,
    /// How many placeholder records were appended.
    pub padded: usize,
}

/// Runs one generation request end to end.
///
/// Exactly one chat call is made. A response none of the recovery stages can
/// read is an error; partial or corrupted records are never returned.
pub async fn generate_questions(
    llm: &LlmClient,
    settings: &GenerationSettings,
    request: &GenerateRequest,
    referer: &str,
) -> Result<GenerateResponse, AppError> {
    if request.resume_text.trim().is_empty() || request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text and job_description are both required".to_string(),
        ));
    }

    info!(
        "Generating questions: style={:?}, resume_chars={}, jd_chars={}",
        request.style,
        request.resume_text.chars().count(),
        request.job_description.chars().count()
    );

    let chat_request = build_chat_request(settings, request);
    let content = llm.complete(&chat_request, referer).await?;

    let extraction = extract_records(&content).map_err(|e| {
        warn!(
            "Unrecoverable model output ({} chars): {e}",
            content.chars().count()
        );
        AppError::from(e)
    })?;

    if extraction.format != request.style.expected_format() {
        warn!(
            "Model answered in {:?} although {:?} was requested",
            extraction.format, request.style
        );
    }

    let decoded = extraction.records.len();
    let records = complete_records(extraction.records, &settings.policy);
    let padded = records.len() - decoded;
    info!(
        "Generated {} records ({} decoded via {:?}, {} placeholders)",
        records.len(),
        decoded,
        extraction.stage,
        padded
    );

    let answer_lines = records.iter().map(QaRecord::answer_lines).collect();

    Ok(GenerateResponse {
        records,
        answer_lines,
        format: extraction.format,
        stage: extraction.stage,
        padded,
    })
}

fn build_chat_request(settings: &GenerationSettings, request: &GenerateRequest) -> ChatRequest {
    let prompt = build_prompt(
        request.style,
        &request.resume_text,
        &request.job_description,
        settings.policy.target_count,
    );

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = prompt.system {
        messages.push(ChatMessage::system(system));
    }
    messages.push(ChatMessage::user(prompt.user));

    ChatRequest {
        model: settings.model.clone(),
        messages,
        max_tokens: Some(
            settings
                .max_tokens
                .unwrap_or_else(|| request.style.default_max_tokens()),
        ),
        temperature: Some(settings.temperature),
    }
}
