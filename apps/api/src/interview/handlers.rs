//! Axum route handlers for the Interview API.

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::interview::export::{content_disposition, render_plain_text};
use crate::interview::generator::{generate_questions, GenerateRequest, GenerateResponse};
use crate::interview::models::QaRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub records: Vec<QaRecord>,
}

/// POST /api/v1/interview/generate
///
/// Builds the prompt, makes one chat call and returns the recovered records,
/// padded to the configured question count.
pub async fn handle_generate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let referer = state.referer(&headers);
    let response = generate_questions(&state.llm, &state.generation, &request, &referer).await?;
    Ok(Json(response))
}

/// POST /api/v1/interview/export
///
/// Renders records as the plain-text download.
pub async fn handle_export(
    Json(request): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.records.is_empty() {
        return Err(AppError::Validation("records cannot be empty".to_string()));
    }

    let body = render_plain_text(&request.records);
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition()),
        ],
        body,
    ))
}
