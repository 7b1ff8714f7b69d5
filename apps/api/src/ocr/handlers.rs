use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::ocr::{prepare_image_payload, OcrError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OcrRequest {
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct OcrResponse {
    pub success: bool,
    pub text: String,
}

/// POST /api/ocr
pub async fn handle_ocr(
    State(state): State<AppState>,
    Json(req): Json<OcrRequest>,
) -> Result<Json<OcrResponse>, AppError> {
    if req.image.trim().is_empty() {
        return Err(AppError::Validation("image is required".to_string()));
    }

    let engine = state.ocr.as_ref().ok_or(OcrError::MissingCredentials)?;
    let payload = prepare_image_payload(&req.image)
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let text = engine.recognize(payload).await?;
    info!("OCR recognised {} chars", text.chars().count());

    Ok(Json(OcrResponse {
        success: true,
        text,
    }))
}
