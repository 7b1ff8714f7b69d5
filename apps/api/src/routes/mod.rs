pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers as interview;
use crate::llm_client::handlers as chat;
use crate::ocr::handlers as ocr;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Body limit for routes that carry an image or document. The OCR vendor
/// accepts up to 10 MB of base64; the rest is room for the JSON or multipart
/// framing around it.
pub const UPLOAD_BODY_LIMIT: usize = 12 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Gateway relays
        .route("/api/chat", post(chat::handle_chat))
        .route(
            "/api/ocr",
            post(ocr::handle_ocr).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Interview API
        .route(
            "/api/v1/interview/generate",
            post(interview::handle_generate),
        )
        .route("/api/v1/interview/export", post(interview::handle_export))
        .route(
            "/api/v1/resume/extract",
            post(resume::handle_extract_resume)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
}
