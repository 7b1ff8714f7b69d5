use std::sync::Arc;

use axum::http::{header, HeaderMap};

use crate::config::Config;
use crate::interview::generator::GenerationSettings;
use crate::llm_client::{resolve_referer, LlmClient};
use crate::ocr::OcrEngine;
use crate::resume::DocumentTextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    pub generation: GenerationSettings,
    /// `None` when the OCR vendor credentials are not configured.
    pub ocr: Option<Arc<dyn OcrEngine>>,
    /// PDF text extraction used by the resume upload endpoint.
    pub documents: Arc<dyn DocumentTextExtractor>,
}

impl AppState {
    /// Referer for the chat gateway, derived from the caller's `Origin`.
    pub fn referer(&self, headers: &HeaderMap) -> String {
        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok());
        resolve_referer(origin, self.config.deployment_url.as_deref())
    }
}
