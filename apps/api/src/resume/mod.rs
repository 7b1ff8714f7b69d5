//! Resume text extraction from uploaded files.
//!
//! PDF parsing is an injected capability: `main` builds one
//! `Arc<dyn DocumentTextExtractor>` and every handler receives it through
//! `AppState`. Parsing is CPU-bound and must run inside `spawn_blocking`.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

pub mod handlers;

/// Returned in place of text for file types that cannot be read.
pub const MANUAL_ENTRY_PLACEHOLDER: &str = "请手动输入简历内容";

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("PDF parsing failed: {0}")]
    Pdf(String),

    #[error("extraction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Turns document bytes into plain text.
pub trait DocumentTextExtractor: Send + Sync {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ResumeError>;
}

/// `pdf-extract` backed extractor.
pub struct PdfTextExtractor;

impl DocumentTextExtractor for PdfTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String, ResumeError> {
        let text =
            pdf_extract::extract_text_from_mem(bytes).map_err(|e| ResumeError::Pdf(e.to_string()))?;
        Ok(text.trim().to_string())
    }
}

/// How an uploaded file was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSource {
    PlainText,
    Pdf,
    /// Not readable; the placeholder text was returned instead.
    Unsupported,
}

impl ResumeSource {
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Self {
        let content_type = content_type.unwrap_or_default().to_ascii_lowercase();
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("text/plain") || extension == "txt" {
            ResumeSource::PlainText
        } else if content_type == "application/pdf" || extension == "pdf" {
            ResumeSource::Pdf
        } else {
            ResumeSource::Unsupported
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumeText {
    pub text: String,
    pub source: ResumeSource,
}

/// Reads an uploaded resume. Unsupported types degrade to the manual-entry
/// placeholder rather than failing.
pub async fn extract_resume_text(
    extractor: Arc<dyn DocumentTextExtractor>,
    file_name: Option<&str>,
    content_type: Option<&str>,
    bytes: Vec<u8>,
) -> Result<ResumeText, ResumeError> {
    let source = ResumeSource::detect(file_name, content_type);
    debug!(
        "Resume upload: name={:?}, type={:?}, {} bytes, source={:?}",
        file_name,
        content_type,
        bytes.len(),
        source
    );

    let text = match source {
        ResumeSource::PlainText => String::from_utf8_lossy(&bytes).trim().to_string(),
        ResumeSource::Pdf => {
            tokio::task::spawn_blocking(move || extractor.extract_text(&bytes)).await??
        }
        ResumeSource::Unsupported => MANUAL_ENTRY_PLACEHOLDER.to_string(),
    };

    info!(
        "Extracted {} chars of resume text ({:?})",
        text.chars().count(),
        source
    );
    Ok(ResumeText { text, source })
}
