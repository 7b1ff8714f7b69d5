//! OCR: pluggable text recognition for job-description images.
//!
//! Default: `TencentOcrClient` (Tencent Cloud GeneralBasicOCR, TC3 signed).
//! `AppState` holds an `Option<Arc<dyn OcrEngine>>`; `None` when the vendor
//! credentials are not configured.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

pub mod handlers;
pub mod signing;
pub mod tencent;

pub use tencent::TencentOcrClient;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR credentials are not configured")]
    MissingCredentials,

    #[error("image payload is not valid base64")]
    InvalidImage,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OCR endpoint returned status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("OCR vendor error {code}: {message}")]
    Vendor { code: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The OCR engine trait. Implement this to swap vendors without touching the
/// handler.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Returns the recognised lines joined with `\n`; an image with no text
    /// yields an empty string.
    async fn recognize(&self, image_base64: &str) -> Result<String, OcrError>;
}

/// Accepts raw base64 or a browser data URL (`data:image/png;base64,...`) and
/// returns the bare base64 payload after checking that it decodes.
pub fn prepare_image_payload(image: &str) -> Result<&str, OcrError> {
    let image = image.trim();
    let payload = match image.strip_prefix("data:") {
        Some(rest) => rest
            .split_once("base64,")
            .map(|(_, data)| data)
            .ok_or(OcrError::InvalidImage)?,
        None => image,
    };

    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| OcrError::InvalidImage)?;
    if bytes.is_empty() {
        return Err(OcrError::InvalidImage);
    }

    Ok(payload)
}

/// 1x1 transparent PNG.
#[cfg(test)]
pub(crate) const TINY_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
