use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::interview::extract::ExtractError;
use crate::llm_client::LlmError;
use crate::ocr::OcrError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("Model output could not be parsed: {0}")]
    UnparseableOutput(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey => {
                AppError::Configuration("Chat gateway API key is not configured".to_string())
            }
            LlmError::Api { status, message } => AppError::Upstream { status, message },
            other => AppError::Llm(other.to_string()),
        }
    }
}

impl From<OcrError> for AppError {
    fn from(err: OcrError) -> Self {
        match err {
            OcrError::MissingCredentials => {
                AppError::Configuration("OCR credentials are not configured".to_string())
            }
            OcrError::Http { status, body } => AppError::Upstream {
                status,
                message: body,
            },
            OcrError::Vendor { code, message } => AppError::Upstream {
                status: 502,
                message: format!("{code}: {message}"),
            },
            OcrError::InvalidImage => {
                AppError::Validation("image payload is not valid base64".to_string())
            }
            other => AppError::Ocr(other.to_string()),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::UnparseableOutput(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::UnprocessableEntity(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNPROCESSABLE_ENTITY",
                msg.clone(),
            ),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream returned {status}: {message}");
                (
                    StatusCode::from_u16(*status)
                        .ok()
                        .filter(|s| s.is_client_error() || s.is_server_error())
                        .unwrap_or(StatusCode::BAD_GATEWAY),
                    "UPSTREAM_ERROR",
                    format!("Upstream request failed with status {status}: {message}"),
                )
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::Ocr(msg) => {
                tracing::error!("OCR error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "OCR_ERROR",
                    "OCR processing failed".to_string(),
                )
            }
            AppError::UnparseableOutput(msg) => {
                tracing::warn!("Unparseable model output: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UNPARSEABLE_MODEL_OUTPUT",
                    "The model response could not be parsed into interview questions".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_is_passed_through() {
        let response = AppError::Upstream {
            status: 401,
            message: "bad key".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_upstream_non_error_status_maps_to_bad_gateway() {
        let response = AppError::Upstream {
            status: 200,
            message: String::new(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_missing_api_key_is_configuration_error() {
        let err: AppError = LlmError::MissingApiKey.into();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_ocr_vendor_error_is_bad_gateway() {
        let err: AppError = OcrError::Vendor {
            code: "FailedOperation.ImageDecodeFailed".to_string(),
            message: "image decode failed".to_string(),
        }
        .into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_unrecoverable_extraction_is_bad_gateway() {
        let err: AppError = ExtractError::Unrecoverable.into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }
}
