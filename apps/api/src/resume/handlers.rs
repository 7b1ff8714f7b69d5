use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::errors::AppError;
use crate::resume::{extract_resume_text, ResumeError, ResumeText};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

impl From<ResumeError> for AppError {
    fn from(err: ResumeError) -> Self {
        match err {
            ResumeError::Pdf(msg) => AppError::UnprocessableEntity(format!(
                "The PDF could not be parsed; enter the resume manually ({msg})"
            )),
            ResumeError::Task(e) => AppError::Internal(e.into()),
        }
    }
}

/// POST /api/v1/resume/extract
///
/// Multipart upload with a `file` field. Returns the resume as plain text.
pub async fn handle_extract_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeText>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let resume = extract_resume_text(
            state.documents.clone(),
            file_name.as_deref(),
            content_type.as_deref(),
            bytes.to_vec(),
        )
        .await?;
        return Ok(Json(resume));
    }

    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}
