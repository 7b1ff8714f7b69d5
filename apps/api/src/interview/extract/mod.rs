//! Resilient extraction of question/answer records from raw model output.
//!
//! Flow: normalize → decode (JSON array, then delimited text) → truncation
//! repair → embedded-array fallback. Completion runs afterwards, in the
//! generator, once a stage has succeeded.

pub mod complete;
pub mod decode;
pub mod fallback;
pub mod normalize;
pub mod repair;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::interview::models::{QaRecord, ResponseFormat};

pub use complete::{complete_records, CompletionPolicy};
pub use normalize::normalize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// Every stage failed. Callers must surface this and show no records.
    #[error("no stage could recover question/answer records from the model output")]
    Unrecoverable,
}

/// Which stage produced the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractStage {
    Strict,
    Repaired,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub records: Vec<QaRecord>,
    pub format: ResponseFormat,
    pub stage: ExtractStage,
}

/// Runs every recovery stage in order and returns the first success.
pub fn extract_records(raw: &str) -> Result<Extraction, ExtractError> {
    let normalized = normalize(raw);

    if let Some(decoded) = decode::decode(&normalized) {
        debug!(
            "Decoded {} records as {:?}",
            decoded.records.len(),
            decoded.format
        );
        return Ok(Extraction {
            records: decoded.records,
            format: decoded.format,
            stage: ExtractStage::Strict,
        });
    }

    if let Some(records) = repair::repair_truncated(&normalized) {
        info!("Recovered {} records from truncated output", records.len());
        return Ok(Extraction {
            records,
            format: ResponseFormat::JsonArray,
            stage: ExtractStage::Repaired,
        });
    }

    if let Some(records) = fallback::extract_embedded_array(raw) {
        info!("Recovered {} records from embedded array", records.len());
        return Ok(Extraction {
            records,
            format: ResponseFormat::JsonArray,
            stage: ExtractStage::Fallback,
        });
    }

    Err(ExtractError::Unrecoverable)
}
