//! Truncation repair for JSON arrays cut off by the output token limit.

use tracing::debug;

use super::decode::{decode_json_array, is_json_shaped};
use crate::interview::models::QaRecord;

/// Cuts the text after its last `}` and recloses the array.
///
/// Only JSON-shaped text is considered. The object that was being written when
/// the output stopped is dropped whole.
pub fn repair_truncated(normalized: &str) -> Option<Vec<QaRecord>> {
    if !is_json_shaped(normalized) {
        return None;
    }

    let last_close = normalized.rfind('}')?;
    let candidate = format!("{}]", &normalized[..=last_close]);

    match decode_json_array(&candidate) {
        Ok(records) => {
            debug!(
                "Repaired truncated JSON array: kept {} records, dropped {} trailing bytes",
                records.len(),
                normalized.len() - last_close - 1
            );
            Some(records)
        }
        Err(e) => {
            debug!("Truncation repair failed: {e}");
            None
        }
    }
}
