//! Last-resort search for a JSON array embedded in surrounding prose.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::decode::decode_json_array;
use crate::interview::models::QaRecord;

/// First `[` up to the nearest following `]`, across lines.
static RE_FIRST_ARRAY_SPAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\[.*?\]").unwrap());

/// Strictly decodes a bracketed span found inside `raw`.
///
/// The shortest span starting at the first `[` is tried first. When that cuts
/// an answer containing `]` in half, the widest span (first `[` to last `]`)
/// is tried next.
pub fn extract_embedded_array(raw: &str) -> Option<Vec<QaRecord>> {
    let first = RE_FIRST_ARRAY_SPAN.find(raw)?;
    if let Ok(records) = decode_json_array(first.as_str()) {
        return Some(records);
    }

    let end = raw.rfind(']')?;
    if end < first.end() {
        return None;
    }
    let widest = &raw[first.start()..=end];
    match decode_json_array(widest) {
        Ok(records) => Some(records),
        Err(e) => {
            debug!("Fallback extraction failed: {e}");
            None
        }
    }
}
