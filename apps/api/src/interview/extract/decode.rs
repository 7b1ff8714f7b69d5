//! Structured-format decoder for the two response shapes the prompts ask for.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

use crate::interview::models::{QaRecord, ResponseFormat};

pub const QUESTION_MARKER_PATTERN: &str = r"问题\d+：";
pub const ANSWER_MARKER: &str = "参考答案：";

static RE_QUESTION_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(QUESTION_MARKER_PATTERN).unwrap());

/// Why a strict JSON-array decode was rejected.
#[derive(Debug, Error)]
pub enum JsonArrayError {
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("top-level value is not an array")]
    NotAnArray,

    #[error("array element {0} is not an object")]
    NotAnObject(usize),
}

/// Records decoded from a response together with the shape that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub records: Vec<QaRecord>,
    pub format: ResponseFormat,
}

/// Decodes normalized text: strict JSON array first when the text is
/// array-shaped, then the delimited-text format.
///
/// Returns `None` when neither shape yields records. JSON errors never
/// escape; they only route the text to the next stage.
pub fn decode(normalized: &str) -> Option<Decoded> {
    if is_json_shaped(normalized) {
        match decode_json_array(normalized) {
            Ok(records) => {
                return Some(Decoded {
                    records,
                    format: ResponseFormat::JsonArray,
                })
            }
            Err(e) => tracing::debug!("Strict JSON-array decode failed: {e}"),
        }
    }

    let records = decode_delimited(normalized);
    if records.is_empty() {
        return None;
    }

    Some(Decoded {
        records,
        format: ResponseFormat::Delimited,
    })
}

pub fn is_json_shaped(text: &str) -> bool {
    text.starts_with('[')
}

/// Strict decode of `[{"question": …, "answer": …}, …]`.
///
/// Missing or non-string fields become empty strings; anything other than an
/// array of objects is rejected.
pub fn decode_json_array(text: &str) -> Result<Vec<QaRecord>, JsonArrayError> {
    let value: Value = serde_json::from_str(text)?;
    let items = value.as_array().ok_or(JsonArrayError::NotAnArray)?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| -> Result<QaRecord, JsonArrayError> {
            let object = item.as_object().ok_or(JsonArrayError::NotAnObject(index))?;
            let field = |name: &str| {
                object
                    .get(name)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            };
            Ok(QaRecord::new(field("question"), field("answer")))
        })
        .collect()
}

/// Splits `问题N：<question>参考答案：<answer>` blocks.
///
/// Text before the first question marker is discarded. A block without an
/// answer marker is skipped, not returned with an empty answer.
pub fn decode_delimited(text: &str) -> Vec<QaRecord> {
    RE_QUESTION_MARKER
        .split(text)
        .skip(1)
        .map(str::trim)
        .filter(|section| !section.is_empty())
        .filter_map(|section| {
            let mut parts = section.split(ANSWER_MARKER);
            let question = parts.next()?.trim();
            let answer = parts.next()?.trim();
            Some(QaRecord::new(question, answer))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_json_array_is_returned_unchanged() {
        let text = r#"[{"question":"What is Rust?","answer":"1. A language\n2. Fast"},{"question":"Why?","answer":"1. Safety"}]"#;
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.format, ResponseFormat::JsonArray);
        assert_eq!(
            decoded.records,
            vec![
                QaRecord::new("What is Rust?", "1. A language\n2. Fast"),
                QaRecord::new("Why?", "1. Safety"),
            ]
        );
    }

    #[test]
    fn test_missing_and_non_text_fields_are_coerced_to_empty() {
        let text = r#"[{"question":"Q1"},{"question":"Q2","answer":42,"extra":true}]"#;
        let records = decode_json_array(text).unwrap();
        assert_eq!(
            records,
            vec![QaRecord::new("Q1", ""), QaRecord::new("Q2", "")]
        );
    }

    #[test]
    fn test_non_array_top_level_is_rejected() {
        let err = decode_json_array(r#"{"question":"Q","answer":"A"}"#).unwrap_err();
        assert!(matches!(err, JsonArrayError::NotAnArray));
    }

    #[test]
    fn test_non_object_element_is_rejected() {
        let err = decode_json_array(r#"[{"question":"Q","answer":"A"}, "loose"]"#).unwrap_err();
        assert!(matches!(err, JsonArrayError::NotAnObject(1)));
    }

    #[test]
    fn test_empty_json_array_decodes_to_no_records() {
        let decoded = decode("[]").unwrap();
        assert_eq!(decoded.format, ResponseFormat::JsonArray);
        assert!(decoded.records.is_empty());
    }

    #[test]
    fn test_delimited_format_yields_both_records() {
        let text = "问题1：What is X?参考答案：1. point one\n2. point two问题2：What is Y?参考答案：1. only point";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.format, ResponseFormat::Delimited);
        assert_eq!(
            decoded.records,
            vec![
                QaRecord::new("What is X?", "1. point one\n2. point two"),
                QaRecord::new("What is Y?", "1. only point"),
            ]
        );
    }

    #[test]
    fn test_delimited_discards_preamble_and_trims() {
        let text = "以下是面试题目：\n\n问题1： 介绍一下你的项目\n参考答案：\n1. 背景\n2. 职责\n\n问题2：如何排查线上问题？\n参考答案：\n1. 看日志\n";
        let records = decode_delimited(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].question, "介绍一下你的项目");
        assert_eq!(records[0].answer, "1. 背景\n2. 职责");
        assert_eq!(records[1].answer, "1. 看日志");
    }

    #[test]
    fn test_delimited_block_without_answer_marker_is_dropped() {
        let text = "问题1：Q1参考答案：A1问题2：Q2 with no answer问题3：Q3参考答案：A3";
        let records = decode_delimited(text);
        assert_eq!(
            records,
            vec![QaRecord::new("Q1", "A1"), QaRecord::new("Q3", "A3")]
        );
    }

    #[test]
    fn test_delimited_keeps_only_text_before_a_second_answer_marker() {
        let records = decode_delimited("问题1：Q参考答案：first参考答案：second");
        assert_eq!(records, vec![QaRecord::new("Q", "first")]);
    }

    #[test]
    fn test_text_with_neither_shape_fails() {
        assert!(decode("Sorry, I cannot help with that.").is_none());
        assert!(decode("").is_none());
    }

    #[test]
    fn test_broken_json_falls_through_to_delimited() {
        let text = "[问题1：Q参考答案：A";
        let decoded = decode(text).unwrap();
        assert_eq!(decoded.format, ResponseFormat::Delimited);
        assert_eq!(decoded.records, vec![QaRecord::new("Q", "A")]);
    }
}
