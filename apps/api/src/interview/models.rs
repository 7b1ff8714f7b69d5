//! Interview data models shared by the extractor, generator and exporter.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A numbered point: an integer, a period and at least one whitespace char.
static RE_NUMBERED_POINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+\.)\s+(.*)$").unwrap());

/// True for lines such as `"2. text"`; `"2.5 million"` is not a point.
pub fn is_numbered_point(line: &str) -> bool {
    RE_NUMBERED_POINT.is_match(line)
}

/// One question/answer pair recovered from a model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    /// Zero or more numbered points ("1. ..."), possibly interleaved with
    /// unnumbered explanatory lines.
    pub answer: String,
}

impl QaRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Classifies each non-blank answer line. Original numbering is kept.
    pub fn answer_lines(&self) -> Vec<AnswerLine> {
        self.answer
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(AnswerLine::classify)
            .collect()
    }
}

/// A single line of an answer, as the UI renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnswerLine {
    /// `label` is the original number with its period, e.g. `"3."`.
    Point { label: String, text: String },
    Note { text: String },
}

impl AnswerLine {
    fn classify(line: &str) -> Self {
        match RE_NUMBERED_POINT.captures(line) {
            Some(caps) => AnswerLine::Point {
                label: caps[1].to_string(),
                text: caps[2].to_string(),
            },
            None => AnswerLine::Note {
                text: line.to_string(),
            },
        }
    }
}

/// Which response shape the model produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// `问题N：…参考答案：…` blocks.
    Delimited,
    /// `[{"question": …, "answer": …}]`.
    JsonArray,
}
