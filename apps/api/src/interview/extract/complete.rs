//! Record completion: pads short lists and fills empty answers.

use crate::interview::models::QaRecord;

pub const DEFAULT_TARGET_COUNT: usize = 10;

pub const PLACEHOLDER_QUESTION: &str = "请详细描述您在相关领域的经验和能力";

pub const PLACEHOLDER_ANSWER: &str = "1. 此问题需要根据具体情况进行回答，建议结合个人经验和项目实践来阐述\n\
2. 可以从技术实现、问题解决思路、团队协作等角度来回答\n\
3. 重点突出个人在该领域的专业能力和学习成长";

/// How the completer fills gaps in a decoded list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPolicy {
    /// Minimum number of records returned. Longer lists are left as-is.
    pub target_count: usize,
    pub placeholder_question: String,
    pub placeholder_answer: String,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self::with_target(DEFAULT_TARGET_COUNT)
    }
}

impl CompletionPolicy {
    pub fn with_target(target_count: usize) -> Self {
        Self {
            target_count,
            placeholder_question: PLACEHOLDER_QUESTION.to_string(),
            placeholder_answer: PLACEHOLDER_ANSWER.to_string(),
        }
    }
}

/// Pads `records` up to the target count with placeholder records, then
/// gives every blank answer the placeholder answer. Never fails.
///
/// Output length is `max(target_count, records.len())`.
pub fn complete_records(mut records: Vec<QaRecord>, policy: &CompletionPolicy) -> Vec<QaRecord> {
    while records.len() < policy.target_count {
        records.push(QaRecord::new(
            policy.placeholder_question.as_str(),
            policy.placeholder_answer.as_str(),
        ));
    }

    for record in records.iter_mut() {
        if record.answer.trim().is_empty() {
            record.answer = policy.placeholder_answer.clone();
        }
    }

    records
}
