//! Plain-text export of a question list, matching the download the UI offers.

use crate::interview::models::{is_numbered_point, QaRecord};

/// File name offered for the download (`面试题目和答案.txt`), RFC 5987 encoded.
pub const EXPORT_FILENAME_ENCODED: &str =
    "%E9%9D%A2%E8%AF%95%E9%A2%98%E7%9B%AE%E5%92%8C%E7%AD%94%E6%A1%88.txt";

const RECORD_SEPARATOR_WIDTH: usize = 50;
const NOTE_INDENT: &str = "    ";

/// Renders every record as `问题：…` / `参考答案：…`, numbered points kept
/// verbatim and explanatory lines indented.
pub fn render_plain_text(records: &[QaRecord]) -> String {
    let separator = format!("\n\n{}\n\n", "=".repeat(RECORD_SEPARATOR_WIDTH));

    records
        .iter()
        .map(render_record)
        .collect::<Vec<_>>()
        .join(&separator)
}

fn render_record(record: &QaRecord) -> String {
    let lines: Vec<String> = record
        .answer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if is_numbered_point(line) {
                line.to_string()
            } else {
                format!("{NOTE_INDENT}{line}")
            }
        })
        .collect();

    format!(
        "问题：{}\n\n参考答案：\n{}",
        record.question,
        lines.join("\n")
    )
}

pub fn content_disposition() -> String {
    format!("attachment; filename*=UTF-8''{EXPORT_FILENAME_ENCODED}")
}
