// Interview question prompt templates.
// `{count}`, `{resume}` and `{job_description}` are substituted before sending.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::interview::models::ResponseFormat;

static RE_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(count|resume|job_description)\}").unwrap());

/// System prompt for the delimited-text style.
pub const DELIMITED_SYSTEM_TEMPLATE: &str = "你是一个专业的面试官，请根据简历和岗位描述生成{count}个高质量的面试题目和参考答案。

要求：
1. 必须生成{count}个问题，不能多也不能少
2. 问题分类：
   - 3个问题针对简历中的项目和工作经历进行具体提问
   - 1个问题针对岗位技能或业务匹配性进行提问
   - 其余问题涵盖技术能力、问题解决能力、团队协作、沟通能力等方面，需根据简历和岗位要求进行综合提问
3. 每个问题都要结合具体的简历内容和岗位要求，具有针对性
4. 每个问题都必须提供参考答案
5. 参考答案要站在用人方的角度，帮助面试官评估候选人
6. 答案要简洁，罗列3-5条核心思路即可
7. 不要使用任何格式符号如*、-、#等，直接输出纯文本
8. 答案格式：用1.2.3.等数字编号，每个编号对应一个核心思路

输出格式：
问题1：[具体问题内容]
参考答案：
1. [核心思路1]
2. [核心思路2]
3. [核心思路3]

问题2：[具体问题内容]
参考答案：
1. [核心思路1]
2. [核心思路2]

...以此类推，共{count}个问题";

/// User message for the delimited-text style.
pub const DELIMITED_USER_TEMPLATE: &str = "简历内容：
{resume}

岗位描述：
{job_description}

请生成{count}个面试题目：";

/// Single user message for the JSON-array style.
pub const JSON_ARRAY_PROMPT_TEMPLATE: &str = r#"基于以下信息生成{count}个面试题目：

简历内容：{resume}

岗位描述：{job_description}

要求：
1. 生成2-3个过往项目经验类问题
2. 生成1个核心技能类问题
3. 生成1个学习能力类问题
4. 生成2个公司业务类问题
5. 其余为综合类问题

每个问题的建议答案要：
- 站在用人方满意的角度，展示候选人的价值
- 结合候选人简历中的具体项目、技能、经验
- 用1.2.3.的数字格式罗列要点
- 突出候选人的优势和对岗位的匹配度
- 分行显示，每行一个要点

请严格按照以下JSON格式返回：
[
  {
    "question": "问题内容",
    "answer": "站在用人方角度的建议答案，用1.2.3.格式罗列，结合简历背景展示价值"
  }
]"#;

/// Placeholder substituted for an input the caller left blank.
const NOT_PROVIDED: &str = "未提供";

/// Which response shape the prompt asks the model for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStyle {
    #[default]
    Delimited,
    JsonArray,
}

impl PromptStyle {
    /// Output budget when none is configured; JSON needs more room.
    pub fn default_max_tokens(self) -> u32 {
        match self {
            PromptStyle::Delimited => 2000,
            PromptStyle::JsonArray => 8000,
        }
    }

    pub fn expected_format(self) -> ResponseFormat {
        match self {
            PromptStyle::Delimited => ResponseFormat::Delimited,
            PromptStyle::JsonArray => ResponseFormat::JsonArray,
        }
    }
}

/// A rendered prompt: optional system message plus the user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewPrompt {
    pub system: Option<String>,
    pub user: String,
}

pub fn build_prompt(
    style: PromptStyle,
    resume: &str,
    job_description: &str,
    count: usize,
) -> InterviewPrompt {
    let count = count.to_string();
    let resume = non_blank(resume);
    let job_description = non_blank(job_description);
    // Single pass, so placeholders typed by the user are left alone.
    let fill = |template: &str| {
        RE_PLACEHOLDER
            .replace_all(template, |caps: &Captures| match &caps[1] {
                "count" => count.clone(),
                "resume" => resume.to_string(),
                _ => job_description.to_string(),
            })
            .into_owned()
    };

    match style {
        PromptStyle::Delimited => InterviewPrompt {
            system: Some(fill(DELIMITED_SYSTEM_TEMPLATE)),
            user: fill(DELIMITED_USER_TEMPLATE),
        },
        PromptStyle::JsonArray => InterviewPrompt {
            system: None,
            user: fill(JSON_ARRAY_PROMPT_TEMPLATE),
        },
    }
}

fn non_blank(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        NOT_PROVIDED
    } else {
        trimmed
    }
}
