//! 响应解析服务 - 业务能力层
//!
//! 只负责"从 LLM 的自由文本回复中提取题目集"能力，不关心流程
//!
//! 提取顺序：
//! 1. 整串直接按 JSON 解码
//! 2. ```json 代码块内的内容
//! 3. 词法扫描第一个配平的顶层 `{...}` 片段（识别字符串与转义，
//!    而不是简单地取第一个 `{` 到最后一个 `}`）
//!
//! 解码成功后逐条校验各类题目：缺少必填字段的单条题目被丢弃并记录
//! 警告，不会导致整个题目集解析失败

use crate::error::ChunkError;
use crate::models::{
    Flashcard, FillInBlanksQuestion, MatchingQuestion, Mcq, QuestionSet, TrueFalseQuestion,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// 响应解析服务
pub struct ResponseParser;

impl ResponseParser {
    /// 创建新的响应解析服务
    pub fn new() -> Self {
        Self
    }

    /// 从原始回复中解析题目集
    ///
    /// 五类集合均允许缺省（默认为空）；
    /// 无法提取任何 JSON 对象时返回 [`ChunkError::Parse`]
    pub fn parse(&self, raw: &str) -> Result<QuestionSet, ChunkError> {
        let value = self.extract_json_value(raw)?;

        let object = value.as_object().ok_or_else(|| ChunkError::Parse {
            reason: "提取到的 JSON 不是对象".to_string(),
        })?;

        Ok(QuestionSet {
            flashcards: decode_elements::<Flashcard>(object.get("flashcards"), "flashcards"),
            mcqs: decode_elements::<Mcq>(object.get("mcqs"), "mcqs"),
            matching_questions: decode_elements::<MatchingQuestion>(
                object.get("matchingQuestions"),
                "matchingQuestions",
            ),
            true_false_questions: decode_elements::<TrueFalseQuestion>(
                object.get("trueFalseQuestions"),
                "trueFalseQuestions",
            ),
            fill_in_blanks_questions: decode_elements::<FillInBlanksQuestion>(
                object.get("fillInBlanksQuestions"),
                "fillInBlanksQuestions",
            ),
        })
    }

    /// 依次尝试三种提取方式，返回第一个解码成功的 JSON 值
    fn extract_json_value(&self, raw: &str) -> Result<Value, ChunkError> {
        let trimmed = raw.trim();

        // 1. 整串直接解码
        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
            return Ok(value);
        }

        // 2. ```json 代码块
        if let Some(fenced) = extract_fenced_block(trimmed) {
            if let Ok(value) = serde_json::from_str::<Value>(fenced) {
                return Ok(value);
            }
        }

        // 3. 第一个配平的顶层对象
        if let Some(span) = extract_balanced_object(trimmed) {
            if let Ok(value) = serde_json::from_str::<Value>(span) {
                return Ok(value);
            }
        }

        Err(ChunkError::Parse {
            reason: format!(
                "响应中没有可解码的 JSON 对象（前 80 字符: {}）",
                trimmed.chars().take(80).collect::<String>()
            ),
        })
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 逐条解码一个类别的数组，丢弃不合法的单条题目
fn decode_elements<T: DeserializeOwned>(value: Option<&Value>, category: &str) -> Vec<T> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    let mut decoded = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(element) => decoded.push(element),
            Err(e) => {
                warn!("丢弃 {} 第 {} 条不合法题目: {}", category, index, e);
            }
        }
    }
    decoded
}

/// 提取 ```json …``` 或 ``` …``` 代码块内容
fn extract_fenced_block(text: &str) -> Option<&str> {
    let start = if let Some(pos) = text.find("```json") {
        pos + "```json".len()
    } else {
        text.find("```")? + 3
    };
    let end = text[start..].find("```")?;
    Some(text[start..start + end].trim())
}

/// 词法扫描第一个配平的顶层 `{...}` 片段
///
/// 跟踪字符串与反斜杠转义，花括号出现在字符串字面量内时不计入深度
fn extract_balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut start = None;
    let mut in_string = false;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                if start.is_some() {
                    in_string = true;
                }
            }
            '{' => {
                if start.is_none() {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' => {
                if let Some(s) = start {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[s..i + ch.len_utf8()]);
                    }
                }
            }
            _ => {}
        }
    }

    None
}
