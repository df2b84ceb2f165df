use serde::{Deserialize, Serialize};

/// 闪卡（问答卡片）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// 单选题
///
/// `correct_answer` 是 `options` 的下标（从 0 开始）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mcq {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
}

/// 连线题
///
/// `correct_matches[i]` 表示 `left_items[i]` 对应的 `right_items` 下标
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingQuestion {
    pub id: u32,
    pub question: String,
    pub left_items: Vec<String>,
    pub right_items: Vec<String>,
    pub correct_matches: Vec<u32>,
}

/// 判断题
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrueFalseQuestion {
    pub id: u32,
    pub question: String,
    pub is_true: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// 填空题
///
/// `text_with_blanks` 中的空位使用 `[BLANK_0]`、`[BLANK_1]`…占位，
/// `correct_answers` 按占位序号给出答案，`id` 形如 `fib-1`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillInBlanksQuestion {
    pub id: String,
    pub question: String,
    pub text_with_blanks: String,
    pub correct_answers: Vec<String>,
    pub complete_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

/// 一份完整的题目集
///
/// 五类题目集合均允许缺省（反序列化时默认为空），
/// 字段名是对外的 JSON 契约，下游按 camelCase 消费
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    #[serde(default)]
    pub flashcards: Vec<Flashcard>,
    #[serde(default)]
    pub mcqs: Vec<Mcq>,
    #[serde(default)]
    pub matching_questions: Vec<MatchingQuestion>,
    #[serde(default)]
    pub true_false_questions: Vec<TrueFalseQuestion>,
    #[serde(default)]
    pub fill_in_blanks_questions: Vec<FillInBlanksQuestion>,
}

impl QuestionSet {
    /// 是否五类题目全部为空
    pub fn is_empty(&self) -> bool {
        self.flashcards.is_empty()
            && self.mcqs.is_empty()
            && self.matching_questions.is_empty()
            && self.true_false_questions.is_empty()
            && self.fill_in_blanks_questions.is_empty()
    }

    /// 题目总数（用于日志统计）
    pub fn total_questions(&self) -> usize {
        self.flashcards.len()
            + self.mcqs.len()
            + self.matching_questions.len()
            + self.true_false_questions.len()
            + self.fill_in_blanks_questions.len()
    }

    /// 全部分块失败时的兜底题目集
    ///
    /// 每类各放一条占位内容，保证调用方始终拿到可渲染的结果
    pub fn fallback_default() -> Self {
        Self {
            flashcards: vec![Flashcard {
                question: "本文档讲述的主要内容是什么？".to_string(),
                answer: "生成失败，请重新上传文档或稍后重试。".to_string(),
            }],
            mcqs: vec![Mcq {
                question: "以下关于本文档的说法，正确的是？".to_string(),
                options: vec![
                    "题目生成暂时不可用".to_string(),
                    "请稍后重试".to_string(),
                    "可尝试重新上传文档".to_string(),
                    "以上都对".to_string(),
                ],
                correct_answer: 3,
            }],
            matching_questions: vec![MatchingQuestion {
                id: 1,
                question: "请将左侧项与右侧项配对".to_string(),
                left_items: vec!["文档".to_string(), "题目".to_string()],
                right_items: vec!["生成失败".to_string(), "请重试".to_string()],
                correct_matches: vec![0, 1],
            }],
            true_false_questions: vec![TrueFalseQuestion {
                id: 1,
                question: "本次题目生成已成功完成。".to_string(),
                is_true: false,
                explanation: Some("生成服务暂时不可用，以上为占位内容。".to_string()),
            }],
            fill_in_blanks_questions: vec![FillInBlanksQuestion {
                id: "fib-1".to_string(),
                question: "请补全句子".to_string(),
                text_with_blanks: "题目生成[BLANK_0]，请稍后重试。".to_string(),
                correct_answers: vec!["失败".to_string()],
                complete_text: "题目生成失败，请稍后重试。".to_string(),
                explanation: None,
                difficulty: None,
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_set_default_is_empty() {
        let set = QuestionSet::default();
        assert!(set.is_empty());
        assert_eq!(set.total_questions(), 0);
    }

    #[test]
    fn test_fallback_default_has_one_entry_per_category() {
        let set = QuestionSet::fallback_default();
        assert_eq!(set.flashcards.len(), 1);
        assert_eq!(set.mcqs.len(), 1);
        assert_eq!(set.matching_questions.len(), 1);
        assert_eq!(set.true_false_questions.len(), 1);
        assert_eq!(set.fill_in_blanks_questions.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_serde_field_names_are_camel_case() {
        let set = QuestionSet::fallback_default();
        let json = serde_json::to_value(&set).unwrap();

        assert!(json.get("matchingQuestions").is_some());
        assert!(json.get("trueFalseQuestions").is_some());
        assert!(json.get("fillInBlanksQuestions").is_some());
        assert!(json["mcqs"][0].get("correctAnswer").is_some());
        assert!(json["fillInBlanksQuestions"][0].get("textWithBlanks").is_some());
    }

    #[test]
    fn test_missing_categories_default_to_empty() {
        let set: QuestionSet =
            serde_json::from_str(r#"{"flashcards":[{"question":"q","answer":"a"}]}"#).unwrap();
        assert_eq!(set.flashcards.len(), 1);
        assert!(set.mcqs.is_empty());
        assert!(set.matching_questions.is_empty());
    }
}
