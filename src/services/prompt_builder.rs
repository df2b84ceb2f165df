//! 提示词构建服务 - 业务能力层
//!
//! 只负责"由分块和请求数量构建生成提示词"能力，不关心流程
//!
//! 输出必须是确定性的：相同输入得到逐字节相同的提示词，
//! 因为缓存键就是对提示词本身取哈希

use crate::models::Quantities;

/// 低于该字符数视为"极短输入"，改为让模型围绕主题补充教学内容
pub const VERY_SHORT_INPUT_THRESHOLD: usize = 200;

/// 提示词构建服务
///
/// 职责：
/// - 把分块正文、请求数量、文档信息拼装成一条生成提示词
/// - 向模型描述五类题目的 JSON 结构契约
/// - 不出现网络调用
pub struct PromptBuilder;

impl PromptBuilder {
    /// 创建新的提示词构建服务
    pub fn new() -> Self {
        Self
    }

    /// 构建生成提示词
    ///
    /// 相同的 (chunk, quantities, file_name, file_type) 必然产生相同的输出
    pub fn build(
        &self,
        chunk: &str,
        quantities: &Quantities,
        file_name: &str,
        file_type: &str,
    ) -> String {
        let short_input_note = if chunk.chars().count() < VERY_SHORT_INPUT_THRESHOLD {
            "\n【特别说明】\n提供的文本很短，仅凭原文不足以出题。请先判断文本的主题，再围绕该主题补充准确的教学知识来出题，不要只从原文抽取。\n"
        } else {
            ""
        };

        format!(
            r#"你是一名资深的教育内容出题专家。请根据下面的文档片段出题。

【文档信息】
文件名：{file_name}
文件类型：{file_type}

【出题数量】（必须严格等于以下数量，不多不少）
- 闪卡（flashcards）：{flashcards} 张
- 单选题（mcqs）：{mcqs} 道
- 连线题（matchingQuestions）：{matching} 道
- 判断题（trueFalseQuestions）：{true_false} 道
- 填空题（fillInBlanksQuestions）：{fill_in_blanks} 道
{short_input_note}
【输出格式】
只返回一个 JSON 对象，不要输出任何其他文字、不要使用 Markdown 代码块。JSON 结构如下：

{{
  "flashcards": [
    {{ "question": "问题", "answer": "答案" }}
  ],
  "mcqs": [
    {{ "question": "问题", "options": ["选项A", "选项B", "选项C", "选项D"], "correctAnswer": 0 }}
  ],
  "matchingQuestions": [
    {{ "id": 1, "question": "请配对", "leftItems": ["左1", "左2"], "rightItems": ["右1", "右2"], "correctMatches": [0, 1] }}
  ],
  "trueFalseQuestions": [
    {{ "id": 1, "question": "陈述句", "isTrue": true, "explanation": "可选的解释" }}
  ],
  "fillInBlanksQuestions": [
    {{ "id": "fib-1", "question": "请补全句子", "textWithBlanks": "水在[BLANK_0]摄氏度时沸腾。", "correctAnswers": ["100"], "completeText": "水在100摄氏度时沸腾。" }}
  ]
}}

【硬性要求】
1. mcqs 的 options 必须恰好 4 项，correctAnswer 是 options 的下标（从 0 开始）
2. matchingQuestions 的 correctMatches[i] 表示 leftItems[i] 对应的 rightItems 下标
3. fillInBlanksQuestions 的 textWithBlanks 使用 [BLANK_0]、[BLANK_1]…占位，correctAnswers 按占位序号排列
4. 题目语言与文档语言保持一致
5. 某类数量为 0 时，该键给空数组

【文档片段】
{chunk}"#,
            file_name = file_name,
            file_type = file_type,
            flashcards = quantities.flashcards,
            mcqs = quantities.mcqs,
            matching = quantities.matching,
            true_false = quantities.true_false,
            fill_in_blanks = quantities.fill_in_blanks,
            short_input_note = short_input_note,
            chunk = chunk,
        )
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quantities() -> Quantities {
        Quantities {
            flashcards: 4,
            mcqs: 2,
            matching: 1,
            true_false: 3,
            fill_in_blanks: 2,
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = PromptBuilder::new();
        let chunk = "光合作用将光能转化为化学能。".repeat(20);
        let a = builder.build(&chunk, &quantities(), "生物.pdf", "pdf");
        let b = builder.build(&chunk, &quantities(), "生物.pdf", "pdf");
        assert_eq!(a, b);
    }

    #[test]
    fn test_build_embeds_counts_and_chunk() {
        let builder = PromptBuilder::new();
        let chunk = "光合作用将光能转化为化学能。".repeat(20);
        let prompt = builder.build(&chunk, &quantities(), "生物.pdf", "pdf");

        assert!(prompt.contains("：4 张"));
        assert!(prompt.contains("（mcqs）：2 道"));
        assert!(prompt.contains("生物.pdf"));
        assert!(prompt.contains(&chunk));
        // 正常长度的输入不出现极短输入说明
        assert!(!prompt.contains("【特别说明】"));
    }

    #[test]
    fn test_very_short_input_adds_synthesis_note() {
        let builder = PromptBuilder::new();
        let prompt = builder.build("牛顿第二定律", &quantities(), "物理.txt", "txt");
        assert!(prompt.contains("【特别说明】"));
    }

    #[test]
    fn test_different_quantities_produce_different_prompts() {
        let builder = PromptBuilder::new();
        let chunk = "足够长的文档内容。".repeat(30);
        let a = builder.build(&chunk, &quantities(), "a.txt", "txt");
        let mut other = quantities();
        other.flashcards = 9;
        let b = builder.build(&chunk, &other, "a.txt", "txt");
        assert_ne!(a, b);
    }
}
