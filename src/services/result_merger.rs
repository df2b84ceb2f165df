//! 结果合并服务 - 业务能力层
//!
//! 只负责"把多个分块的题目集并成一份"能力，不关心流程
//!
//! 合并规则：
//! 1. 各类别按分块提交顺序拼接
//! 2. 闪卡、单选题按题面文本去重（保留先出现的一条）
//! 3. 连线题、判断题重编号为 1 起的顺序 id，填空题重编号为 `fib-N`
//!    （分块内的 id 不具备全局唯一性，无条件重编）
//! 4. 各类别截断到文档级请求数量，保留列表前部
//!
//! 本服务从不报错：输入为空时输出全空题目集

use crate::models::{QuestionSet, Quantities};
use std::collections::HashSet;

/// 结果合并服务
pub struct ResultMerger;

impl ResultMerger {
    /// 创建新的结果合并服务
    pub fn new() -> Self {
        Self
    }

    /// 合并多个分块的题目集并按请求数量截断
    pub fn merge(&self, results: &[QuestionSet], limits: &Quantities) -> QuestionSet {
        let mut merged = QuestionSet::default();

        // 1. 按提交顺序拼接
        for set in results {
            merged.flashcards.extend(set.flashcards.iter().cloned());
            merged.mcqs.extend(set.mcqs.iter().cloned());
            merged
                .matching_questions
                .extend(set.matching_questions.iter().cloned());
            merged
                .true_false_questions
                .extend(set.true_false_questions.iter().cloned());
            merged
                .fill_in_blanks_questions
                .extend(set.fill_in_blanks_questions.iter().cloned());
        }

        // 2. 按题面去重（先出现者胜出，保持插入顺序）
        let mut seen = HashSet::new();
        merged
            .flashcards
            .retain(|card| seen.insert(card.question.clone()));

        let mut seen = HashSet::new();
        merged.mcqs.retain(|mcq| seen.insert(mcq.question.clone()));

        // 3. 以合并后（截断前）的位置重编号
        for (index, question) in merged.matching_questions.iter_mut().enumerate() {
            question.id = (index + 1) as u32;
        }
        for (index, question) in merged.true_false_questions.iter_mut().enumerate() {
            question.id = (index + 1) as u32;
        }
        for (index, question) in merged.fill_in_blanks_questions.iter_mut().enumerate() {
            question.id = format!("fib-{}", index + 1);
        }

        // 4. 截断到文档级请求数量
        merged.flashcards.truncate(limits.flashcards);
        merged.mcqs.truncate(limits.mcqs);
        merged.matching_questions.truncate(limits.matching);
        merged.true_false_questions.truncate(limits.true_false);
        merged.fill_in_blanks_questions.truncate(limits.fill_in_blanks);

        merged
    }
}

impl Default for ResultMerger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Flashcard, FillInBlanksQuestion, MatchingQuestion, Mcq, TrueFalseQuestion};

    fn flashcard(question: &str) -> Flashcard {
        Flashcard {
            question: question.to_string(),
            answer: format!("{} 的答案", question),
        }
    }

    fn mcq(question: &str) -> Mcq {
        Mcq {
            question: question.to_string(),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: 0,
        }
    }

    fn true_false(id: u32, question: &str) -> TrueFalseQuestion {
        TrueFalseQuestion {
            id,
            question: question.to_string(),
            is_true: true,
            explanation: None,
        }
    }

    fn matching(id: u32) -> MatchingQuestion {
        MatchingQuestion {
            id,
            question: "配对".to_string(),
            left_items: vec!["左".into()],
            right_items: vec!["右".into()],
            correct_matches: vec![0],
        }
    }

    fn fill_in_blanks(id: &str) -> FillInBlanksQuestion {
        FillInBlanksQuestion {
            id: id.to_string(),
            question: "补全".to_string(),
            text_with_blanks: "[BLANK_0]".to_string(),
            correct_answers: vec!["答案".into()],
            complete_text: "答案".to_string(),
            explanation: None,
            difficulty: None,
        }
    }

    fn limits() -> Quantities {
        Quantities {
            flashcards: 10,
            mcqs: 10,
            matching: 10,
            true_false: 10,
            fill_in_blanks: 10,
        }
    }

    #[test]
    fn test_merge_empty_input_yields_empty_set() {
        let merger = ResultMerger::new();
        let merged = merger.merge(&[], &limits());
        assert!(merged.is_empty());
    }

    #[test]
    fn test_dedup_keeps_earlier_chunk_entry() {
        let merger = ResultMerger::new();
        let chunk1 = QuestionSet {
            flashcards: vec![Flashcard {
                question: "重复题面".to_string(),
                answer: "来自分块1".to_string(),
            }],
            ..Default::default()
        };
        let chunk2 = QuestionSet {
            flashcards: vec![
                Flashcard {
                    question: "重复题面".to_string(),
                    answer: "来自分块2".to_string(),
                },
                flashcard("独有题面"),
            ],
            ..Default::default()
        };

        let merged = merger.merge(&[chunk1, chunk2], &limits());
        assert_eq!(merged.flashcards.len(), 2);
        assert_eq!(merged.flashcards[0].answer, "来自分块1");
        assert_eq!(merged.flashcards[1].question, "独有题面");
    }

    #[test]
    fn test_mcq_dedup_by_question_text() {
        let merger = ResultMerger::new();
        let chunk1 = QuestionSet {
            mcqs: vec![mcq("同一道题"), mcq("另一道题")],
            ..Default::default()
        };
        let chunk2 = QuestionSet {
            mcqs: vec![mcq("同一道题")],
            ..Default::default()
        };

        let merged = merger.merge(&[chunk1, chunk2], &limits());
        assert_eq!(merged.mcqs.len(), 2);
    }

    #[test]
    fn test_renumbering_is_sequential_and_positional() {
        let merger = ResultMerger::new();
        // 两个分块都使用了本地 id（互相冲突）
        let chunk1 = QuestionSet {
            matching_questions: vec![matching(1), matching(2)],
            true_false_questions: vec![true_false(1, "甲"), true_false(2, "乙")],
            fill_in_blanks_questions: vec![fill_in_blanks("fib-1")],
            ..Default::default()
        };
        let chunk2 = QuestionSet {
            matching_questions: vec![matching(1)],
            true_false_questions: vec![true_false(1, "丙")],
            fill_in_blanks_questions: vec![fill_in_blanks("fib-1")],
            ..Default::default()
        };

        let merged = merger.merge(&[chunk1, chunk2], &limits());

        let matching_ids: Vec<u32> = merged.matching_questions.iter().map(|q| q.id).collect();
        assert_eq!(matching_ids, vec![1, 2, 3]);

        let tf_ids: Vec<u32> = merged.true_false_questions.iter().map(|q| q.id).collect();
        assert_eq!(tf_ids, vec![1, 2, 3]);

        let fib_ids: Vec<String> = merged
            .fill_in_blanks_questions
            .iter()
            .map(|q| q.id.clone())
            .collect();
        assert_eq!(fib_ids, vec!["fib-1", "fib-2"]);
    }

    #[test]
    fn test_truncation_keeps_front_of_list() {
        let merger = ResultMerger::new();
        let chunk = QuestionSet {
            flashcards: (0..8).map(|i| flashcard(&format!("题 {}", i))).collect(),
            true_false_questions: (0..6).map(|i| true_false(9, &format!("判 {}", i))).collect(),
            ..Default::default()
        };
        let limits = Quantities {
            flashcards: 3,
            true_false: 2,
            ..limits()
        };

        let merged = merger.merge(&[chunk], &limits);
        assert_eq!(merged.flashcards.len(), 3);
        assert_eq!(merged.flashcards[0].question, "题 0");
        assert_eq!(merged.flashcards[2].question, "题 2");
        // 截断后保留的是重编号后的前两条
        assert_eq!(merged.true_false_questions.len(), 2);
        assert_eq!(merged.true_false_questions[1].id, 2);
    }
}
