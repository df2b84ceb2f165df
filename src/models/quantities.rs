use serde::{Deserialize, Serialize};

/// 各类题目的请求数量
///
/// 有两个层级的用法：
/// - 文档级：用户请求的总量
/// - 分块级：由 [`Quantities::per_chunk`] 按分块数摊分后的量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Quantities {
    pub flashcards: usize,
    pub mcqs: usize,
    pub matching: usize,
    pub true_false: usize,
    pub fill_in_blanks: usize,
}

impl Default for Quantities {
    fn default() -> Self {
        Self {
            flashcards: 10,
            mcqs: 5,
            matching: 2,
            true_false: 5,
            fill_in_blanks: 5,
        }
    }
}

impl Quantities {
    /// 是否全部为 0
    pub fn is_zero(&self) -> bool {
        self.flashcards == 0
            && self.mcqs == 0
            && self.matching == 0
            && self.true_false == 0
            && self.fill_in_blanks == 0
    }

    /// 计算每个分块应请求的数量
    ///
    /// 除连线题外均为向上取整，保证各分块之和 ≥ 文档级请求量，
    /// 超出部分由合并阶段截断。连线题取 `max(1, total / chunk_count)`，
    /// 使每个分块至少贡献一道连线题。
    pub fn per_chunk(&self, chunk_count: usize) -> Self {
        if chunk_count <= 1 {
            return *self;
        }
        Self {
            flashcards: self.flashcards.div_ceil(chunk_count),
            mcqs: self.mcqs.div_ceil(chunk_count),
            matching: (self.matching / chunk_count).max(1),
            true_false: self.true_false.div_ceil(chunk_count),
            fill_in_blanks: self.fill_in_blanks.div_ceil(chunk_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_chunk_single_chunk_is_unchanged() {
        let q = Quantities {
            flashcards: 10,
            mcqs: 5,
            matching: 2,
            true_false: 5,
            fill_in_blanks: 3,
        };
        assert_eq!(q.per_chunk(1), q);
        assert_eq!(q.per_chunk(0), q);
    }

    #[test]
    fn test_per_chunk_ceiling_division() {
        let q = Quantities {
            flashcards: 10,
            mcqs: 5,
            matching: 6,
            true_false: 7,
            fill_in_blanks: 1,
        };
        let per = q.per_chunk(3);
        assert_eq!(per.flashcards, 4); // ceil(10/3)
        assert_eq!(per.mcqs, 2); // ceil(5/3)
        assert_eq!(per.true_false, 3); // ceil(7/3)
        assert_eq!(per.fill_in_blanks, 1); // ceil(1/3)
    }

    #[test]
    fn test_per_chunk_sum_covers_total() {
        let q = Quantities {
            flashcards: 10,
            mcqs: 5,
            matching: 4,
            true_false: 9,
            fill_in_blanks: 2,
        };
        for chunks in 2..=6 {
            let per = q.per_chunk(chunks);
            assert!(per.flashcards * chunks >= q.flashcards);
            assert!(per.mcqs * chunks >= q.mcqs);
            assert!(per.true_false * chunks >= q.true_false);
            assert!(per.fill_in_blanks * chunks >= q.fill_in_blanks);
        }
    }

    #[test]
    fn test_per_chunk_matching_floor_with_minimum_one() {
        let q = Quantities {
            matching: 6,
            ..Default::default()
        };
        assert_eq!(q.per_chunk(4).matching, 1); // floor(6/4)=1
        assert_eq!(q.per_chunk(2).matching, 3); // floor(6/2)=3

        // 连线题即使请求量为 0，每个分块也会分到 1，
        // 最终由合并阶段截断回 0（现状行为，待与产品确认）
        let zero = Quantities {
            matching: 0,
            ..Default::default()
        };
        assert_eq!(zero.per_chunk(3).matching, 1);
    }

    #[test]
    fn test_serde_camel_case_keys() {
        let q: Quantities =
            serde_json::from_str(r#"{"flashcards":3,"trueFalse":2,"fillInBlanks":1}"#).unwrap();
        assert_eq!(q.flashcards, 3);
        assert_eq!(q.true_false, 2);
        assert_eq!(q.fill_in_blanks, 1);
        // 未提供的键走默认值
        assert_eq!(q.mcqs, Quantities::default().mcqs);
    }
}
