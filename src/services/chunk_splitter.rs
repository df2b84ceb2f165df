//! 分块服务 - 业务能力层
//!
//! 只负责"把长文本切成有界分块"能力，不关心流程
//!
//! 切分策略：
//! 1. 优先按空行（段落边界）切分
//! 2. 单段超限时降级为按句末标点切分
//! 3. 单句仍超限时整句独立成块（宁可超限也不截断内容）

use regex::Regex;

/// 分块服务
///
/// 职责：
/// - 将文档正文切成不超过目标大小的分块
/// - 只处理字符串，不出现 QuestionSet
/// - 不关心流程顺序
pub struct ChunkSplitter {
    paragraph_re: Regex,
    sentence_re: Regex,
}

impl ChunkSplitter {
    /// 创建新的分块服务
    pub fn new() -> Self {
        Self {
            // 空行 = 段落边界（兼容 \r\n）
            paragraph_re: Regex::new(r"\r?\n\s*\n").expect("段落正则不合法"),
            // 一句 = 非句末字符串 + 可选的句末标点（中英文）
            sentence_re: Regex::new(r"[^.!?。！？]+[.!?。！？]*\s*").expect("句子正则不合法"),
        }
    }

    /// 将文本切分为分块
    ///
    /// 每个分块长度（字符数）不超过 `max_chunk_size`，
    /// 唯一的例外是单句本身超限，此时整句成块
    pub fn split(&self, text: &str, max_chunk_size: usize) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();

        for paragraph in self.paragraph_re.split(text) {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            // 单段超限：降级为句子级累积
            if char_len(paragraph) > max_chunk_size {
                flush(&mut buffer, &mut chunks);
                self.accumulate_sentences(paragraph, max_chunk_size, &mut buffer, &mut chunks);
                continue;
            }

            if !buffer.is_empty() && char_len(&buffer) + 2 + char_len(paragraph) > max_chunk_size {
                flush(&mut buffer, &mut chunks);
            }

            if !buffer.is_empty() {
                buffer.push_str("\n\n");
            }
            buffer.push_str(paragraph);
        }

        flush(&mut buffer, &mut chunks);
        chunks
    }

    /// 按句末标点把超长段落累积进缓冲区
    fn accumulate_sentences(
        &self,
        paragraph: &str,
        max_chunk_size: usize,
        buffer: &mut String,
        chunks: &mut Vec<String>,
    ) {
        for m in self.sentence_re.find_iter(paragraph) {
            let sentence = m.as_str().trim();
            if sentence.is_empty() {
                continue;
            }

            // 单句超限：整句独立成块
            if char_len(sentence) > max_chunk_size {
                flush(buffer, chunks);
                chunks.push(sentence.to_string());
                continue;
            }

            if !buffer.is_empty() && char_len(buffer) + 1 + char_len(sentence) > max_chunk_size {
                flush(buffer, chunks);
            }

            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(sentence);
        }
    }
}

impl Default for ChunkSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn flush(buffer: &mut String, chunks: &mut Vec<String>) {
    if !buffer.is_empty() {
        chunks.push(std::mem::take(buffer));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_single_chunk() {
        let splitter = ChunkSplitter::new();
        let chunks = splitter.split("只有一个段落。", 100);
        assert_eq!(chunks, vec!["只有一个段落。"]);
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        let splitter = ChunkSplitter::new();
        assert!(splitter.split("", 100).is_empty());
        assert!(splitter.split("\n\n  \n\n", 100).is_empty());
    }

    #[test]
    fn test_paragraphs_accumulate_until_limit() {
        let splitter = ChunkSplitter::new();
        let p1 = "a".repeat(40);
        let p2 = "b".repeat(40);
        let p3 = "c".repeat(40);
        let text = format!("{}\n\n{}\n\n{}", p1, p2, p3);

        // 40 + 2 + 40 <= 100，前两段合为一块，第三段另起一块
        let chunks = splitter.split(&text, 100);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], format!("{}\n\n{}", p1, p2));
        assert_eq!(chunks[1], p3);
    }

    #[test]
    fn test_chunks_respect_size_bound() {
        let splitter = ChunkSplitter::new();
        let paragraphs: Vec<String> = (0..10).map(|i| format!("段落{}内容。", i).repeat(20)).collect();
        let text = paragraphs.join("\n\n");

        for chunk in splitter.split(&text, 300) {
            assert!(!chunk.is_empty());
            assert!(chunk.chars().count() <= 300, "分块超限: {}", chunk.chars().count());
        }
    }

    #[test]
    fn test_oversized_paragraph_splits_on_sentences() {
        let splitter = ChunkSplitter::new();
        // 单段 10 句，每句约 30 字符，段落总长远超 100
        let paragraph = (0..10)
            .map(|i| format!("这是第{}句，包含一些用来凑长度的文字内容。", i))
            .collect::<Vec<_>>()
            .join("");

        let chunks = splitter.split(&paragraph, 100);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 100);
        }
    }

    #[test]
    fn test_oversized_single_sentence_becomes_own_chunk() {
        let splitter = ChunkSplitter::new();
        let long_sentence = format!("{}。", "字".repeat(150));
        let text = format!("短句。{}后续短句。", long_sentence);

        let chunks = splitter.split(&text, 100);
        // 超长单句允许超限，但内容不能被截断
        assert!(chunks.iter().any(|c| c.chars().count() > 100));
        let joined: String = chunks.concat();
        assert!(joined.contains(&"字".repeat(150)));
    }
}
