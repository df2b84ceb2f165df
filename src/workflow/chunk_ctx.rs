//! 分块处理上下文
//!
//! 封装"我正在处理哪个文档的第几个分块"这一信息

use std::fmt::Display;

/// 分块处理上下文
///
/// 包含处理单个分块所需的所有上下文信息
#[derive(Debug, Clone)]
pub struct ChunkCtx {
    /// 文档名
    pub document_name: String,

    /// 文档索引（仅用于日志显示）
    pub doc_index: usize,

    /// 分块在文档中的索引（从1开始）
    pub chunk_index: usize,

    /// 文档的分块总数
    pub chunk_count: usize,
}

impl ChunkCtx {
    /// 创建新的分块上下文
    pub fn new(
        document_name: String,
        doc_index: usize,
        chunk_index: usize,
        chunk_count: usize,
    ) -> Self {
        Self {
            document_name,
            doc_index,
            chunk_index,
            chunk_count,
        }
    }
}

impl Display for ChunkCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[文档 {} 分块 {}/{}]",
            self.doc_index, self.chunk_index, self.chunk_count
        )
    }
}
