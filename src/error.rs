use thiserror::Error;

/// 单个分块处理过程中的错误
///
/// 这些错误在编排层被吸收：出错的分块按"贡献为空"处理，
/// 不会中断其余分块
#[derive(Debug, Error)]
pub enum ChunkError {
    /// LLM 调用重试耗尽
    #[error("LLM 生成失败（已尝试 {attempts} 次）: {source}")]
    Generation {
        attempts: usize,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 响应中无法提取出合法的题目集 JSON
    #[error("无法从 LLM 响应中解析题目集: {reason}")]
    Parse { reason: String },
}

/// 文档级处理错误
///
/// 只有全量失败才会传播到这一层
#[derive(Debug, Error)]
pub enum PipelineError {
    /// 文档正文为空（上游抽取应当已拦截，这里兜底校验）
    #[error("文档内容为空")]
    EmptyDocument,

    /// 所有分块全部失败，且没有任何可用数据
    #[error("全部 {total} 个分块处理失败")]
    AllChunksFailed {
        total: usize,
        errors: Vec<ChunkError>,
    },
}

/// 流水线结果类型
pub type PipelineResult<T> = Result<T, PipelineError>;
