//! 单个文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块负责把一篇文档变成一份题目集，是文档级别的编排器。
//!
//! ## 核心功能
//!
//! 1. **模式决策**：短文档整体单次生成，长文档切分后并行生成
//! 2. **数量摊分**：把文档级请求数量摊到每个分块
//! 3. **并发扇出**：所有分块同时发起，按提交顺序收集结果
//! 4. **失败吸收**：单个分块失败按"贡献为空"处理，不中断其余分块
//! 5. **全量失败**：所有分块都失败且无任何数据时才向上报错
//! 6. **结果合并**：去重、重编号、截断到请求数量

use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{PipelineError, PipelineResult};
use crate::models::{QuestionSet, Quantities};
use crate::services::{ChunkSplitter, ResponseCache, ResultMerger, RetryPolicy, TextGenerator};
use crate::workflow::{ChunkCtx, ChunkFlow};

/// 单个文档处理器
///
/// 对上游生成能力 `G` 泛型：生产环境注入 `LlmService`，
/// 测试注入桩实现
pub struct DocumentProcessor<G> {
    config: Config,
    splitter: ChunkSplitter,
    merger: ResultMerger,
    retry: RetryPolicy,
    cache: Arc<ResponseCache>,
    generator: G,
}

impl<G: TextGenerator> DocumentProcessor<G> {
    /// 创建新的文档处理器
    ///
    /// 缓存由调用方构建并注入（进程内唯一实例，供所有文档共享）
    pub fn new(config: Config, cache: Arc<ResponseCache>, generator: G) -> Self {
        Self {
            retry: RetryPolicy::from_config(&config),
            splitter: ChunkSplitter::new(),
            merger: ResultMerger::new(),
            config,
            cache,
            generator,
        }
    }

    /// 处理一篇文档，总是返回可用的题目集
    ///
    /// 全量失败时退化为兜底占位题目集（产品决策：宁可返回占位内容，
    /// 也不给前端一个空响应）；只有正文为空才报错
    pub async fn process_document(
        &self,
        text: &str,
        quantities: &Quantities,
        file_name: &str,
        file_type: &str,
        doc_index: usize,
    ) -> PipelineResult<QuestionSet> {
        match self
            .process(text, quantities, file_name, file_type, doc_index)
            .await
        {
            Ok(set) => Ok(set),
            Err(PipelineError::AllChunksFailed { total, .. }) => {
                warn!(
                    "[文档 {}] ⚠️ 全部 {} 个分块失败，返回兜底题目集",
                    doc_index, total
                );
                Ok(QuestionSet::fallback_default())
            }
            Err(e) => Err(e),
        }
    }

    /// 文档处理主流程
    ///
    /// 与 [`Self::process_document`] 的区别：全量失败以
    /// [`PipelineError::AllChunksFailed`] 原样返回，不做兜底
    pub async fn process(
        &self,
        text: &str,
        quantities: &Quantities,
        file_name: &str,
        file_type: &str,
        doc_index: usize,
    ) -> PipelineResult<QuestionSet> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PipelineError::EmptyDocument);
        }

        // ========== 模式决策：短文档不分块 ==========
        let chunks = if text.chars().count() < self.config.short_input_threshold {
            info!("[文档 {}] 正文较短，整体单次生成", doc_index);
            vec![text.to_string()]
        } else {
            let chunks = self.splitter.split(text, self.config.max_chunk_size);
            info!(
                "[文档 {}] 正文切分为 {} 个分块（目标大小 {} 字符）",
                doc_index,
                chunks.len(),
                self.config.max_chunk_size
            );
            chunks
        };

        let chunk_count = chunks.len();
        let per_chunk = quantities.per_chunk(chunk_count);

        // ========== 并发扇出：所有分块同时发起 ==========
        let flow = ChunkFlow::new(&self.cache, &self.retry, &self.generator);
        let tasks = chunks.iter().enumerate().map(|(index, chunk)| {
            let ctx = ChunkCtx::new(file_name.to_string(), doc_index, index + 1, chunk_count);
            let flow = &flow;
            let per_chunk = &per_chunk;
            async move {
                flow.run(chunk, per_chunk, file_name, file_type, &ctx)
                    .await
            }
        });

        // join_all 保持提交顺序，合并阶段的"先出现者胜出"因此是确定性的
        let outcomes = join_all(tasks).await;

        // ========== 收集：失败分块按空集处理 ==========
        let mut collected = Vec::with_capacity(chunk_count);
        let mut errors = Vec::new();

        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(set) => collected.push(set),
                Err(e) => {
                    error!(
                        "[文档 {}] ❌ 分块 {}/{} 处理失败: {}",
                        doc_index,
                        index + 1,
                        chunk_count,
                        e
                    );
                    errors.push(e);
                    collected.push(QuestionSet::default());
                }
            }
        }

        // 全量失败：每个分块都报错且没有任何可用数据
        if !errors.is_empty()
            && errors.len() == chunk_count
            && collected.iter().all(|set| set.is_empty())
        {
            return Err(PipelineError::AllChunksFailed {
                total: chunk_count,
                errors,
            });
        }

        if !errors.is_empty() {
            warn!(
                "[文档 {}] ⚠️ {}/{} 个分块失败，以部分结果合并",
                doc_index,
                errors.len(),
                chunk_count
            );
        }

        // ========== 合并 ==========
        let merged = self.merger.merge(&collected, quantities);
        info!(
            "[文档 {}] ✓ 合并完成: 闪卡 {} 单选 {} 连线 {} 判断 {} 填空 {}",
            doc_index,
            merged.flashcards.len(),
            merged.mcqs.len(),
            merged.matching_questions.len(),
            merged.true_false_questions.len(),
            merged.fill_in_blanks_questions.len()
        );

        Ok(merged)
    }
}
