//! 分块处理流程 - 流程层
//!
//! 核心职责：定义"一个分块"的完整处理流程
//!
//! 流程顺序：
//! 1. 构建提示词 → 2. 查缓存 → 3. 带重试调用 LLM → 4. 解析 → 5. 写缓存

use tracing::{debug, info};

use crate::error::ChunkError;
use crate::models::{QuestionSet, Quantities};
use crate::services::{PromptBuilder, ResponseCache, ResponseParser, RetryPolicy, TextGenerator};
use crate::workflow::chunk_ctx::ChunkCtx;

/// 分块处理流程
///
/// - 编排单个分块从提示词到题目集的全过程
/// - 不持有任何资源，借用注入的缓存 / 重试策略 / 生成器
/// - 不出现 Vec<QuestionSet>，不关心兄弟分块
pub struct ChunkFlow<'a, G> {
    prompt_builder: PromptBuilder,
    parser: ResponseParser,
    cache: &'a ResponseCache,
    retry: &'a RetryPolicy,
    generator: &'a G,
}

impl<'a, G: TextGenerator> ChunkFlow<'a, G> {
    /// 创建新的分块处理流程
    pub fn new(cache: &'a ResponseCache, retry: &'a RetryPolicy, generator: &'a G) -> Self {
        Self {
            prompt_builder: PromptBuilder::new(),
            parser: ResponseParser::new(),
            cache,
            retry,
            generator,
        }
    }

    /// 处理单个分块
    ///
    /// 生成失败（重试耗尽）或解析失败均以 [`ChunkError`] 返回，
    /// 由编排层决定如何吸收
    pub async fn run(
        &self,
        chunk: &str,
        quantities: &Quantities,
        file_name: &str,
        file_type: &str,
        ctx: &ChunkCtx,
    ) -> Result<QuestionSet, ChunkError> {
        // ========== 步骤 1: 构建提示词 ==========
        let prompt = self
            .prompt_builder
            .build(chunk, quantities, file_name, file_type);
        let key = ResponseCache::key_for(&prompt);

        // ========== 步骤 2: 查缓存 ==========
        if let Some(hit) = self.cache.get(&key).await {
            info!("{} ✓ 命中缓存，跳过生成", ctx);
            return Ok(hit);
        }

        // ========== 步骤 3: 带重试调用 LLM ==========
        debug!("{} 提示词长度: {} 字符", ctx, prompt.chars().count());
        let raw = self
            .retry
            .run("LLM 生成", || self.generator.generate(&prompt))
            .await?;

        // ========== 步骤 4: 解析题目集 ==========
        let set = self.parser.parse(&raw)?;
        info!("{} ✓ 生成完成，共 {} 道题目", ctx, set.total_questions());

        // ========== 步骤 5: 写缓存 ==========
        self.cache.put(key, set.clone()).await;

        Ok(set)
    }
}
