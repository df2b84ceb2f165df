//! 批量文档处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量文档的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：启动日志、构建缓存、创建 LLM 服务
//! 2. **批量加载**：扫描并加载所有待处理的任务（`Vec<GenerationJob>`）
//! 3. **并发控制**：使用 Semaphore 限制并发数量
//! 4. **分批处理**：将任务分批次处理，每批完成后再开始下一批
//! 5. **结果落盘**：每份题目集写入输出目录（JSON）
//! 6. **全局统计**：汇总所有文档的处理结果
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单个文档的细节
//! - **资源所有者**：唯一持有 ResponseCache 构建权的模块
//! - **并发安全**：通过 Semaphore 和 tokio::spawn 实现并发
//! - **向下委托**：委托 document_processor 处理单个文档

use crate::config::Config;
use crate::models::{load_all_job_files, GenerationJob};
use crate::orchestrator::document_processor::DocumentProcessor;
use crate::services::{LlmService, ResponseCache};
use crate::utils::logging::init_log_file;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    processor: Arc<DocumentProcessor<LlmService>>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup(&config);

        // 构建进程级缓存与 LLM 服务
        let cache = Arc::new(ResponseCache::from_config(&config));
        let generator = LlmService::new(&config);
        let processor = Arc::new(DocumentProcessor::new(config.clone(), cache, generator));

        Ok(Self { config, processor })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待处理的任务
        let all_jobs = self.load_jobs().await?;

        if all_jobs.is_empty() {
            warn!("⚠️ 没有找到待处理的TOML任务文件，程序结束");
            return Ok(());
        }

        // 准备输出目录
        tokio::fs::create_dir_all(&self.config.output_folder)
            .await
            .with_context(|| format!("无法创建输出目录: {}", self.config.output_folder))?;

        let total_jobs = all_jobs.len();
        log_jobs_loaded(total_jobs, self.config.max_concurrent_documents);

        // 处理所有任务
        let stats = self.process_all_jobs(all_jobs).await?;

        // 输出最终统计
        print_final_stats(&stats, &self.config);

        Ok(())
    }

    /// 加载任务
    async fn load_jobs(&self) -> Result<Vec<GenerationJob>> {
        info!("\n📁 正在扫描待处理的任务...");
        load_all_job_files(&self.config.jobs_folder).await
    }

    /// 处理所有任务
    async fn process_all_jobs(&self, all_jobs: Vec<GenerationJob>) -> Result<ProcessingStats> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_documents));
        let total_jobs = all_jobs.len();
        let mut stats = ProcessingStats {
            total: total_jobs,
            ..Default::default()
        };

        // 分批处理
        for batch_start in (0..total_jobs).step_by(self.config.max_concurrent_documents) {
            let batch_end = (batch_start + self.config.max_concurrent_documents).min(total_jobs);
            let batch_jobs = &all_jobs[batch_start..batch_end];
            let batch_num = (batch_start / self.config.max_concurrent_documents) + 1;
            let total_batches = total_jobs.div_ceil(self.config.max_concurrent_documents);

            log_batch_start(
                batch_num,
                total_batches,
                batch_start + 1,
                batch_end,
                total_jobs,
            );

            // 处理本批
            let batch_result = self
                .process_batch(batch_jobs, batch_start, semaphore.clone())
                .await?;

            stats.success += batch_result.success;
            stats.failed += batch_result.failed;

            log_batch_complete(batch_num, &batch_result);
        }

        Ok(stats)
    }

    /// 处理单个批次
    async fn process_batch(
        &self,
        batch_jobs: &[GenerationJob],
        batch_start: usize,
        semaphore: Arc<Semaphore>,
    ) -> Result<BatchResult> {
        let mut batch_handles = Vec::new();

        // 为本批创建并发任务
        for (idx, job) in batch_jobs.iter().enumerate() {
            let doc_index = batch_start + idx + 1;
            let permit = semaphore.clone().acquire_owned().await?;

            let processor = self.processor.clone();
            let job = job.clone();
            let output_folder = self.config.output_folder.clone();

            let handle = tokio::spawn(async move {
                let _permit = permit;
                match process_job(&processor, &job, doc_index, &output_folder).await {
                    Ok(()) => Ok(()),
                    Err(e) => {
                        error!("[文档 {}] ❌ 处理过程中发生错误: {}", doc_index, e);
                        Err(e)
                    }
                }
            });
            batch_handles.push((doc_index, handle));
        }

        // 等待本批所有任务完成
        let mut result = BatchResult::default();

        for (doc_index, handle) in batch_handles {
            match handle.await {
                Ok(Ok(())) => {
                    result.success += 1;
                }
                Ok(Err(_)) => {
                    result.failed += 1;
                }
                Err(e) => {
                    error!("[文档 {}] 任务执行失败: {}", doc_index, e);
                    result.failed += 1;
                }
            }
        }

        Ok(result)
    }
}

/// 处理单个任务：取正文 → 生成题目集 → 写输出文件
async fn process_job(
    processor: &DocumentProcessor<LlmService>,
    job: &GenerationJob,
    doc_index: usize,
    output_folder: &str,
) -> Result<()> {
    info!("[文档 {}] 开始处理: {}", doc_index, job.name);

    let text = job.resolve_text().await?;

    let set = processor
        .process_document(&text, &job.quantities, &job.name, &job.file_type, doc_index)
        .await?;

    // 落盘输出
    let output_path = Path::new(output_folder).join(format!("{}.json", job.name));
    let json = serde_json::to_string_pretty(&set)?;
    tokio::fs::write(&output_path, json)
        .await
        .with_context(|| format!("无法写入输出文件: {}", output_path.display()))?;

    info!(
        "[文档 {}] ✅ 已输出 {} 道题目 -> {}",
        doc_index,
        set.total_questions(),
        output_path.display()
    );

    Ok(())
}

/// 处理统计
#[derive(Debug, Default)]
pub struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

/// 批次处理结果
#[derive(Debug, Default)]
struct BatchResult {
    success: usize,
    failed: usize,
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 文档出题流水线");
    info!("📊 最大并发数: {}", config.max_concurrent_documents);
    info!("🤖 模型: {}", config.llm_model_name);
    info!("{}", "=".repeat(60));
}

fn log_jobs_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 找到 {} 个待处理的任务", total);
    info!("📋 将以每批 {} 个的方式处理", max_concurrent);
    info!("💡 每批完成后再开始下一批\n");
}

fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批任务: {}-{} / 共 {} 个", start, end, total);
    info!("{}", "=".repeat(60));
}

fn log_batch_complete(batch_num: usize, result: &BatchResult) {
    info!("\n{}", "─".repeat(60));
    info!(
        "✓ 第 {} 批完成: 成功 {}/{}",
        batch_num,
        result.success,
        result.success + result.failed
    );
    info!("{}", "─".repeat(60));
}

fn print_final_stats(stats: &ProcessingStats, config: &Config) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", stats.success, stats.total);
    info!("❌ 失败: {}", stats.failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", config.output_log_file);
}
