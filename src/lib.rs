//! # Doc Question Gen
//!
//! 一个把文档正文变成题目集的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 模型层（Models）
//! - `models/` - 数据类型与任务加载
//! - `QuestionSet` - 五类题目的集合（闪卡 / 单选 / 连线 / 判断 / 填空）
//! - `Quantities` - 各类题目的请求数量（文档级与分块级）
//! - `GenerationJob` - TOML 任务文件的加载
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个分块
//! - `ChunkSplitter` - 段落/句子边界的分块能力
//! - `PromptBuilder` - 确定性提示词构建能力
//! - `ResponseCache` - 内容寻址缓存能力（过期清扫）
//! - `RetryPolicy` - 指数退避 + 抖动的重试能力
//! - `LlmService` - LLM 调用能力（TextGenerator 的生产实现）
//! - `ResponseParser` - 自由文本到题目集的解析能力
//! - `ResultMerger` - 去重 / 重编号 / 截断的合并能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个分块"的完整处理流程
//! - `ChunkCtx` - 上下文封装（文档名 + 分块索引）
//! - `ChunkFlow` - 流程编排（提示词 → 缓存 → 生成 → 解析）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量任务处理器，管理资源和并发
//! - `orchestrator/document_processor` - 单个文档处理器，扇出分块并合并
//!
//! ## 模块结构

pub mod config;
pub mod error;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{ChunkError, PipelineError, PipelineResult};
pub use models::{GenerationJob, Quantities, QuestionSet};
pub use orchestrator::{App, DocumentProcessor};
pub use services::{LlmService, ResponseCache, RetryPolicy, TextGenerator};
pub use workflow::{ChunkCtx, ChunkFlow};
