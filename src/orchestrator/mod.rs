//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量文档处理器
//! - 管理应用生命周期（初始化、运行、落盘）
//! - 批量加载任务（Vec<GenerationJob>）
//! - 控制并发数量（Semaphore）
//! - 构建并持有进程级 ResponseCache
//! - 输出全局统计信息
//!
//! ### `document_processor` - 单个文档处理器
//! - 决定单次生成还是分块并行
//! - 摊分各类题目的请求数量
//! - 并发扇出所有分块（join_all，按提交顺序收集）
//! - 吸收单个分块的失败，聚合全量失败
//! - 合并、去重、重编号、截断
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<GenerationJob>)
//!     ↓
//! document_processor (处理单篇文档的 Vec<分块>)
//!     ↓
//! workflow::ChunkFlow (处理单个分块)
//!     ↓
//! services (能力层：splitter / prompt / cache / retry / llm / parser / merger)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：batch_processor 管批量，document_processor 管单篇
//! 2. **资源隔离**：只有编排层构建 ResponseCache 和 LlmService
//! 3. **向下依赖**：编排层 → workflow → services → models
//! 4. **无业务逻辑**：只做调度和统计，不做具体出题判断

pub mod batch_processor;
pub mod document_processor;

// 重新导出主要类型
pub use batch_processor::App;
pub use document_processor::DocumentProcessor;
