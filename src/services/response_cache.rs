//! 响应缓存服务 - 业务能力层
//!
//! 只负责"按内容哈希缓存题目集"能力，不关心流程
//!
//! 键 = 提示词全文的 SHA-256 十六进制摘要。提示词构建是确定性的，
//! 所以相同的 (分块, 数量, 文件名, 文件类型) 必然命中同一条目。
//! 回收只做过期清扫，不做 LRU。

use crate::models::QuestionSet;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

/// 缓存条目
#[derive(Clone)]
struct CacheEntry {
    created_at: Instant,
    set: QuestionSet,
}

/// 响应缓存服务
///
/// 职责：
/// - get/put 题目集，按创建时间过期
/// - 条目数超限时清扫全部过期条目
/// - 支持并行分块任务并发读写
///
/// 生命周期：进程启动时构建一次，注入到使用方；
/// 相同键并发写入时后写覆盖（内容哈希相同意味着逻辑请求相同）
pub struct ResponseCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    expiry: Duration,
    max_entries: usize,
}

impl ResponseCache {
    /// 创建新的响应缓存
    pub fn new(expiry: Duration, max_entries: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            expiry,
            max_entries,
        }
    }

    /// 按配置创建（24 小时过期 / 100 条清扫阈值为默认值）
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            Duration::from_secs(config.cache_expiry_secs),
            config.cache_max_entries,
        )
    }

    /// 计算提示词的缓存键
    pub fn key_for(prompt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(prompt.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// 读取缓存，过期条目视为不存在
    pub async fn get(&self, key: &str) -> Option<QuestionSet> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if entry.created_at.elapsed() > self.expiry {
            debug!("缓存条目已过期: {}", &key[..12.min(key.len())]);
            return None;
        }
        Some(entry.set.clone())
    }

    /// 写入缓存，条目数超限时清扫过期条目
    pub async fn put(&self, key: String, set: QuestionSet) {
        let mut entries = self.entries.write().await;
        entries.insert(
            key,
            CacheEntry {
                created_at: Instant::now(),
                set,
            },
        );

        if entries.len() > self.max_entries {
            let before = entries.len();
            let expiry = self.expiry;
            entries.retain(|_, entry| entry.created_at.elapsed() <= expiry);
            debug!("缓存清扫: {} -> {} 条", before, entries.len());
        }
    }

    /// 当前条目数（含未清扫的过期条目）
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
