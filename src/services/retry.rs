//! 重试策略 - 业务能力层
//!
//! 只负责"带退避的重复尝试"能力，不关心被重试的是什么调用。
//! 所有对上游的调用统一经过这里，不在各调用点各写一套重试循环。

use crate::error::ChunkError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// 重试策略
///
/// 指数退避：首次失败后等待 `base_delay`，之后每次乘以 `factor`，
/// 上限 `max_delay`；实际等待前再乘以 [jitter_low, jitter_high] 内的
/// 随机系数。成功但内容不合法的响应不在此处重试。
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大尝试次数（含首次）
    pub max_attempts: usize,
    /// 首次重试前的等待
    pub base_delay: Duration,
    /// 退避倍率
    pub factor: f64,
    /// 等待上限
    pub max_delay: Duration,
    /// 抖动系数区间
    pub jitter_low: f64,
    pub jitter_high: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            factor: 2.0,
            max_delay: Duration::from_millis(5000),
            jitter_low: 0.85,
            jitter_high: 1.15,
        }
    }
}

impl RetryPolicy {
    /// 按配置创建
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self {
            max_attempts: config.retry_max_attempts,
            base_delay: Duration::from_millis(config.retry_base_delay_ms),
            max_delay: Duration::from_millis(config.retry_max_delay_ms),
            ..Self::default()
        }
    }

    /// 反复执行 `op` 直到成功或尝试耗尽
    ///
    /// 耗尽后返回携带最后一次错误的 [`ChunkError::Generation`]
    pub async fn run<T, F, Fut>(&self, op_name: &str, mut op: F) -> Result<T, ChunkError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut delay = self.base_delay;
        let mut attempt = 0usize;

        loop {
            attempt += 1;

            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!("✓ {} 在第 {} 次尝试成功", op_name, attempt);
                    }
                    return Ok(value);
                }
                Err(e) => {
                    if attempt >= self.max_attempts {
                        warn!("❌ {} 重试耗尽（{} 次）: {}", op_name, attempt, e);
                        return Err(ChunkError::Generation {
                            attempts: attempt,
                            source: e.into(),
                        });
                    }

                    let jitter = rand::thread_rng().gen_range(self.jitter_low..=self.jitter_high);
                    let sleep_for = delay.mul_f64(jitter);
                    warn!(
                        "⚠️ {} 第 {} 次尝试失败: {}，{}ms 后重试",
                        op_name,
                        attempt,
                        e,
                        sleep_for.as_millis()
                    );

                    tokio::time::sleep(sleep_for).await;

                    delay = delay.mul_f64(self.factor).min(self.max_delay);
                }
            }
        }
    }
}
