//! 工作池 - 队列核心层
//!
//! 负责并发执行提交上来的任务，并发数量由信号量收紧到配置的池大小。
//! `submit` 从不阻塞调用方：permit 的获取发生在任务内部，
//! 提交动作本身立即返回结果句柄

use std::future::Future;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{error, info, warn};

use crate::models::{ExecutionResult, TaskHandle};

/// 默认池大小（配置缺省或非正数时使用）
pub const DEFAULT_POOL_SIZE: usize = 4;

/// 池大小上限（超出时收紧，不报错）
pub const MAX_POOL_SIZE: usize = 10;

/// 把配置的池大小收紧到 `[1, MAX_POOL_SIZE]`
///
/// - 非正数（含环境变量解析出的负数）回退到默认值
/// - 超出上限收紧到上限，只打日志不报错
pub fn clamp_pool_size(requested: i64) -> usize {
    if requested <= 0 {
        info!(
            "📊 池大小配置为 {}，回退到默认值 {}",
            requested, DEFAULT_POOL_SIZE
        );
        DEFAULT_POOL_SIZE
    } else if requested > MAX_POOL_SIZE as i64 {
        warn!(
            "⚠️ 池大小 {} 超出上限，已收紧到 {}",
            requested, MAX_POOL_SIZE
        );
        MAX_POOL_SIZE
    } else {
        requested as usize
    }
}

/// 工作池
///
/// 职责：
/// - 并发执行提交的任务体，数量不超过 `pool_size`
/// - 信号量在首次提交时才创建，整个运行期复用
/// - 不提供优雅关闭：已提交的任务最终都会跑完即可
pub struct WorkerPool {
    pool_size: usize,
    semaphore: Option<Arc<Semaphore>>,
}

impl WorkerPool {
    /// 根据配置的池大小创建工作池（值会被收紧）
    pub fn new(requested_pool_size: i64) -> Self {
        Self {
            pool_size: clamp_pool_size(requested_pool_size),
            semaphore: None,
        }
    }

    /// 生效的池大小
    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// 惰性创建的并发信号量
    fn semaphore(&mut self) -> Arc<Semaphore> {
        let pool_size = self.pool_size;
        self.semaphore
            .get_or_insert_with(|| {
                info!("🚀 工作池已创建，并发数: {}", pool_size);
                Arc::new(Semaphore::new(pool_size))
            })
            .clone()
    }

    /// 提交一个任务体，返回它的结果句柄
    ///
    /// 提交动作立即返回，不等待任务开始执行；任务在拿到 permit 之后才真正跑
    pub fn submit<F>(&mut self, task: F) -> TaskHandle
    where
        F: Future<Output = ExecutionResult> + Send + 'static,
    {
        let semaphore = self.semaphore();

        let join = tokio::spawn(async move {
            let _permit = match semaphore.acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    // 信号量整个运行期都不会被关闭，这里只是兜底
                    error!("信号量获取失败: {}", e);
                    return ExecutionResult::Failure;
                }
            };
            task.await
        });

        TaskHandle::new(join)
    }
}
