//! 结果收集器 - 队列核心层
//!
//! 严格按提交顺序（FIFO）分类每个工作项的结果。
//!
//! 收集遵循"队头阻塞"算法：只检查队头，队头没完成就结束本轮，
//! 后面的项即使已经完成也不提前出队。代价是一个慢任务会拖住
//! 它后面所有已完成的项，换来的是输出顺序与提交顺序严格一致

use std::collections::VecDeque;

use tracing::{debug, error, warn};

use crate::models::{ExecutionResult, WorkItem};

/// 队头结果取回失败时的处理策略
///
/// 取回失败指任务本身崩溃或被取消，此时队头既不能分类也不能重跑。
/// 默认保留原有行为：队头留在原地，收集循环会一直在它上面空转
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StuckHeadPolicy {
    /// 队头留在原地，每轮重试取回（默认；取回永远失败时循环不会前进）
    #[default]
    Spin,
    /// 把队头记入失败列表并出队，打日志后继续前进
    DropAndLog,
}

/// 结果收集器
///
/// 职责：
/// - 持有 FIFO 队列和失败项列表
/// - 每轮只从队头开始收集，保证分类顺序与提交顺序一致
/// - `Failure` 记入失败列表；`Success` / `Started` / `Ended` 直接丢弃
///   （成功数由"不在失败列表中"隐含给出）
pub struct ResultCollector {
    queue: VecDeque<WorkItem>,
    failed_items: Vec<WorkItem>,
    classified: usize,
    policy: StuckHeadPolicy,
}

impl ResultCollector {
    /// 创建新的结果收集器（默认策略：队头空转）
    pub fn new() -> Self {
        Self::with_policy(StuckHeadPolicy::default())
    }

    /// 使用指定的队头卡死策略创建
    pub fn with_policy(policy: StuckHeadPolicy) -> Self {
        Self {
            queue: VecDeque::new(),
            failed_items: Vec::new(),
            classified: 0,
            policy,
        }
    }

    /// 把工作项追加到队尾
    pub fn enqueue(&mut self, item: WorkItem) {
        self.queue.push_back(item);
    }

    /// 队列中是否还有未分类的项
    pub fn has_queued_items(&self) -> bool {
        !self.queue.is_empty()
    }

    /// 队列中未分类项的数量
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// 执行一轮收集，返回本轮分类的项数
    ///
    /// 算法：
    /// 1. 看队头；队列为空则结束本轮
    /// 2. 队头未完成则结束本轮，不检查后面的项
    /// 3. 队头已完成：取回结果，出队并分类
    /// 4. 取回失败：按 `StuckHeadPolicy` 处理，`Spin` 时队头原地保留，
    ///    留给下一轮重试（不重新提交任务）
    /// 5. 队头持续完成时连续收集，直到遇到未完成的队头或队列清空
    pub async fn collect_pass(&mut self) -> usize {
        let mut drained = 0;

        loop {
            let head_finished = match self.queue.front() {
                None => break,
                Some(head) => head.poll_handle(),
            };
            if !head_finished {
                break;
            }

            let retrieval = match self.queue.front_mut() {
                Some(head) => head.await_result().await,
                None => break,
            };

            match retrieval {
                Ok(result) => {
                    let Some(item) = self.queue.pop_front() else {
                        break;
                    };
                    self.classify(item, result);
                    drained += 1;
                }
                Err(e) => {
                    error!("❌ 队头结果取回失败: {}", e);
                    match self.policy {
                        StuckHeadPolicy::Spin => {
                            // 队头保留，本轮到此为止
                            break;
                        }
                        StuckHeadPolicy::DropAndLog => {
                            let Some(item) = self.queue.pop_front() else {
                                break;
                            };
                            warn!(
                                "⚠️ 按配置丢弃无法取回结果的队头: 行 {}",
                                item.line_number()
                            );
                            self.classified += 1;
                            self.failed_items.push(item);
                            drained += 1;
                        }
                    }
                }
            }
        }

        drained
    }

    fn classify(&mut self, item: WorkItem, result: ExecutionResult) {
        self.classified += 1;
        match result {
            ExecutionResult::Failure => {
                warn!("⚠️ 行 {} 处理失败", item.line_number());
                self.failed_items.push(item);
            }
            // Started / Ended 是过程性状态，和 Success 一样不记录
            ExecutionResult::Success | ExecutionResult::Started | ExecutionResult::Ended => {
                debug!("✓ 行 {} 分类为 {}", item.line_number(), result);
            }
        }
    }

    /// 失败的工作项列表
    pub fn failed_items(&self) -> &[WorkItem] {
        &self.failed_items
    }

    /// 失败项数量
    pub fn failed_count(&self) -> usize {
        self.failed_items.len()
    }

    /// 已分类的项总数
    pub fn classified_count(&self) -> usize {
        self.classified
    }
}

impl Default for ResultCollector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::worker_pool::WorkerPool;
    use std::time::Duration;
    use tokio::time::sleep;

    fn enqueue_task<F>(pool: &mut WorkerPool, collector: &mut ResultCollector, line: usize, task: F)
    where
        F: std::future::Future<Output = ExecutionResult> + Send + 'static,
    {
        let mut item = WorkItem::new(line, format!("第 {} 行", line));
        item.attach_handle(pool.submit(task)).unwrap();
        collector.enqueue(item);
    }

    #[tokio::test]
    async fn test_empty_queue_pass_is_noop() {
        let mut collector = ResultCollector::new();
        assert_eq!(collector.collect_pass().await, 0);
        assert!(!collector.has_queued_items());
        assert_eq!(collector.failed_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_head_of_line_blocking() {
        let mut pool = WorkerPool::new(4);
        let mut collector = ResultCollector::new();

        // 第 1 项很慢，第 2 项很快
        enqueue_task(&mut pool, &mut collector, 1, async {
            sleep(Duration::from_millis(200)).await;
            ExecutionResult::Success
        });
        enqueue_task(&mut pool, &mut collector, 2, async {
            ExecutionResult::Success
        });

        // 等第 2 项完成，第 1 项还没完
        sleep(Duration::from_millis(50)).await;

        // 队头未完成时，后面已完成的项也不能被分类
        assert_eq!(collector.collect_pass().await, 0);
        assert_eq!(collector.queued_len(), 2);

        // 队头完成后一轮收完
        sleep(Duration::from_millis(250)).await;
        assert_eq!(collector.collect_pass().await, 2);
        assert!(!collector.has_queued_items());
        assert_eq!(collector.classified_count(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_only_failure_is_recorded() {
        let mut pool = WorkerPool::new(4);
        let mut collector = ResultCollector::new();

        enqueue_task(&mut pool, &mut collector, 1, async {
            ExecutionResult::Success
        });
        enqueue_task(&mut pool, &mut collector, 2, async {
            ExecutionResult::Failure
        });
        enqueue_task(&mut pool, &mut collector, 3, async {
            ExecutionResult::Started
        });
        enqueue_task(&mut pool, &mut collector, 4, async {
            ExecutionResult::Ended
        });

        while collector.has_queued_items() {
            collector.collect_pass().await;
            sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(collector.classified_count(), 4);
        assert_eq!(collector.failed_count(), 1);
        assert_eq!(collector.failed_items()[0].line_number(), 2);
    }

    async fn panicking_task() -> ExecutionResult {
        panic!("任务故意崩溃");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_spin_policy_keeps_stuck_head() {
        let mut pool = WorkerPool::new(2);
        let mut collector = ResultCollector::new();

        enqueue_task(&mut pool, &mut collector, 1, panicking_task());

        // 等任务崩溃落定
        sleep(Duration::from_millis(50)).await;

        // 取回失败时队头留在原地，多轮收集都不前进
        assert_eq!(collector.collect_pass().await, 0);
        assert_eq!(collector.collect_pass().await, 0);
        assert_eq!(collector.queued_len(), 1);
        assert_eq!(collector.failed_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_drop_and_log_policy_discards_stuck_head() {
        let mut pool = WorkerPool::new(2);
        let mut collector = ResultCollector::with_policy(StuckHeadPolicy::DropAndLog);

        enqueue_task(&mut pool, &mut collector, 1, panicking_task());
        enqueue_task(&mut pool, &mut collector, 2, async {
            ExecutionResult::Success
        });

        sleep(Duration::from_millis(50)).await;

        while collector.has_queued_items() {
            collector.collect_pass().await;
            sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(collector.classified_count(), 2);
        assert_eq!(collector.failed_count(), 1);
        assert_eq!(collector.failed_items()[0].line_number(), 1);
    }
}
