//! 工作项 - 数据模型层
//!
//! 封装"文件中的一行及其执行生命周期"这一信息：
//! 行号、行内容不可变；结果句柄在提交时绑定一次，之后不可替换

use tokio::task::JoinHandle;

use crate::error::{AppResult, QueueError, TaskError};
use crate::models::outcome::ExecutionResult;

/// 任务结果句柄
///
/// 对任务最终结果的异步引用：
/// - `is_finished()` 非阻塞查询任务是否完成
/// - `result()` 阻塞等待并取回 `ExecutionResult`
///
/// 取回结果（包括取回失败）会被缓存，重复取回返回同样的值，
/// 不会重新执行任务
pub struct TaskHandle {
    join: Option<JoinHandle<ExecutionResult>>,
    cached: Option<Result<ExecutionResult, TaskError>>,
}

impl TaskHandle {
    pub(crate) fn new(join: JoinHandle<ExecutionResult>) -> Self {
        Self {
            join: Some(join),
            cached: None,
        }
    }

    /// 非阻塞检查任务是否已完成
    pub fn is_finished(&self) -> bool {
        if self.cached.is_some() {
            return true;
        }
        self.join.as_ref().is_some_and(|j| j.is_finished())
    }

    /// 阻塞等待任务完成并取回结果
    ///
    /// 任务正常跑完返回它的 `ExecutionResult`；任务本身崩溃或被取消
    /// 返回 `TaskError`（区别于任务返回 `Failure` 这种业务结果）
    pub async fn result(&mut self, line_number: usize) -> Result<ExecutionResult, TaskError> {
        if let Some(cached) = &self.cached {
            return cached.clone();
        }

        let retrieval = match self.join.take() {
            Some(join) => match join.await {
                Ok(res) => Ok(res),
                Err(e) if e.is_cancelled() => Err(TaskError::Cancelled { line_number }),
                Err(e) => Err(TaskError::Panicked {
                    line_number,
                    message: e.to_string(),
                }),
            },
            // join 被消费过就一定有缓存，这里只是兜底
            None => Err(TaskError::Panicked {
                line_number,
                message: "结果句柄已被消费".to_string(),
            }),
        };

        self.cached = Some(retrieval.clone());
        retrieval
    }
}

/// 工作项
///
/// 代表输入文件中的一行。由分发器为每一行创建，入队后由队列独占持有，
/// 直到被收集器分类（计入成功或失败）后销毁
pub struct WorkItem {
    /// 行号（从1开始）
    line_number: usize,
    /// 行内容（可以为空）
    line_text: String,
    /// 结果句柄，提交时绑定一次
    handle: Option<TaskHandle>,
}

impl WorkItem {
    /// 创建新的工作项
    pub fn new(line_number: usize, line_text: impl Into<String>) -> Self {
        Self {
            line_number,
            line_text: line_text.into(),
            handle: None,
        }
    }

    /// 行号（从1开始）
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 行内容
    pub fn line_text(&self) -> &str {
        &self.line_text
    }

    /// 绑定结果句柄
    ///
    /// 句柄只能绑定一次，重复绑定返回 `QueueError::HandleAlreadyAttached`
    pub fn attach_handle(&mut self, handle: TaskHandle) -> AppResult<()> {
        if self.handle.is_some() {
            return Err(QueueError::HandleAlreadyAttached {
                line_number: self.line_number,
            }
            .into());
        }
        self.handle = Some(handle);
        Ok(())
    }

    /// 非阻塞检查任务是否已完成
    ///
    /// 任意次调用都没有副作用；句柄尚未绑定时视为未完成
    pub fn poll_handle(&self) -> bool {
        self.handle.as_ref().is_some_and(TaskHandle::is_finished)
    }

    /// 阻塞等待任务完成并取回结果
    pub async fn await_result(&mut self) -> AppResult<ExecutionResult> {
        let line_number = self.line_number;
        match self.handle.as_mut() {
            Some(handle) => Ok(handle.result(line_number).await?),
            None => Err(QueueError::HandleNotAttached { line_number }.into()),
        }
    }
}

impl std::fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkItem")
            .field("line_number", &self.line_number)
            .field("line_text", &self.line_text)
            .field("handle_attached", &self.handle.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::time::Duration;
    use tokio::time::sleep;

    fn handle_of(join: JoinHandle<ExecutionResult>) -> TaskHandle {
        TaskHandle::new(join)
    }

    #[tokio::test]
    async fn test_attach_handle_twice_is_invalid_state() {
        let mut item = WorkItem::new(1, "hello");

        let first = handle_of(tokio::spawn(async { ExecutionResult::Success }));
        let second = handle_of(tokio::spawn(async { ExecutionResult::Success }));

        assert!(item.attach_handle(first).is_ok());

        match item.attach_handle(second) {
            Err(AppError::Queue(QueueError::HandleAlreadyAttached { line_number })) => {
                assert_eq!(line_number, 1);
            }
            other => panic!("应返回重复绑定错误，实际: {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_poll_unfinished_is_idempotent() {
        let mut item = WorkItem::new(3, "slow");
        let join = tokio::spawn(async {
            sleep(Duration::from_millis(200)).await;
            ExecutionResult::Success
        });
        item.attach_handle(handle_of(join)).unwrap();

        // 任意次非阻塞检查都不应有副作用
        for _ in 0..10 {
            assert!(!item.poll_handle());
        }

        let result = item.await_result().await.unwrap();
        assert_eq!(result, ExecutionResult::Success);
        assert!(item.poll_handle());
    }

    #[tokio::test]
    async fn test_await_result_without_handle_fails() {
        let mut item = WorkItem::new(7, "orphan");
        assert!(!item.poll_handle());

        match item.await_result().await {
            Err(AppError::Queue(QueueError::HandleNotAttached { line_number })) => {
                assert_eq!(line_number, 7);
            }
            other => panic!("应返回句柄未绑定错误，实际: {:?}", other.err()),
        }
    }

    async fn panicking_task() -> ExecutionResult {
        panic!("任务故意崩溃");
    }

    #[tokio::test]
    async fn test_panicked_task_result_is_cached() {
        let mut item = WorkItem::new(2, "boom");
        item.attach_handle(handle_of(tokio::spawn(panicking_task())))
            .unwrap();

        // 等任务真正跑完
        while !item.poll_handle() {
            sleep(Duration::from_millis(5)).await;
        }

        // 第一次取回失败
        let first = item.await_result().await;
        assert!(matches!(
            first,
            Err(AppError::Task(TaskError::Panicked { line_number: 2, .. }))
        ));

        // 重复取回返回同样的失败，不会重新执行
        let second = item.await_result().await;
        assert!(matches!(
            second,
            Err(AppError::Task(TaskError::Panicked { line_number: 2, .. }))
        ));
    }
}
