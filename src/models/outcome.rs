//! 任务执行结果
//!
//! 一个封闭的结果集合：收集器只把 `Success` / `Failure` 当作终态分类，
//! `Started` / `Ended` 是过程性状态，收集逻辑会刻意忽略它们

use std::fmt;

/// 单行任务的执行结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionResult {
    /// 任务已开始（过程性状态，收集器忽略）
    Started,
    /// 任务成功
    Success,
    /// 任务失败（正常的业务结果，不是错误）
    Failure,
    /// 任务已结束（过程性状态，收集器忽略）
    Ended,
}

impl ExecutionResult {
    /// 是否为失败结果
    pub fn is_failure(&self) -> bool {
        matches!(self, ExecutionResult::Failure)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionResult::Started => "STARTED",
            ExecutionResult::Success => "SUCCESS",
            ExecutionResult::Failure => "FAILURE",
            ExecutionResult::Ended => "ENDED",
        };
        write!(f, "{}", name)
    }
}
