//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次完整运行的调度，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (逐行分发 + 驱动收集)
//!     ↓
//! queue (核心：WorkerPool 并发执行 / ResultCollector 顺序分类)
//!     ↓
//! services (能力层：行处理 / warn 落盘)
//!     ↓
//! models (数据：WorkItem / TaskHandle / ExecutionResult / InputFormat)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排层只做调度和统计，不做具体业务判断
//! 2. **资源隔离**：只有编排层持有工作池和收集器
//! 3. **向下依赖**：orchestrator → queue → services → models

pub mod line_dispatcher;

pub use line_dispatcher::{App, RunReport};
