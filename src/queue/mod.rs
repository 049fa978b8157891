//! 队列核心层（Queue Core）
//!
//! ## 职责
//!
//! 本层是整个系统里唯一有并发协调和顺序保证的部分。
//!
//! ## 模块划分
//!
//! ### `worker_pool` - 工作池
//! - 并发执行任务体，并发数收紧到 `[1, 10]`
//! - 信号量在首次提交时惰性创建
//! - `submit` 从不阻塞调用方，立即返回结果句柄
//!
//! ### `result_collector` - 结果收集器
//! - 持有 FIFO 队列和失败项列表
//! - 队头阻塞式收集：严格按提交顺序分类结果
//! - 池内的乱序完成对外不可见
//!
//! ## 顺序保证
//!
//! ```text
//! 入队 --(工作池调度执行)--> 运行中 --(任务完成)--> 已完成
//! 已完成 --(收集器出队)--> 已分类{成功 | 失败}
//! ```
//!
//! 分类严格按 FIFO 提交顺序进行：第 2 项先跑完也必须等第 1 项
//! 分类之后才能被分类。
//!
//! ## 设计原则
//!
//! 1. **队列归收集器独占**：独占访问由 `&mut self` 在编译期保证，
//!    跨任务共享时在外层包 `Arc<tokio::sync::Mutex<_>>`
//! 2. **不取消、不重试**：任务提交后一定跑到结束，失败的项不自动重跑
//! 3. **收集从不阻塞在未完成的队头上**：先非阻塞检查，完成了才取结果

pub mod result_collector;
pub mod worker_pool;

pub use result_collector::{ResultCollector, StuckHeadPolicy};
pub use worker_pool::{WorkerPool, DEFAULT_POOL_SIZE, MAX_POOL_SIZE};
