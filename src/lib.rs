//! # Parallel File Processor
//!
//! 一个逐行读取文本文件、并发处理每行内容的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据模型层（Models）
//! - `models/` - 纯数据实体
//! - `WorkItem` - 一行输入及其执行生命周期
//! - `TaskHandle` - 任务结果的异步句柄（非阻塞查询 + 阻塞等待）
//! - `ExecutionResult` - 封闭的结果集合
//! - `InputFormat` - 按扩展名识别的输入格式
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单行
//! - `LineProcessor` - XML / JSON / 纯文本 行校验能力
//! - `WarnWriter` - 失败行落盘能力
//!
//! ### ③ 队列核心层（Queue）
//! - `queue/` - 唯一有并发协调和顺序保证的部分
//! - `WorkerPool` - 有界并发执行（惰性创建、提交不阻塞）
//! - `ResultCollector` - 队头阻塞式 FIFO 结果分类
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/` - 逐行分发、驱动收集、汇总统计
//! - `App` - 应用生命周期（初始化、运行、报告）
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod queue;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, QueueError, TaskError};
pub use models::{ExecutionResult, InputFormat, TaskHandle, WorkItem};
pub use orchestrator::{App, RunReport};
pub use queue::{ResultCollector, StuckHeadPolicy, WorkerPool};
pub use services::{LineProcessor, WarnWriter};
