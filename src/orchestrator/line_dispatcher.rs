//! 行分发器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整运行的编排和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：识别输入格式、创建工作池和收集器
//! 2. **逐行分发**：顺序读取输入文件，为每行创建工作项并提交
//! 3. **驱动收集**：以固定间隔反复调用收集器，直到队列清空
//! 4. **全局统计**：汇总分类结果，把失败的行落盘到 warn 文件
//!
//! ## 设计特点
//!
//! - **顶层编排**：不处理单行的业务细节（委托给 services）
//! - **单控制流**：分发和收集在同一个控制任务上交替进行
//! - **向下委托**：并发协调全部交给 queue 层

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::sleep;
use tracing::{error, info};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{InputFormat, WorkItem};
use crate::queue::{ResultCollector, WorkerPool};
use crate::services::{LineProcessor, WarnWriter};
use crate::utils::logging;

/// 一次完整运行的统计结果
#[derive(Debug, Clone, Copy, Default)]
pub struct RunReport {
    /// 读取的总行数
    pub total_lines: usize,
    /// 已分类的项数
    pub classified: usize,
    /// 成功数
    pub success: usize,
    /// 失败数
    pub failed: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    processor: LineProcessor,
    pool: WorkerPool,
    collector: ResultCollector,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Self {
        let format = InputFormat::from_path(Path::new(&config.input_file));

        logging::log_startup(&config, format);

        Self {
            processor: LineProcessor::new(format),
            pool: WorkerPool::new(config.pool_size),
            collector: ResultCollector::with_policy(config.stuck_head_policy),
            config,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<RunReport> {
        // 逐行读取并分发
        let total_lines = self.dispatch_all_lines().await?;

        if total_lines == 0 {
            info!("⚠️ 输入文件为空，没有需要处理的行");
        }

        // 以固定间隔驱动收集，直到队列清空
        self.drain_queue().await;

        // 汇总统计并落盘失败的行
        let report = self.build_report(total_lines);
        self.write_warn_file(&report)?;

        logging::print_final_stats(&report, &self.config.warn_file);

        Ok(report)
    }

    /// 顺序读取输入文件，为每行创建工作项并提交
    ///
    /// 读到流结束即终止分发，之后不再创建工作项
    async fn dispatch_all_lines(&mut self) -> Result<usize> {
        let path = self.config.input_file.clone();

        let file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!("❌ 找不到文件: '{}'，请检查输入后重试", path);
                return Err(AppError::file_not_found(path).into());
            }
            Err(e) => return Err(AppError::file_read_failed(path, e).into()),
        };
        info!("✓ 成功打开文件: '{}'", path);

        let mut lines = BufReader::new(file).lines();
        let mut line_number = 0;

        loop {
            let line = match lines.next_line().await {
                Ok(line) => line,
                Err(e) => {
                    error!("❌ 读取文件第 {} 行失败", line_number + 1);
                    return Err(AppError::file_read_failed(path, e).into());
                }
            };
            match line {
                Some(text) => {
                    line_number += 1;
                    self.dispatch_line(line_number, text)?;
                }
                None => {
                    info!("✓ 文件读取完成，共 {} 行", line_number);
                    break;
                }
            }
        }

        Ok(line_number)
    }

    /// 把一行包装成工作项：提交任务体、绑定句柄、入队
    fn dispatch_line(&mut self, line_number: usize, line_text: String) -> Result<()> {
        if self.config.verbose_logging {
            info!("📄 分发第 {} 行", line_number);
        }

        let mut item = WorkItem::new(line_number, line_text);

        let processor = self.processor;
        let text = item.line_text().to_string();
        let handle = self.pool.submit(async move { processor.process(&text) });

        item.attach_handle(handle)?;
        self.collector.enqueue(item);
        Ok(())
    }

    /// 固定间隔轮询收集器，直到队列清空
    async fn drain_queue(&mut self) {
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        while self.collector.has_queued_items() {
            self.collector.collect_pass().await;
            if self.collector.has_queued_items() {
                sleep(interval).await;
            }
        }
    }

    fn build_report(&self, total_lines: usize) -> RunReport {
        let classified = self.collector.classified_count();
        let failed = self.collector.failed_count();
        RunReport {
            total_lines,
            classified,
            success: classified - failed,
            failed,
        }
    }

    /// 失败的行落盘到 warn 文件
    fn write_warn_file(&self, report: &RunReport) -> Result<()> {
        if report.failed == 0 {
            return Ok(());
        }
        let writer = WarnWriter::with_path(self.config.warn_file.clone());
        writer.write_all(self.collector.failed_items())?;
        Ok(())
    }

    /// 失败的工作项列表（供调用方记录或上报）
    pub fn failed_items(&self) -> &[WorkItem] {
        self.collector.failed_items()
    }
}
