//! 警告写入服务 - 业务能力层
//!
//! 只负责"把失败的行写进 warn 文件"能力，不关心流程

use anyhow::Result;
use std::fs::OpenOptions;
use std::io::Write;
use tracing::debug;

use crate::models::WorkItem;

/// 警告写入服务
///
/// 职责：
/// - 把处理失败的行追加写入 warn 文件
/// - 只做落盘，不做统计和分类
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    /// 创建新的警告写入服务
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 写入单条失败记录
    pub fn write(&self, line_number: usize, line_text: &str) -> Result<()> {
        debug!(
            "写入警告: 行 {} | 内容长度: {}",
            line_number,
            line_text.len()
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)?;

        let warn_msg = format!("行 {} | 内容: {}\n", line_number, line_text);
        file.write_all(warn_msg.as_bytes())?;

        Ok(())
    }

    /// 批量写入失败的工作项
    pub fn write_all(&self, items: &[WorkItem]) -> Result<()> {
        for item in items {
            self.write(item.line_number(), item.line_text())?;
        }
        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
