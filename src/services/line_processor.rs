//! 行处理服务 - 业务能力层
//!
//! 按输入格式校验单行内容，产出 `ExecutionResult`。
//! 格式在启动时选定一次，队列核心对具体是哪个格式完全无感——
//! 它只需要一个返回 `ExecutionResult` 的任务体

use crate::models::{ExecutionResult, InputFormat};

/// 行处理器
///
/// 职责：
/// - 只处理单行内容，不关心行号和流程
/// - 行校验通过返回 `Success`，未通过返回 `Failure`（业务结果，不是错误）
#[derive(Debug, Clone, Copy)]
pub struct LineProcessor {
    format: InputFormat,
}

impl LineProcessor {
    /// 创建指定格式的行处理器
    pub fn new(format: InputFormat) -> Self {
        Self { format }
    }

    /// 当前格式
    pub fn format(&self) -> InputFormat {
        self.format
    }

    /// 处理单行内容
    pub fn process(&self, line: &str) -> ExecutionResult {
        match self.format {
            InputFormat::PlainText => process_plain_line(line),
            InputFormat::Json => process_json_line(line),
            InputFormat::Xml => process_xml_line(line),
        }
    }
}

/// 纯文本行：空白行视为失败
fn process_plain_line(line: &str) -> ExecutionResult {
    if line.trim().is_empty() {
        ExecutionResult::Failure
    } else {
        ExecutionResult::Success
    }
}

/// JSON 行：必须能解析为一个 JSON 值
fn process_json_line(line: &str) -> ExecutionResult {
    if line.trim().is_empty() {
        return ExecutionResult::Failure;
    }
    match serde_json::from_str::<serde_json::Value>(line) {
        Ok(_) => ExecutionResult::Success,
        Err(_) => ExecutionResult::Failure,
    }
}

/// XML 行：必须是标签配平的 XML 片段
///
/// 只做轻量校验：开闭标签一一对应、自闭合标签直接跳过、
/// 声明（`<?...?>`）和注释（`<!...>`）不参与配平
fn process_xml_line(line: &str) -> ExecutionResult {
    if line.trim().is_empty() {
        return ExecutionResult::Failure;
    }
    if is_balanced_xml(line) {
        ExecutionResult::Success
    } else {
        ExecutionResult::Failure
    }
}

fn is_balanced_xml(line: &str) -> bool {
    let mut stack: Vec<&str> = Vec::new();
    let mut rest = line;
    let mut seen_tag = false;

    while let Some(start) = rest.find('<') {
        let Some(end_offset) = rest[start..].find('>') else {
            // 有 '<' 没有 '>'，不完整
            return false;
        };
        let token = &rest[start + 1..start + end_offset];
        rest = &rest[start + end_offset + 1..];

        if token.is_empty() {
            return false;
        }
        if token.starts_with('?') || token.starts_with('!') {
            continue;
        }

        seen_tag = true;
        if let Some(name) = token.strip_prefix('/') {
            // 闭合标签必须与栈顶配对
            if stack.pop() != Some(tag_name(name)) {
                return false;
            }
        } else if !token.ends_with('/') {
            stack.push(tag_name(token));
        }
    }

    seen_tag && stack.is_empty()
}

/// 去掉属性部分，只留标签名
fn tag_name(token: &str) -> &str {
    token
        .split(|c: char| c.is_whitespace())
        .next()
        .unwrap_or(token)
}
