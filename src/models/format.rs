//! 输入文件格式识别
//!
//! 只根据文件扩展名做一次性判断，在启动时选定，之后注入给分发器

use std::path::Path;

/// 输入文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// XML 文件（.xml）
    Xml,
    /// JSON 文件（.json）
    Json,
    /// 纯文本文件（其他扩展名或无扩展名）
    PlainText,
}

impl InputFormat {
    /// 根据文件扩展名识别格式
    ///
    /// 扩展名不区分大小写；识别不了的一律按纯文本处理
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("xml") => InputFormat::Xml,
            Some("json") => InputFormat::Json,
            _ => InputFormat::PlainText,
        }
    }

    /// 格式名称（用于日志显示）
    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::Xml => "XML",
            InputFormat::Json => "JSON",
            InputFormat::PlainText => "纯文本",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_by_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.xml")), InputFormat::Xml);
        assert_eq!(
            InputFormat::from_path(Path::new("b.json")),
            InputFormat::Json
        );
        assert_eq!(
            InputFormat::from_path(Path::new("c.txt")),
            InputFormat::PlainText
        );
        assert_eq!(
            InputFormat::from_path(Path::new("no_extension")),
            InputFormat::PlainText
        );
    }

    #[test]
    fn test_from_path_case_insensitive() {
        assert_eq!(
            InputFormat::from_path(Path::new("DATA.XML")),
            InputFormat::Xml
        );
        assert_eq!(
            InputFormat::from_path(Path::new("data.Json")),
            InputFormat::Json
        );
    }
}
