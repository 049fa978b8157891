use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 队列/工作项契约错误
    Queue(QueueError),
    /// 任务执行错误
    Task(TaskError),
    /// 文件操作错误
    File(FileError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Queue(e) => write!(f, "队列错误: {}", e),
            AppError::Task(e) => write!(f, "任务错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Queue(e) => Some(e),
            AppError::Task(e) => Some(e),
            AppError::File(e) => Some(e),
        }
    }
}

/// 队列/工作项契约错误
///
/// 这一类错误是编程契约被违反的信号，对该条提交路径而言是致命的
#[derive(Debug)]
pub enum QueueError {
    /// 工作项的结果句柄被重复绑定
    HandleAlreadyAttached { line_number: usize },
    /// 在句柄绑定之前就尝试取结果
    HandleNotAttached { line_number: usize },
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::HandleAlreadyAttached { line_number } => {
                write!(f, "行 {} 的结果句柄已绑定，不能重复绑定", line_number)
            }
            QueueError::HandleNotAttached { line_number } => {
                write!(f, "行 {} 的结果句柄尚未绑定", line_number)
            }
        }
    }
}

impl std::error::Error for QueueError {}

/// 任务执行错误
///
/// 指任务本身没能跑完（崩溃、被取消），区别于任务正常返回 `Failure` 这种业务结果。
/// 结果句柄会缓存这类错误，因此需要 `Clone`
#[derive(Debug, Clone)]
pub enum TaskError {
    /// 任务在执行过程中崩溃
    Panicked { line_number: usize, message: String },
    /// 任务被取消
    Cancelled { line_number: usize },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskError::Panicked {
                line_number,
                message,
            } => {
                write!(f, "行 {} 的任务执行崩溃: {}", line_number, message)
            }
            TaskError::Cancelled { line_number } => {
                write!(f, "行 {} 的任务被取消", line_number)
            }
        }
    }
}

impl std::error::Error for TaskError {}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 文件不存在
    NotFound {
        path: String,
    },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::NotFound { path } => write!(f, "文件不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== 从常见错误类型转换 ==========

impl From<QueueError> for AppError {
    fn from(err: QueueError) -> Self {
        AppError::Queue(err)
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        AppError::Task(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件不存在错误
    pub fn file_not_found(path: impl Into<String>) -> Self {
        AppError::File(FileError::NotFound { path: path.into() })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
