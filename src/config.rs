use crate::queue::StuckHeadPolicy;

/// 程序配置文件
///
/// 由调用方在启动时显式构造并传入，不做进程级单例
#[derive(Clone, Debug)]
pub struct Config {
    /// 工作池并发数（原始配置值，由工作池收紧到 [1, 10]）
    pub pool_size: i64,
    /// 收集轮询间隔（毫秒）
    pub poll_interval_ms: u64,
    /// 待处理的输入文件（可被命令行 -f 覆盖）
    pub input_file: String,
    /// 失败行写入的警告文件
    pub warn_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 队头结果取回失败时的处理策略
    pub stuck_head_policy: StuckHeadPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_size: 4,
            poll_interval_ms: 50,
            input_file: "input.txt".to_string(),
            warn_file: "warn.txt".to_string(),
            verbose_logging: false,
            stuck_head_policy: StuckHeadPolicy::Spin,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            pool_size: std::env::var("POOL_SIZE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.pool_size),
            poll_interval_ms: std::env::var("POLL_INTERVAL_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_ms),
            input_file: std::env::var("INPUT_FILE").unwrap_or(default.input_file),
            warn_file: std::env::var("WARN_FILE").unwrap_or(default.warn_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            stuck_head_policy: std::env::var("STUCK_HEAD_POLICY").ok().map(|v| parse_policy(&v)).unwrap_or(default.stuck_head_policy),
        }
    }
}

fn parse_policy(value: &str) -> StuckHeadPolicy {
    if value.eq_ignore_ascii_case("drop") {
        StuckHeadPolicy::DropAndLog
    } else {
        StuckHeadPolicy::Spin
    }
}
