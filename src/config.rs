use std::str::FromStr;
use std::time::Duration;

use crate::error::{AppResult, ConfigError};

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// 页面加载完成后的固定等待时间（毫秒），给脚本/websocket 渲染留出时间
    pub settle_delay_ms: u64,
    /// Chrome / Chromium 可执行文件路径，未设置时由 chromiumoxide 自动查找
    pub chrome_executable: Option<String>,
    /// 是否以无头模式启动
    pub headless: bool,
    /// 已运行浏览器的远程调试端口，设置后不再启动新浏览器
    pub browser_debug_port: Option<u16>,
    /// 是否禁用沙盒（容器内运行时通常需要）
    pub no_sandbox: bool,
    /// 浏览器请求超时（毫秒），未设置时使用 chromiumoxide 默认值
    pub request_timeout_ms: Option<u64>,
    /// 目录文件分隔符
    pub toc_delimiter: u8,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settle_delay_ms: 5000,
            chrome_executable: None,
            headless: true,
            browser_debug_port: None,
            no_sandbox: false,
            request_timeout_ms: None,
            toc_delimiter: b',',
            verbose_logging: false,
        }
    }
}

impl Config {
    /// 从环境变量读取配置，无法解析的值回退为默认值
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            settle_delay_ms: std::env::var("PAGE_SETTLE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.settle_delay_ms),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(default.chrome_executable),
            headless: std::env::var("BROWSER_HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).or(default.browser_debug_port),
            no_sandbox: std::env::var("BROWSER_NO_SANDBOX").ok().and_then(|v| v.parse().ok()).unwrap_or(default.no_sandbox),
            request_timeout_ms: std::env::var("BROWSER_REQUEST_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).or(default.request_timeout_ms),
            toc_delimiter: std::env::var("TOC_DELIMITER").ok().and_then(|v| parse_delimiter(&v)).unwrap_or(default.toc_delimiter),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 从环境变量读取配置，遇到无法解析的值直接报错
    pub fn try_from_env() -> AppResult<Self> {
        Self::try_from_lookup(|name| std::env::var(name).ok())
    }

    /// 使用自定义查找函数读取配置（便于测试）
    pub fn try_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let default = Self::default();

        let toc_delimiter = match lookup("TOC_DELIMITER") {
            Some(v) => parse_delimiter(&v).ok_or_else(|| ConfigError::EnvVarParseFailed {
                var_name: "TOC_DELIMITER".to_string(),
                value: v.clone(),
                expected_type: "单个 ASCII 字符".to_string(),
            })?,
            None => default.toc_delimiter,
        };

        Ok(Self {
            settle_delay_ms: parse_var(&lookup, "PAGE_SETTLE_MS", "u64")?.unwrap_or(default.settle_delay_ms),
            chrome_executable: lookup("CHROME_EXECUTABLE").or(default.chrome_executable),
            headless: parse_var(&lookup, "BROWSER_HEADLESS", "bool")?.unwrap_or(default.headless),
            browser_debug_port: parse_var(&lookup, "BROWSER_DEBUG_PORT", "u16")?.or(default.browser_debug_port),
            no_sandbox: parse_var(&lookup, "BROWSER_NO_SANDBOX", "bool")?.unwrap_or(default.no_sandbox),
            request_timeout_ms: parse_var(&lookup, "BROWSER_REQUEST_TIMEOUT_MS", "u64")?.or(default.request_timeout_ms),
            toc_delimiter,
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?.unwrap_or(default.verbose_logging),
        })
    }

    /// 固定等待时间
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var_name: &str,
    expected_type: &str,
) -> AppResult<Option<T>> {
    match lookup(var_name) {
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(_) => Err(ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }
            .into()),
        },
        None => Ok(None),
    }
}

/// 分隔符只接受单个 ASCII 字符，`\t` 表示制表符
fn parse_delimiter(value: &str) -> Option<u8> {
    match value {
        "\\t" | "\t" => Some(b'\t'),
        v if v.len() == 1 && v.is_ascii() => v.bytes().next(),
        _ => None,
    }
}
