use std::path::PathBuf;

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 目录文件加载错误
    #[error("目录文件错误: {0}")]
    Load(#[from] LoadError),
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 单个条目的截取错误
    #[error("截取错误: {0}")]
    Capture(#[from] CaptureError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 目录文件加载错误
#[derive(Debug, Error)]
pub enum LoadError {
    /// 文件不存在
    #[error("文件不存在: {}", path.display())]
    NotFound { path: PathBuf },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 表头缺少必需的列
    #[error("表头缺少必需的列 ({}): {}", path.display(), columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
    /// 数据行格式错误
    #[error("第 {line} 行格式错误 ({}): {source}", path.display())]
    MalformedRow {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
    /// 必填字段为空
    #[error("第 {line} 行的 {column} 列为空 ({})", path.display())]
    EmptyField {
        path: PathBuf,
        line: u64,
        column: &'static str,
    },
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: BoxError,
    },
    /// 连接已运行的浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: BoxError,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: BoxError,
    },
    /// 切换 print 媒体失败
    #[error("模拟 print 媒体失败: {source}")]
    MediaEmulationFailed {
        #[source]
        source: BoxError,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: BoxError,
    },
    /// 页面导出 PDF 失败
    #[error("导出 PDF 失败 ({url}): {source}")]
    RenderFailed {
        url: String,
        #[source]
        source: BoxError,
    },
    /// 关闭浏览器失败
    #[error("关闭浏览器失败: {source}")]
    ShutdownFailed {
        #[source]
        source: BoxError,
    },
    /// 其他 CDP 调用失败
    #[error("CDP 调用失败: {source}")]
    Cdp {
        #[source]
        source: BoxError,
    },
}

/// 单个条目的截取错误
#[derive(Debug, Error)]
pub enum CaptureError {
    /// 页面尺寸无法解析
    #[error("无法解析页面尺寸 '{value}'")]
    InvalidDimension { value: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器启动错误
    pub fn launch_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::LaunchFailed {
            source: Box::new(source),
        })
    }

    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建页面创建错误
    pub fn page_creation_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::PageCreationFailed {
            source: Box::new(source),
        })
    }

    /// 创建 print 媒体模拟错误
    pub fn media_emulation_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::MediaEmulationFailed {
            source: Box::new(source),
        })
    }

    /// 创建浏览器关闭错误
    pub fn shutdown_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        AppError::Browser(BrowserError::ShutdownFailed {
            source: Box::new(source),
        })
    }

    /// 创建导航错误
    pub fn navigation_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::NavigationFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建 PDF 导出错误
    pub fn render_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::RenderFailed {
            url: url.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

// 导航、导出等页面级错误请使用上面带 url 的构造函数
impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::Cdp {
            source: Box::new(err),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_lists_every_column() {
        let err = AppError::from(LoadError::MissingColumns {
            path: PathBuf::from("toc.csv"),
            columns: vec!["URL".to_string(), "Width".to_string()],
        });

        let msg = err.to_string();
        assert!(msg.contains("toc.csv"));
        assert!(msg.contains("URL, Width"));
    }

    #[test]
    fn test_navigation_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "net::ERR_NAME_NOT_RESOLVED");
        let err = AppError::navigation_failed("https://bad.invalid", io);

        assert!(err.to_string().contains("https://bad.invalid"));
        let browser = std::error::Error::source(&err).expect("应包含 BrowserError");
        let root = browser.source().expect("应包含底层错误");
        assert!(root.to_string().contains("ERR_NAME_NOT_RESOLVED"));
    }
}
