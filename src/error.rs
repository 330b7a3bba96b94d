use std::path::{Path, PathBuf};

/// 应用程序错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 考试报告数据错误
    #[error("报告数据错误: {0}")]
    Report(#[from] ReportError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 后台导出线程错误
    #[error("后台任务错误: {0}")]
    Worker(String),
}

/// API 调用错误
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 请求超时
    #[error("请求超时: {endpoint}")]
    Timeout { endpoint: String },
    /// 授权被拒绝 (401)
    #[error("授权失败 (401): {endpoint}，Token 可能无效或已过期")]
    Unauthorized { endpoint: String },
    /// 服务端返回非 2xx 状态码
    #[error("HTTP 错误 {status} ({endpoint}): {body}")]
    HttpStatus {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// JSON 解析失败
    #[error("JSON解析失败 ({endpoint}): {source}")]
    JsonParseFailed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    /// 构建 HTTP 客户端失败
    #[error("无法创建 HTTP 客户端: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
}

/// 考试报告数据错误
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// 缺少 result 字段
    #[error("考试数据无效: 缺少 'result' 字段")]
    MissingResult,
    /// part 列表为空
    #[error("考试数据中没有 'part'")]
    EmptyParts,
    /// 字段类型与预期不符
    #[error("考试数据结构无法解析: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// 文件操作错误
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// 创建目录失败
    #[error("无法创建目录 {}: {source}", path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 必填参数缺失
    #[error("参数 {name} 不能为空")]
    MissingValue { name: String },
    /// TOML 解析失败
    #[error("TOML解析失败 ({}): {source}", path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 根据 reqwest 错误类型区分超时和其他网络错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        let endpoint = endpoint.into();
        if source.is_timeout() {
            AppError::Api(ApiError::Timeout { endpoint })
        } else {
            AppError::Api(ApiError::RequestFailed { endpoint, source })
        }
    }

    /// 创建非 2xx 状态码错误，401 单独归类
    pub fn http_status(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        if status == 401 {
            AppError::Api(ApiError::Unauthorized { endpoint })
        } else {
            AppError::Api(ApiError::HttpStatus {
                endpoint,
                status,
                body: body.into(),
            })
        }
    }

    /// 创建目录创建错误
    pub fn create_dir_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::CreateDirFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn read_failed(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }

    /// 创建必填参数缺失错误
    pub fn missing_value(name: impl Into<String>) -> Self {
        AppError::Config(ConfigError::MissingValue { name: name.into() })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
