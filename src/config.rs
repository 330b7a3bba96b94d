use crate::error::{AppError, AppResult, ConfigError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "exam_export.toml";

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 考试 API 根地址
    pub base_api_url: String,
    /// 网页端来源（用于 origin / referer 请求头）
    pub web_origin: String,
    /// 导出根目录
    pub output_dir: String,
    /// 请求使用的 User-Agent
    pub user_agent: String,
    /// 获取考试报告的超时时间（秒）
    pub report_timeout_secs: u64,
    /// 刷新会话的超时时间（秒）
    pub refresh_timeout_secs: u64,
    /// 下载图片的超时时间（秒）
    pub image_timeout_secs: u64,
    /// 获取报告前是否尝试刷新会话
    pub refresh_session: bool,
    /// 是否在后台线程运行导出流程
    pub background_worker: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 导出参数（缺失时在命令行提示输入） ---
    pub exam_id: Option<String>,
    pub trace_id: Option<String>,
    pub auth_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_api_url: "https://utestapi.ulearning.cn".to_string(),
            web_origin: "https://utest.ulearning.cn".to_string(),
            output_dir: "ulearning_exports".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/137.0.0.0 Safari/537.36".to_string(),
            report_timeout_secs: 15,
            refresh_timeout_secs: 10,
            image_timeout_secs: 20,
            refresh_session: false,
            background_worker: false,
            verbose_logging: false,
            exam_id: None,
            trace_id: None,
            auth_token: None,
        }
    }
}

impl Config {
    /// 加载配置：配置文件（如存在）+ 环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let path = std::env::var("EXAM_EXPORT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let base = if path.exists() {
            tracing::info!("读取配置文件: {}", path.display());
            Self::from_toml_file(&path)?
        } else {
            Self::default()
        };

        Ok(base.with_env_overrides())
    }

    /// 从 TOML 文件读取配置，未写出的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::read_failed(path, e))?;
        Self::from_toml_str(&content, path)
    }

    fn from_toml_str(content: &str, path: &Path) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            AppError::Config(ConfigError::TomlParseFailed {
                path: path.to_path_buf(),
                source,
            })
        })
    }

    /// 用环境变量覆盖已有配置
    pub fn with_env_overrides(self) -> Self {
        Self {
            base_api_url: env_string("BASE_API_URL").unwrap_or(self.base_api_url),
            web_origin: env_string("WEB_ORIGIN").unwrap_or(self.web_origin),
            output_dir: env_string("OUTPUT_DIR").unwrap_or(self.output_dir),
            user_agent: env_string("USER_AGENT").unwrap_or(self.user_agent),
            report_timeout_secs: env_parsed("REPORT_TIMEOUT_SECS")
                .unwrap_or(self.report_timeout_secs),
            refresh_timeout_secs: env_parsed("REFRESH_TIMEOUT_SECS")
                .unwrap_or(self.refresh_timeout_secs),
            image_timeout_secs: env_parsed("IMAGE_TIMEOUT_SECS")
                .unwrap_or(self.image_timeout_secs),
            refresh_session: env_parsed("REFRESH_SESSION").unwrap_or(self.refresh_session),
            background_worker: env_parsed("BACKGROUND_WORKER")
                .unwrap_or(self.background_worker),
            verbose_logging: env_parsed("VERBOSE_LOGGING").unwrap_or(self.verbose_logging),
            exam_id: env_string("EXAM_ID").or(self.exam_id),
            trace_id: env_string("TRACE_ID").or(self.trace_id),
            auth_token: env_string("AUTHORIZATION_TOKEN").or(self.auth_token),
        }
    }

    pub fn report_timeout(&self) -> Duration {
        Duration::from_secs(self.report_timeout_secs)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_string(name).and_then(|v| v.parse().ok())
}
