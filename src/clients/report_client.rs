/// 考试报告 API 客户端
///
/// 封装获取考试报告与刷新会话的调用逻辑
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::utils::truncate_text;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// 服务端错误响应在日志中保留的最大字符数
const ERROR_BODY_PREVIEW: usize = 500;

/// 访问考试报告所需的凭证
///
/// 在构造客户端时传入，每次请求复制到请求头中
#[derive(Clone, Debug)]
pub struct Credentials {
    pub auth_token: String,
    pub trace_id: String,
}

impl Credentials {
    pub fn new(auth_token: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            trace_id: trace_id.into(),
        }
    }
}

/// 考试报告来源
pub trait ReportSource {
    /// 尝试刷新会话（不保证返回新的 token）
    fn refresh_session(&self) -> impl Future<Output = AppResult<()>> + Send;

    /// 获取考试报告原始 JSON
    fn fetch_report(&self, exam_id: &str) -> impl Future<Output = AppResult<Value>> + Send;
}

/// 基于 HTTP 的考试报告客户端
pub struct HttpReportSource {
    client: Client,
    base_url: String,
    web_origin: String,
    user_agent: String,
    credentials: Credentials,
    report_timeout: Duration,
    refresh_timeout: Duration,
}

impl HttpReportSource {
    /// 创建新的报告客户端
    pub fn new(config: &Config, credentials: Credentials) -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(ApiError::ClientBuildFailed)?;

        Ok(Self {
            client,
            base_url: config.base_api_url.trim_end_matches('/').to_string(),
            web_origin: config.web_origin.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            credentials,
            report_timeout: config.report_timeout(),
            refresh_timeout: config.refresh_timeout(),
        })
    }

    /// 为请求附加接口所需的请求头
    fn with_api_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("accept", "application/json, text/plain, */*")
            .header("accept-language", "zh")
            .header("authorization", self.credentials.auth_token.as_str())
            .header("origin", self.web_origin.as_str())
            .header("referer", format!("{}/", self.web_origin))
            .header("user-agent", self.user_agent.as_str())
    }

    async fn get_checked(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        timeout: Duration,
    ) -> AppResult<String> {
        let response = self
            .with_api_headers(self.client.get(endpoint))
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        if !status.is_success() {
            return Err(AppError::http_status(
                endpoint,
                status.as_u16(),
                truncate_text(&body, ERROR_BODY_PREVIEW),
            ));
        }

        Ok(body)
    }
}

impl ReportSource for HttpReportSource {
    async fn refresh_session(&self) -> AppResult<()> {
        let endpoint = format!("{}/users/login/refresh10Session", self.base_url);
        debug!("刷新会话: traceId={}", self.credentials.trace_id);

        self.get_checked(
            &endpoint,
            &[
                ("uaToken", self.credentials.auth_token.as_str()),
                ("traceId", self.credentials.trace_id.as_str()),
            ],
            self.refresh_timeout,
        )
        .await?;

        Ok(())
    }

    async fn fetch_report(&self, exam_id: &str) -> AppResult<Value> {
        let endpoint = format!("{}/exams/user/study/getExamReport", self.base_url);
        debug!(
            "获取考试报告: examId={}, traceId={}",
            exam_id, self.credentials.trace_id
        );

        let body = self
            .get_checked(
                &endpoint,
                &[
                    ("examId", exam_id),
                    ("traceId", self.credentials.trace_id.as_str()),
                ],
                self.report_timeout,
            )
            .await?;

        serde_json::from_str(&body).map_err(|source| {
            AppError::Api(ApiError::JsonParseFailed {
                endpoint: endpoint.clone(),
                source,
            })
        })
    }
}
