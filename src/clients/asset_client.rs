/// 图片下载客户端
///
/// 只负责"把一个 URL 保存到一个路径"，不关心图片属于哪道题
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use futures::StreamExt;
use reqwest::Client;
use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// 图片下载能力
pub trait AssetFetcher {
    /// 下载 `url` 并写入 `dest`，返回写入的字节数
    fn fetch(&self, url: &str, dest: &Path) -> impl Future<Output = AppResult<u64>> + Send;
}

/// 基于 HTTP 的图片下载器
pub struct HttpAssetFetcher {
    client: Client,
    user_agent: String,
    timeout: Duration,
}

impl HttpAssetFetcher {
    /// 创建新的图片下载器
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(ApiError::ClientBuildFailed)?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            timeout: config.image_timeout(),
        })
    }

    async fn stream_to_file(
        &self,
        response: reqwest::Response,
        url: &str,
        dest: &Path,
    ) -> AppResult<u64> {
        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| AppError::write_failed(dest, e))?;

        let mut stream = response.bytes_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| AppError::request_failed(url, e))?;
            file.write_all(&chunk)
                .await
                .map_err(|e| AppError::write_failed(dest, e))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| AppError::write_failed(dest, e))?;

        Ok(written)
    }
}

impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> AppResult<u64> {
        debug!("下载图片: {} -> {}", url, dest.display());

        let response = self
            .client
            .get(url)
            .header("user-agent", self.user_agent.as_str())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::request_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::http_status(url, status.as_u16(), String::new()));
        }

        let result = self.stream_to_file(response, url, dest).await;
        if result.is_err() {
            // 不保留写了一半的文件
            let _ = tokio::fs::remove_file(dest).await;
        }
        result
    }
}
