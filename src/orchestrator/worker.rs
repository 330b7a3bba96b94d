//! 后台导出 - 编排层
//!
//! 在独立线程上运行完整导出流程（线程内使用单线程 tokio 运行时），
//! 日志通过单向消息队列交给调用方轮询显示。流程状态全部归后台线程所有。

use crate::clients::{AssetFetcher, Credentials, ReportSource};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::infrastructure::{ChannelSink, EventSink};
use crate::orchestrator::export_app::{ExportPipeline, ExportSummary};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// 后台导出任务句柄
pub struct ExportHandle {
    receiver: Receiver<String>,
    thread: JoinHandle<AppResult<ExportSummary>>,
}

impl ExportHandle {
    /// 取出当前队列中的全部日志行（不阻塞）
    pub fn drain(&self) -> Vec<String> {
        self.receiver.try_iter().collect()
    }

    /// 后台线程是否已结束
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// 等待后台线程结束并取得导出结果
    pub fn join(self) -> AppResult<ExportSummary> {
        self.thread
            .join()
            .map_err(|_| AppError::Worker("后台导出线程异常退出".to_string()))?
    }
}

/// 使用 HTTP 客户端在后台执行导出
pub fn spawn_export(config: Config, credentials: Credentials, exam_id: String) -> ExportHandle {
    spawn_pipeline(
        move |sink| ExportPipeline::from_config(&config, credentials, sink),
        exam_id,
    )
}

/// 在后台线程中构建并运行导出流程
///
/// `build` 在后台线程内调用，报告来源与下载器无需跨线程
pub fn spawn_pipeline<R, F, B>(build: B, exam_id: String) -> ExportHandle
where
    R: ReportSource,
    F: AssetFetcher,
    B: FnOnce(Arc<dyn EventSink>) -> AppResult<ExportPipeline<R, F>> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    let thread = thread::spawn(move || {
        let sink: Arc<dyn EventSink> = Arc::new(ChannelSink::new(sender));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::Worker(format!("无法创建运行时: {}", e)))?;

        let result = runtime.block_on(async {
            let pipeline = build(sink.clone())?;
            pipeline.run(&exam_id).await
        });

        if let Err(e) = &result {
            sink.error(&format!("导出失败: {}", e));
        }
        result
    });

    ExportHandle { receiver, thread }
}
