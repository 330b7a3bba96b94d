use anyhow::{bail, Context, Result};
use exam_report_export::orchestrator::{spawn_export, ExportPipeline, ExportSummary};
use exam_report_export::utils::logging;
use exam_report_export::{AppError, Config, Credentials, TracingSink};
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 后台模式下轮询日志队列的间隔
const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let mut config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let exam_id = require(config.exam_id.take(), "EXAM_ID", "请输入考试ID (Exam ID)")?;
    let trace_id = require(config.trace_id.take(), "TRACE_ID", "请输入 Trace ID")?;
    let auth_token = require(
        config.auth_token.take(),
        "AUTHORIZATION_TOKEN",
        "请输入 Authorization Token",
    )?;
    let credentials = Credentials::new(auth_token, trace_id);

    logging::log_startup(&exam_id, &config.output_dir);

    let summary = if config.background_worker {
        run_in_background(config, credentials, exam_id).await?
    } else {
        let pipeline = ExportPipeline::from_config(&config, credentials, Arc::new(TracingSink))?;
        pipeline.run(&exam_id).await?
    };

    logging::print_final_stats(
        summary.stats.questions_done,
        summary.stats.questions_total,
        summary.stats.images_saved,
        summary.stats.images_failed,
        &summary.exam_dir.display().to_string(),
    );

    if !summary.documents_complete() {
        bail!("试卷生成失败: {}", summary.document_errors.join("; "));
    }

    Ok(())
}

/// 在后台线程中导出，主线程按固定间隔打印日志
async fn run_in_background(
    config: Config,
    credentials: Credentials,
    exam_id: String,
) -> Result<ExportSummary> {
    let handle = spawn_export(config, credentials, exam_id);
    let mut ticker = tokio::time::interval(POLL_INTERVAL);

    loop {
        ticker.tick().await;
        for line in handle.drain() {
            info!("{}", line);
        }
        if handle.is_finished() {
            break;
        }
    }

    // 线程结束前最后写入的日志
    for line in handle.drain() {
        info!("{}", line);
    }

    Ok(handle.join()?)
}

/// 配置中没有的值从标准输入读取，空值视为错误
fn require(value: Option<String>, name: &str, prompt: &str) -> Result<String> {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(value.trim().to_string());
    }

    print!("{}: ", prompt);
    io::stdout().flush().context("无法写入标准输出")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("无法读取标准输入")?;

    let line = line.trim();
    if line.is_empty() {
        return Err(AppError::missing_value(name).into());
    }
    Ok(line.to_string())
}
