//! 导出流程入口 - 编排层
//!
//! ## 职责
//!
//! 1. **会话刷新**：可选，失败只记录日志
//! 2. **获取报告**：失败时终止，不创建任何目录
//! 3. **校验结构**：缺少 `result` 或 `part` 为空时终止，不创建任何目录
//! 4. **题目物化**：委托 `exam_processor` 遍历整场考试
//! 5. **文档生成**：根据图片清单生成 Markdown 与 LaTeX，失败写入汇总而不中断

use crate::clients::{
    AssetFetcher, Credentials, HttpAssetFetcher, HttpReportSource, ReportSource,
};
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::EventSink;
use crate::models::{AssetManifest, Exam};
use crate::orchestrator::exam_processor::{process_exam, ExamStats};
use crate::services::{render_latex, render_markdown};
use crate::utils::fs::{ensure_dir, write_text};
use crate::utils::sanitize_filename;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// 一次导出的结果汇总
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// 考试目录
    pub exam_dir: PathBuf,
    pub stats: ExamStats,
    /// 成功写入的 Markdown 文件
    pub markdown_path: Option<PathBuf>,
    /// 成功写入的 LaTeX 文件
    pub latex_path: Option<PathBuf>,
    /// 文档生成阶段的错误信息
    pub document_errors: Vec<String>,
}

impl ExportSummary {
    /// 两份文档均已生成
    pub fn documents_complete(&self) -> bool {
        self.document_errors.is_empty()
    }
}

/// 导出流程
///
/// 报告来源、图片下载器和日志输出在构造时注入，流程本身不持有全局状态
pub struct ExportPipeline<R: ReportSource, F: AssetFetcher> {
    source: R,
    fetcher: F,
    sink: Arc<dyn EventSink>,
    output_dir: PathBuf,
    refresh_session: bool,
    document_date: Option<NaiveDate>,
}

impl ExportPipeline<HttpReportSource, HttpAssetFetcher> {
    /// 使用 HTTP 客户端创建导出流程
    pub fn from_config(
        config: &Config,
        credentials: Credentials,
        sink: Arc<dyn EventSink>,
    ) -> AppResult<Self> {
        let source = HttpReportSource::new(config, credentials)?;
        let fetcher = HttpAssetFetcher::new(config)?;

        Ok(Self::new(source, fetcher, sink, &config.output_dir)
            .with_session_refresh(config.refresh_session))
    }
}

impl<R: ReportSource, F: AssetFetcher> ExportPipeline<R, F> {
    pub fn new(
        source: R,
        fetcher: F,
        sink: Arc<dyn EventSink>,
        output_dir: impl AsRef<Path>,
    ) -> Self {
        Self {
            source,
            fetcher,
            sink,
            output_dir: output_dir.as_ref().to_path_buf(),
            refresh_session: false,
            document_date: None,
        }
    }

    /// 获取报告前是否先刷新会话
    pub fn with_session_refresh(mut self, enabled: bool) -> Self {
        self.refresh_session = enabled;
        self
    }

    /// 固定 LaTeX 文档日期（默认使用当天日期）
    pub fn with_document_date(mut self, date: NaiveDate) -> Self {
        self.document_date = Some(date);
        self
    }

    /// 执行一次完整导出
    pub async fn run(&self, exam_id: &str) -> AppResult<ExportSummary> {
        let sink = self.sink.as_ref();
        sink.info("--- 优学院考试数据导出 ---");

        if self.refresh_session {
            sink.info("尝试刷新会话...");
            match self.source.refresh_session().await {
                Ok(()) => sink.info("会话刷新请求成功"),
                Err(e) => sink.warn(&format!("会话刷新失败: {}，继续使用当前 Token", e)),
            }
        }

        sink.info(&format!("获取考试报告: examId={}", exam_id));
        let report = match self.source.fetch_report(exam_id).await {
            Ok(report) => report,
            Err(e) => {
                sink.error(&format!("获取考试数据失败: {}", e));
                return Err(e);
            }
        };

        let exam = match Exam::from_report(&report) {
            Ok(exam) => exam,
            Err(e) => {
                sink.error(&e.to_string());
                return Err(e);
            }
        };

        let sanitized_title = sanitize_filename(exam.title.as_deref());
        let exam_dir = self
            .output_dir
            .join(format!("exam_{}_{}", exam_id, sanitized_title));
        ensure_dir(&exam_dir).await?;
        sink.info(&format!(
            "考试数据将保存到: {} ({} 个部分, {} 道题)",
            exam_dir.display(),
            exam.parts.len(),
            exam.question_count()
        ));

        let (manifest, stats) = process_exam(&exam, exam_id, &exam_dir, &self.fetcher, sink).await;

        let mut summary = ExportSummary {
            exam_dir: exam_dir.clone(),
            stats,
            markdown_path: None,
            latex_path: None,
            document_errors: Vec::new(),
        };

        sink.info("\n开始生成 Markdown 与 TeX 试卷...");
        self.write_documents(&exam, &manifest, &exam_dir, &sanitized_title, &mut summary)
            .await;

        if summary.documents_complete() {
            sink.info("试卷生成完成");
        } else {
            sink.error(&format!(
                "试卷生成存在错误: {}",
                summary.document_errors.join("; ")
            ));
        }

        Ok(summary)
    }

    /// 生成两份文档，错误记录到汇总中
    async fn write_documents(
        &self,
        exam: &Exam,
        manifest: &AssetManifest,
        exam_dir: &Path,
        sanitized_title: &str,
        summary: &mut ExportSummary,
    ) {
        let sink = self.sink.as_ref();
        let date = self
            .document_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());

        let markdown_path = exam_dir.join(format!("{}_完整试卷.md", sanitized_title));
        match write_text(&markdown_path, &render_markdown(exam, manifest)).await {
            Ok(()) => {
                sink.info(&format!("Markdown 试卷已生成: {}", markdown_path.display()));
                summary.markdown_path = Some(markdown_path);
            }
            Err(e) => {
                sink.error(&format!("生成 Markdown 时发生错误: {}", e));
                summary.document_errors.push(e.to_string());
            }
        }

        let latex_path = exam_dir.join(format!("{}_完整试卷.tex", sanitized_title));
        match write_text(&latex_path, &render_latex(exam, manifest, date)).await {
            Ok(()) => {
                sink.info(&format!("TeX 试卷已生成: {}", latex_path.display()));
                summary.latex_path = Some(latex_path);
            }
            Err(e) => {
                sink.error(&format!("生成 TeX 时发生错误: {}", e));
                summary.document_errors.push(e.to_string());
            }
        }
    }
}
