//! 题目物化流程 - 流程层
//!
//! 核心职责：定义"一道题"落盘的完整流程
//!
//! 流程顺序：
//! 1. 创建题目目录
//! 2. 写入 question_data.txt
//! 3. 按槽位顺序下载图片（同一题内相同 URL 只尝试一次，失败不重试）

use std::collections::HashSet;
use std::fmt;

use crate::clients::AssetFetcher;
use crate::error::AppResult;
use crate::infrastructure::EventSink;
use crate::models::{MaterializedAsset, Question};
use crate::services::{is_downloadable, plan_images, render_question_text, QUESTION_TEXT_FILE};
use crate::utils::fs::{ensure_dir, write_text};
use crate::workflow::question_ctx::QuestionCtx;

/// 单道题的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterializeStage {
    Created,
    TextWritten,
    ImagesResolved,
    Done,
}

impl fmt::Display for MaterializeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterializeStage::Created => "目录已创建",
            MaterializeStage::TextWritten => "文本已写入",
            MaterializeStage::ImagesResolved => "图片已处理",
            MaterializeStage::Done => "完成",
        };
        f.write_str(name)
    }
}

/// 单道题的处理结果
#[derive(Debug, Clone, Default)]
pub struct QuestionOutcome {
    /// 成功保存的图片
    pub assets: Vec<MaterializedAsset>,
    /// 下载失败的图片数
    pub images_failed: usize,
    /// 非 http(s) 地址被跳过的图片数
    pub images_skipped: usize,
}

/// 题目物化流程
///
/// - 不持有任何资源，只借用下载器和日志输出
/// - 目录或文本写入失败时返回错误，单张图片失败只记录日志
pub struct QuestionFlow<'a, F: AssetFetcher> {
    fetcher: &'a F,
    sink: &'a dyn EventSink,
}

impl<'a, F: AssetFetcher> QuestionFlow<'a, F> {
    /// 创建新的题目物化流程
    pub fn new(fetcher: &'a F, sink: &'a dyn EventSink) -> Self {
        Self { fetcher, sink }
    }

    pub async fn run(&self, question: &Question, ctx: &QuestionCtx) -> AppResult<QuestionOutcome> {
        self.sink.info(&format!(
            "{} 处理题目 {} (ID: {}) -> '{}'",
            ctx, question.order_index, question.id, ctx.folder_name
        ));

        ensure_dir(&ctx.question_dir).await?;
        self.log_stage(ctx, MaterializeStage::Created);

        let text_path = ctx.question_dir.join(QUESTION_TEXT_FILE);
        write_text(&text_path, &render_question_text(question)).await?;
        self.log_stage(ctx, MaterializeStage::TextWritten);

        let outcome = self.download_images(question, ctx).await;
        self.log_stage(ctx, MaterializeStage::ImagesResolved);

        if outcome.images_failed > 0 {
            self.sink.warn(&format!(
                "{} 图片: 成功 {}, 失败 {}",
                ctx,
                outcome.assets.len(),
                outcome.images_failed
            ));
        }
        self.log_stage(ctx, MaterializeStage::Done);

        Ok(outcome)
    }

    /// 下载题目中的所有图片
    async fn download_images(&self, question: &Question, ctx: &QuestionCtx) -> QuestionOutcome {
        let mut outcome = QuestionOutcome::default();
        let mut attempted: HashSet<String> = HashSet::new();

        for reference in plan_images(question) {
            if !is_downloadable(&reference.url) {
                self.sink.warn(&format!(
                    "{} 跳过无效图片地址: {}",
                    ctx, reference.url
                ));
                outcome.images_skipped += 1;
                continue;
            }

            if !attempted.insert(reference.url.clone()) {
                self.sink.debug(&format!(
                    "{} 图片已处理过，跳过 {}: {}",
                    ctx,
                    reference.slot_label(),
                    reference.url
                ));
                continue;
            }

            let file_name = reference.file_name();
            let dest = ctx.question_dir.join(&file_name);
            self.sink.debug(&format!(
                "{} 下载图片: {} -> {}",
                ctx, reference.url, file_name
            ));

            match self.fetcher.fetch(&reference.url, &dest).await {
                Ok(bytes) => {
                    self.sink.debug(&format!(
                        "{} ✓ 已保存 {} ({} 字节)",
                        ctx, file_name, bytes
                    ));
                    outcome.assets.push(MaterializedAsset {
                        slot_label: reference.slot_label(),
                        file_name,
                        source_url: reference.url,
                    });
                }
                Err(e) => {
                    self.sink.warn(&format!(
                        "{} 图片下载失败 {}: {}",
                        ctx, reference.url, e
                    ));
                    outcome.images_failed += 1;
                }
            }
        }

        outcome
    }

    fn log_stage(&self, ctx: &QuestionCtx, stage: MaterializeStage) {
        self.sink.debug(&format!("{} 阶段: {}", ctx, stage));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::TracingSink;
    use crate::models::Exam;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Mutex;

    /// 记录请求并按 URL 决定成功或失败
    #[derive(Default)]
    struct RecordingFetcher {
        requests: Mutex<Vec<String>>,
    }

    impl AssetFetcher for RecordingFetcher {
        async fn fetch(&self, url: &str, dest: &Path) -> AppResult<u64> {
            self.requests.lock().unwrap().push(url.to_string());
            if url.contains("broken") {
                return Err(AppError::http_status(url, 404, ""));
            }
            tokio::fs::write(dest, b"img").await.unwrap();
            Ok(3)
        }
    }

    fn question() -> Question {
        let exam = Exam::from_report(&json!({
            "result": { "part": [ { "children": [ {
                "orderIndex": 4,
                "questionid": "abc",
                "type": 1,
                "title": "<img src=\"http://x/same.png\"><img src=\"/local.png\">",
                "item": [
                    { "title": "<p>A</p><img src=\"http://x/same.png\">" },
                    { "title": "<p>B</p><img src=\"http://x/broken.gif\">" },
                    { "title": "<p>C</p><img src=\"http://x/y.jpg\">" }
                ],
                "correctAnswerAndReplay": { "correctAnswer": ["C"] }
            } ] } ] }
        }))
        .unwrap();
        exam.parts[0].questions[0].clone()
    }

    #[tokio::test]
    async fn test_materialize_writes_text_and_images() {
        let _ = tracing_subscriber::fmt::try_init();
        let dir = tempfile::tempdir().unwrap();
        let q = question();
        let ctx = QuestionCtx::new("1", dir.path(), 1, 1, &q);

        let fetcher = RecordingFetcher::default();
        let sink = TracingSink;
        let outcome = QuestionFlow::new(&fetcher, &sink).run(&q, &ctx).await.unwrap();

        // 相同 URL 只请求一次，非 http 地址不请求
        assert_eq!(
            *fetcher.requests.lock().unwrap(),
            vec!["http://x/same.png", "http://x/broken.gif", "http://x/y.jpg"]
        );

        let names: Vec<&str> = outcome.assets.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["title_img_1.png", "option_C_img_1.jpg"]);
        assert_eq!(outcome.images_failed, 1);
        assert_eq!(outcome.images_skipped, 1);

        let question_dir = dir.path().join("question_4_abc");
        assert!(question_dir.join("question_data.txt").is_file());
        assert!(question_dir.join("option_C_img_1.jpg").is_file());
        assert!(!question_dir.join("option_B_img_1.gif").exists());
    }

    #[tokio::test]
    async fn test_rerun_attempts_downloads_again() {
        let dir = tempfile::tempdir().unwrap();
        let q = question();
        let ctx = QuestionCtx::new("1", dir.path(), 1, 1, &q);
        let fetcher = RecordingFetcher::default();
        let sink = TracingSink;
        let flow = QuestionFlow::new(&fetcher, &sink);

        flow.run(&q, &ctx).await.unwrap();
        flow.run(&q, &ctx).await.unwrap();

        assert_eq!(fetcher.requests.lock().unwrap().len(), 6);
    }
}
