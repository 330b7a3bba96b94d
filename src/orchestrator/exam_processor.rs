//! 单场考试处理器 - 编排层
//!
//! ## 职责
//!
//! 按 部分 → 题目 的顺序遍历整场考试，每道题委托给 `QuestionFlow`，
//! 并把成功保存的图片汇总到 `AssetManifest` 中供文档生成使用。
//!
//! 单道题失败只记录日志和统计，不中断整场考试。

use crate::clients::AssetFetcher;
use crate::infrastructure::EventSink;
use crate::models::{AssetManifest, Exam};
use crate::workflow::{QuestionCtx, QuestionFlow};
use std::path::Path;

/// 题目与图片统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExamStats {
    pub questions_total: usize,
    pub questions_done: usize,
    pub questions_failed: usize,
    pub images_saved: usize,
    pub images_failed: usize,
    pub images_skipped: usize,
}

/// 处理整场考试
///
/// # 参数
/// - `exam`: 已校验的试卷
/// - `exam_id`: 考试ID（用于日志）
/// - `exam_dir`: 考试目录（需已存在）
/// - `fetcher`: 图片下载器
/// - `sink`: 日志输出
///
/// # 返回
/// 返回图片清单和统计信息
pub async fn process_exam<F: AssetFetcher>(
    exam: &Exam,
    exam_id: &str,
    exam_dir: &Path,
    fetcher: &F,
    sink: &dyn EventSink,
) -> (AssetManifest, ExamStats) {
    let flow = QuestionFlow::new(fetcher, sink);
    let mut manifest = AssetManifest::new();
    let mut stats = ExamStats {
        questions_total: exam.question_count(),
        ..Default::default()
    };

    for (part_idx, part) in exam.parts.iter().enumerate() {
        let part_index = part_idx + 1;
        if part.questions.is_empty() {
            sink.warn(&format!("第 {} 部分没有题目，跳过", part_index));
            continue;
        }

        sink.info(&format!(
            "\n处理第 {} 部分 (名称: {})，共 {} 道题",
            part_index,
            part.name,
            part.questions.len()
        ));

        for (q_idx, question) in part.questions.iter().enumerate() {
            let ctx = QuestionCtx::new(exam_id, exam_dir, part_index, q_idx + 1, question);

            match flow.run(question, &ctx).await {
                Ok(outcome) => {
                    stats.questions_done += 1;
                    stats.images_saved += outcome.assets.len();
                    stats.images_failed += outcome.images_failed;
                    stats.images_skipped += outcome.images_skipped;
                    manifest.record(&ctx.folder_name, outcome.assets);
                }
                Err(e) => {
                    sink.error(&format!("{} 题目处理失败: {}", ctx, e));
                    stats.questions_failed += 1;
                }
            }
        }
    }

    sink.info(&format!(
        "题目统计: 成功 {}, 失败 {}, 总计 {}",
        stats.questions_done, stats.questions_failed, stats.questions_total
    ));

    (manifest, stats)
}
