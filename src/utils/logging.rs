/// 日志工具模块
///
/// 提供日志初始化、格式化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// `RUST_LOG` 优先；否则按 `verbose` 选择 info / debug
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `exam_id`: 考试ID
/// - `output_dir`: 导出根目录
pub fn log_startup(exam_id: &str, output_dir: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 优学院考试数据导出工具 (文本、图片、Markdown、TeX)");
    info!("📄 考试ID: {}", exam_id);
    info!("📁 导出根目录: {}", output_dir);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `questions`: 成功物化的题目数
/// - `total`: 题目总数
/// - `images_saved`: 成功保存的图片数
/// - `images_failed`: 下载失败的图片数
/// - `exam_dir`: 本次导出目录
pub fn print_final_stats(
    questions: usize,
    total: usize,
    images_saved: usize,
    images_failed: usize,
    exam_dir: &str,
) {
    info!("\n{}", "=".repeat(60));
    info!("📊 数据导出与试卷生成处理完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 题目: {}/{}", questions, total);
    info!("🖼️ 图片: 成功 {}, 失败 {}", images_saved, images_failed);
    info!("{}", "=".repeat(60));
    info!("\n请检查输出目录: {}", exam_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_by_chars() {
        assert_eq!(truncate_text("优学院考试", 3), "优学院...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
