use crate::error::{AppError, AppResult};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static HOSTILE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("valid hostile char regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("valid underscore regex"));

/// 文件名最大字符数
pub const MAX_FILENAME_CHARS: usize = 100;

/// 将任意标题转换为安全的文件/目录名
///
/// 空标题或清理后为空时返回 `untitled`
pub fn sanitize_filename(name: Option<&str>) -> String {
    let name = name.unwrap_or_default();
    let replaced = HOSTILE_CHARS.replace_all(name, "_");
    let replaced = WHITESPACE_RUN.replace_all(&replaced, "_");
    let replaced = UNDERSCORE_RUN.replace_all(&replaced, "_");
    let sanitized: String = replaced
        .trim_matches('_')
        .chars()
        .take(MAX_FILENAME_CHARS)
        .collect();

    if sanitized.is_empty() {
        "untitled".to_string()
    } else {
        sanitized
    }
}

/// 创建目录（已存在时不报错）
pub async fn ensure_dir(path: &Path) -> AppResult<()> {
    tokio::fs::create_dir_all(path)
        .await
        .map_err(|e| AppError::create_dir_failed(path, e))
}

/// 写入文本文件（覆盖已有内容）
pub async fn write_text(path: &Path, content: &str) -> AppResult<()> {
    tokio::fs::write(path, content)
        .await
        .map_err(|e| AppError::write_failed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_hostile_chars_and_whitespace() {
        assert_eq!(sanitize_filename(Some("期末 考试: A/B?")), "期末_考试_A_B");
        assert_eq!(sanitize_filename(Some("  a   b  ")), "a_b");
        assert_eq!(sanitize_filename(Some("x__<>__y")), "x_y");
    }

    #[test]
    fn test_sanitize_empty_is_untitled() {
        assert_eq!(sanitize_filename(None), "untitled");
        assert_eq!(sanitize_filename(Some("")), "untitled");
        assert_eq!(sanitize_filename(Some("???")), "untitled");
    }

    #[test]
    fn test_sanitize_truncates_by_chars() {
        let long = "题".repeat(150);
        assert_eq!(sanitize_filename(Some(&long)).chars().count(), MAX_FILENAME_CHARS);
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
