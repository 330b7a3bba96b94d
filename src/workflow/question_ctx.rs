//! 题目处理上下文
//!
//! 封装"我正在处理哪场考试第几部分的第几题，写到哪个目录"这一信息

use crate::models::Question;
use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 题目处理上下文
#[derive(Debug, Clone)]
pub struct QuestionCtx {
    /// 考试ID
    pub exam_id: String,

    /// 部分索引（从1开始，仅用于日志显示）
    pub part_index: usize,

    /// 题目在部分中的索引（从1开始）
    pub question_index: usize,

    /// 题目目录名 `question_{orderIndex}_{questionId}`
    pub folder_name: String,

    /// 题目目录完整路径
    pub question_dir: PathBuf,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(
        exam_id: &str,
        exam_dir: &Path,
        part_index: usize,
        question_index: usize,
        question: &Question,
    ) -> Self {
        let folder_name = question.folder_name();
        Self {
            exam_id: exam_id.to_string(),
            part_index,
            question_index,
            question_dir: exam_dir.join(&folder_name),
            folder_name,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[考试 {} 部分#{} 题目#{}]",
            self.exam_id, self.part_index, self.question_index
        )
    }
}
