//! 考试报告数据结构
//!
//! `Raw*` 结构对应接口返回的 JSON；`Exam` 等结构是补齐默认值后的只读视图

use super::lenient;
use super::question_type::QuestionType;
use crate::error::{AppResult, ReportError};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct ReportEnvelope {
    #[serde(default)]
    result: Option<RawExam>,
}

#[derive(Debug, Deserialize)]
struct RawExam {
    #[serde(rename = "examTitle", default, deserialize_with = "lenient::optional_text")]
    exam_title: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    part: Vec<RawPart>,
}

#[derive(Debug, Deserialize)]
struct RawPart {
    #[serde(default, deserialize_with = "lenient::optional_text")]
    partname: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    children: Vec<RawQuestion>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(rename = "orderIndex", default, deserialize_with = "lenient::integer")]
    order_index: Option<i64>,
    #[serde(rename = "questionid", default, deserialize_with = "lenient::scalar_text")]
    question_id: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::integer")]
    type_code: Option<i64>,
    #[serde(default, deserialize_with = "lenient::rich_text")]
    title: String,
    #[serde(default, deserialize_with = "lenient::list")]
    item: Vec<RawItem>,
    #[serde(rename = "correctAnswerAndReplay", default)]
    correct_answer_and_replay: Option<RawCorrectAnswer>,
    #[serde(rename = "studentAnswer", default)]
    student_answer: Option<RawStudentAnswer>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "orderIndex", default, deserialize_with = "lenient::integer")]
    order_index: Option<i64>,
    #[serde(default, deserialize_with = "lenient::rich_text")]
    title: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawCorrectAnswer {
    #[serde(rename = "correctAnswer", default, deserialize_with = "lenient::text_list")]
    correct_answer: Vec<String>,
    #[serde(rename = "correctReplay", default, deserialize_with = "lenient::rich_text")]
    correct_replay: String,
}

#[derive(Debug, Deserialize)]
struct RawStudentAnswer {
    #[serde(default, deserialize_with = "lenient::rich_text")]
    answer: String,
    #[serde(default, deserialize_with = "lenient::grade")]
    grade: Option<String>,
}

/// 试卷
#[derive(Debug, Clone)]
pub struct Exam {
    /// 试卷标题（接口未提供时为 None）
    pub title: Option<String>,
    pub parts: Vec<Part>,
}

/// 试卷中的一个部分（大题）
#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub questions: Vec<Question>,
}

/// 单个题目
#[derive(Debug, Clone)]
pub struct Question {
    pub order_index: i64,
    pub id: String,
    pub question_type: QuestionType,
    /// 题干（HTML）
    pub title_html: String,
    pub items: Vec<Item>,
    pub correct: CorrectAnswerInfo,
    pub student_answer: Option<StudentAnswer>,
}

/// 选项
#[derive(Debug, Clone)]
pub struct Item {
    pub order_index: i64,
    /// 选项内容（HTML，可能以单字母段落开头）
    pub title_html: String,
}

/// 正确答案与解析
#[derive(Debug, Clone, Default)]
pub struct CorrectAnswerInfo {
    /// 正确答案片段（HTML）
    pub answers: Vec<String>,
    /// 答案解析（HTML，可能为空）
    pub replay_html: String,
}

/// 学生作答
#[derive(Debug, Clone)]
pub struct StudentAnswer {
    pub answer_html: String,
    pub grade: Option<String>,
}

impl Exam {
    /// 标题缺失时 Markdown / LaTeX 中使用的默认标题
    pub const DEFAULT_TITLE: &'static str = "考试试卷";

    /// 从接口返回的 JSON 构建试卷
    ///
    /// 缺少 `result` 或 `part` 为空时返回错误，调用方应终止本次导出
    pub fn from_report(report: &Value) -> AppResult<Self> {
        let envelope = ReportEnvelope::deserialize(report).map_err(ReportError::InvalidShape)?;
        let raw = envelope.result.ok_or(ReportError::MissingResult)?;

        if raw.part.is_empty() {
            return Err(ReportError::EmptyParts.into());
        }

        let parts = raw
            .part
            .into_iter()
            .enumerate()
            .map(|(idx, part)| Part::from_raw(part, idx))
            .collect();

        Ok(Self {
            title: raw.exam_title,
            parts,
        })
    }

    /// 用于文档标题的显示名称
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(Self::DEFAULT_TITLE)
    }

    /// 题目总数
    pub fn question_count(&self) -> usize {
        self.parts.iter().map(|p| p.questions.len()).sum()
    }
}

impl Part {
    fn from_raw(raw: RawPart, idx: usize) -> Self {
        Self {
            name: raw
                .partname
                .unwrap_or_else(|| format!("第 {} 部分", idx + 1)),
            questions: raw
                .children
                .into_iter()
                .enumerate()
                .map(|(q_idx, q)| Question::from_raw(q, q_idx))
                .collect(),
        }
    }
}

impl Question {
    fn from_raw(raw: RawQuestion, idx: usize) -> Self {
        let position = idx as i64 + 1;
        let correct = raw.correct_answer_and_replay.unwrap_or_default();

        Self {
            order_index: raw.order_index.unwrap_or(position),
            id: raw
                .question_id
                .unwrap_or_else(|| format!("unknownID_{}", position)),
            question_type: QuestionType::from_code(raw.type_code),
            title_html: raw.title,
            items: raw
                .item
                .into_iter()
                .enumerate()
                .map(|(i, item)| Item {
                    order_index: item.order_index.unwrap_or(i as i64 + 1),
                    title_html: item.title,
                })
                .collect(),
            correct: CorrectAnswerInfo {
                answers: correct.correct_answer,
                replay_html: correct.correct_replay,
            },
            student_answer: raw
                .student_answer
                .filter(|s| !s.answer.is_empty() || s.grade.is_some())
                .map(|s| StudentAnswer {
                    answer_html: s.answer,
                    grade: s.grade,
                }),
        }
    }

    /// 题目目录名：`question_{orderIndex}_{questionId}`
    pub fn folder_name(&self) -> String {
        format!("question_{}_{}", self.order_index, self.id)
    }
}
