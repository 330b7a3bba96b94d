//! 题目文本服务 - 业务能力层
//!
//! 只负责把单个 Question 渲染成 `question_data.txt` 的内容，不做任何 IO

use crate::models::Question;
use crate::services::asset_namer::option_display_text;
use crate::utils::clean_text;

/// 题目文本文件名
pub const QUESTION_TEXT_FILE: &str = "question_data.txt";

const SEPARATOR: &str = "------------------------------------";

/// 渲染单个题目的纯文本
pub fn render_question_text(question: &Question) -> String {
    let mut out = String::new();

    out.push_str(&format!("题目ID: {}\n", question.id));
    out.push_str(&format!("题目顺序号: {}\n", question.order_index));
    out.push_str(&format!("题目类型: {}\n\n", question.question_type));

    out.push_str("【题干】:\n");
    out.push_str(&clean_text(&question.title_html));
    out.push_str("\n\n");

    if !question.items.is_empty() {
        out.push_str("【选项】:\n");
        for item in &question.items {
            out.push_str(&option_display_text(item));
            out.push('\n');
        }
        out.push('\n');
    }

    out.push_str("【正确答案】:\n");
    if question.correct.answers.is_empty() {
        out.push_str("未提供\n");
    } else {
        for answer in &question.correct.answers {
            out.push_str(&clean_text(answer));
            out.push('\n');
        }
    }
    out.push('\n');

    if !question.correct.replay_html.trim().is_empty() {
        out.push_str("【答案解析】:\n");
        out.push_str(&clean_text(&question.correct.replay_html));
        out.push_str("\n\n");
    }

    if let Some(student) = &question.student_answer {
        out.push_str("【学生答案】:\n");
        out.push_str(&clean_text(&student.answer_html));
        out.push('\n');
        if let Some(grade) = &student.grade {
            out.push_str(&format!("得分: {}\n", grade));
        }
    }

    out.push('\n');
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}
