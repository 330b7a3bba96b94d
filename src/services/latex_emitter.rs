//! LaTeX 试卷生成
//!
//! 所有用户文本（包括题目 ID）都经过转义；日期由调用方传入，
//! 相同输入与相同日期得到完全相同的输出。

use crate::models::{AssetManifest, Exam, Question};
use crate::services::asset_namer::{option_display_text, option_label, ImageSlot};
use crate::utils::{clean_text, escape_latex, escape_paragraphs};
use chrono::NaiveDate;

const PREAMBLE: &str = r"\documentclass[12pt]{article}
\usepackage[UTF8]{ctex}
\usepackage{graphicx}
\usepackage{amsmath, amsfonts, amssymb}
\usepackage[a4paper, margin=1in]{geometry}
\usepackage{enumitem}
\usepackage{hyperref}
\hypersetup{colorlinks=true, linkcolor=blue, urlcolor=blue, citecolor=green}
\usepackage{array}\usepackage{longtable}
";

const AUTHOR: &str = "优学院导出";

/// 普通图片尺寸
const IMAGE_SIZE: &str = r"width=0.8\textwidth, height=0.25\textheight, keepaspectratio";
/// 正确答案图片尺寸
const ANSWER_IMAGE_SIZE: &str = r"width=0.7\textwidth, height=0.2\textheight, keepaspectratio";

/// 渲染完整的 LaTeX 试卷
pub fn render_latex(exam: &Exam, manifest: &AssetManifest, date: NaiveDate) -> String {
    let mut out = String::from(PREAMBLE);

    out.push_str(&format!("\\title{{{}}}\n", escape_latex(exam.display_title())));
    out.push_str(&format!("\\author{{{}}}\n", AUTHOR));
    out.push_str(&format!("\\date{{{}}}\n", date.format("%Y-%m-%d")));
    out.push_str("\\begin{document}\n");
    out.push_str("\\maketitle\n\n");

    for part in &exam.parts {
        out.push_str(&format!(
            "\\section*{{{}}}\n\\hrulefill\n\n",
            escape_latex(&part.name)
        ));
        for question in &part.questions {
            render_question(&mut out, question, manifest);
        }
    }

    out.push_str("\\end{document}\n");
    out
}

fn render_question(out: &mut String, question: &Question, manifest: &AssetManifest) {
    let folder = question.folder_name();
    let images = |slot: &ImageSlot| manifest.files_with_prefix(&folder, &slot.prefix());

    out.push_str(&format!(
        "\\subsection*{{{}. ({}) \\small ID: {}}}\n\n",
        question.order_index,
        escape_latex(&question.question_type.name()),
        escape_latex(&question.id)
    ));

    // 题干
    out.push_str("\\textbf{题干:}\n\n");
    out.push_str(&escape_paragraphs(&clean_text(&question.title_html)));
    out.push('\n');
    push_images(out, &folder, &images(&ImageSlot::Title), IMAGE_SIZE);
    out.push('\n');

    // 选项
    if !question.items.is_empty() {
        out.push_str("\\textbf{选项:}\n");
        out.push_str("\\begin{itemize}[leftmargin=*]\n");
        for item in &question.items {
            out.push_str("  \\item ");
            out.push_str(&escape_paragraphs(&option_display_text(item)));
            out.push('\n');
            let files = images(&ImageSlot::Option(option_label(item)));
            push_images(out, &folder, &files, IMAGE_SIZE);
            out.push('\n');
        }
        out.push_str("\\end{itemize}\n\n");
    }

    // 正确答案
    out.push_str("\\textbf{正确答案:}\n");
    if question.correct.answers.is_empty() {
        out.push_str("未提供\n");
    } else {
        for (idx, answer) in question.correct.answers.iter().enumerate() {
            out.push_str(&escape_paragraphs(&clean_text(answer)));
            out.push('\n');
            let files = images(&ImageSlot::CorrectAnswer(idx + 1));
            push_images(out, &folder, &files, ANSWER_IMAGE_SIZE);
        }
    }
    out.push('\n');

    // 答案解析
    if !question.correct.replay_html.trim().is_empty() {
        out.push_str("\\textbf{答案解析:}\n\n");
        out.push_str(&escape_paragraphs(&clean_text(&question.correct.replay_html)));
        out.push('\n');
        push_images(out, &folder, &images(&ImageSlot::Replay), IMAGE_SIZE);
        out.push('\n');
    }

    out.push_str("\\vspace{0.5em}\\hrulefill\\vspace{1em}\n\n");
}

fn push_images(out: &mut String, folder: &str, files: &[&str], size: &str) {
    for file in files {
        out.push_str(&format!(
            "\\begin{{center}}\\includegraphics[{}]{{{}/{}}}\\end{{center}}\n",
            size, folder, file
        ));
    }
}
