//! Markdown 试卷生成
//!
//! 遍历顺序与题目物化流程一致，图片只从 `AssetManifest` 中查找

use crate::models::{AssetManifest, Exam, Question};
use crate::services::asset_namer::{option_display_text, option_label, ImageSlot};
use crate::utils::clean_text;
use regex::Regex;
use std::sync::LazyLock;

/// 行首的 `数字.`，在列表项中会被解析为有序列表
static ORDERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.").expect("valid ordered marker regex"));

/// 渲染完整的 Markdown 试卷
pub fn render_markdown(exam: &Exam, manifest: &AssetManifest) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n\n", exam.display_title()));

    for part in &exam.parts {
        out.push_str(&format!("## {}\n\n", part.name));
        for question in &part.questions {
            render_question(&mut out, question, manifest);
        }
    }

    out
}

fn render_question(out: &mut String, question: &Question, manifest: &AssetManifest) {
    let folder = question.folder_name();
    let images = |slot: &ImageSlot| manifest.files_with_prefix(&folder, &slot.prefix());

    out.push_str(&format!(
        "### {}. ({}) (ID: {})\n\n",
        question.order_index, question.question_type, question.id
    ));

    // 题干
    out.push_str(&format!("**题干:**\n{}\n", clean_text(&question.title_html)));
    for file in images(&ImageSlot::Title) {
        out.push_str(&format!("![题干图片]({}/{})\n", folder, file));
    }
    out.push('\n');

    // 选项
    if !question.items.is_empty() {
        out.push_str("**选项:**\n");
        for item in &question.items {
            let text = option_display_text(item);
            out.push_str(&format!("- {}\n", ORDERED_MARKER.replace(&text, r"$1\.")));
            for file in images(&ImageSlot::Option(option_label(item))) {
                out.push_str(&format!("  ![选项图片]({}/{})\n", folder, file));
            }
        }
        out.push('\n');
    }

    // 正确答案
    out.push_str("**正确答案:**\n");
    if question.correct.answers.is_empty() {
        out.push_str("未提供\n");
    } else {
        for (idx, answer) in question.correct.answers.iter().enumerate() {
            out.push_str(&format!("{}\n", clean_text(answer)));
            for file in images(&ImageSlot::CorrectAnswer(idx + 1)) {
                out.push_str(&format!("![答案图片]({}/{})\n", folder, file));
            }
        }
    }
    out.push('\n');

    // 答案解析
    if !question.correct.replay_html.trim().is_empty() {
        out.push_str(&format!(
            "**答案解析:**\n{}\n",
            clean_text(&question.correct.replay_html)
        ));
        for file in images(&ImageSlot::Replay) {
            out.push_str(&format!("![解析图片]({}/{})\n", folder, file));
        }
        out.push('\n');
    }

    out.push_str("---\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MaterializedAsset;
    use serde_json::json;

    fn exam() -> Exam {
        Exam::from_report(&json!({
            "result": {
                "examTitle": "期中测验",
                "part": [ { "partname": "一、单选题", "children": [ {
                    "orderIndex": 1,
                    "questionid": "q9",
                    "type": 1,
                    "title": "<p>看图</p><img src=\"http://x/t.png\">",
                    "item": [
                        { "orderIndex": 1, "title": "<p>C</p><img src=\"http://x/y.jpg\">text" },
                        { "orderIndex": 2, "title": "<p>D</p>other" }
                    ],
                    "correctAnswerAndReplay": { "correctAnswer": ["C"], "correctReplay": "<p>略</p>" }
                } ] } ]
            }
        }))
        .unwrap()
    }

    fn manifest() -> AssetManifest {
        let mut manifest = AssetManifest::new();
        manifest.record(
            "question_1_q9",
            vec![
                MaterializedAsset {
                    slot_label: "title_img_1".to_string(),
                    file_name: "title_img_1.png".to_string(),
                    source_url: "http://x/t.png".to_string(),
                },
                MaterializedAsset {
                    slot_label: "option_C_img_1".to_string(),
                    file_name: "option_C_img_1.jpg".to_string(),
                    source_url: "http://x/y.jpg".to_string(),
                },
            ],
        );
        manifest
    }

    #[test]
    fn test_option_image_under_its_bullet() {
        let md = render_markdown(&exam(), &manifest());
        assert!(md.contains(
            "- C. text\n  ![选项图片](question_1_q9/option_C_img_1.jpg)\n- D. other\n"
        ));
    }

    #[test]
    fn test_document_structure() {
        let md = render_markdown(&exam(), &manifest());
        assert!(md.starts_with("# 期中测验\n\n## 一、单选题\n\n### 1. (单选题) (ID: q9)\n\n"));
        assert!(md.contains("**题干:**\n看图\n![题干图片](question_1_q9/title_img_1.png)\n\n"));
        assert!(md.contains("**正确答案:**\nC\n\n"));
        assert!(md.contains("**答案解析:**\n略\n\n---\n\n"));
        assert_eq!(md.matches("# 期中测验").count(), 1);
    }

    #[test]
    fn test_index_label_is_not_an_ordered_list() {
        let exam = Exam::from_report(&json!({
            "result": { "part": [ { "children": [ {
                "questionid": "q1",
                "item": [ { "orderIndex": 1, "title": "<p>北京</p>" }, { "title": "<p>2. 上海</p>" } ]
            } ] } ] }
        }))
        .unwrap();

        let md = render_markdown(&exam, &AssetManifest::new());
        assert!(md.contains("- 1\\. 北京\n- 2\\. 上海\n"));
    }

    #[test]
    fn test_missing_images_are_not_referenced() {
        let md = render_markdown(&exam(), &AssetManifest::new());
        assert!(!md.contains("!["));
    }
}
