//! 图片命名服务 - 业务能力层
//!
//! 为题目中的每张图片分配确定的文件名前缀（槽位）。
//! 题目物化流程和两个文档生成器都通过这里推导名称，
//! 因此同一道题在各处得到的选项标签与图片前缀完全一致。
//!
//! | 位置     | 槽位标签                    |
//! |----------|-----------------------------|
//! | 题干     | `title_img_{n}`             |
//! | 选项     | `option_{label}_img_{n}`    |
//! | 正确答案 | `correct_answer_{a}_img_{n}`|
//! | 答案解析 | `correct_replay_img_{n}`    |

use crate::models::{Item, Question};
use crate::utils::{clean_text, extract_image_urls, first_paragraph_text};
use std::fmt;
use url::Url;

/// 无法从 URL 推断扩展名时使用的默认扩展名
pub const DEFAULT_EXTENSION: &str = ".png";

/// 扩展名（含点）允许的最大字符数
const MAX_EXTENSION_CHARS: usize = 5;

/// 选项标签：单个字母，或选项序号
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionLabel {
    Letter(char),
    Index(i64),
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionLabel::Letter(c) => write!(f, "{}", c),
            OptionLabel::Index(n) => write!(f, "{}", n),
        }
    }
}

/// 图片所在位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSlot {
    Title,
    Option(OptionLabel),
    /// 第 a 个正确答案（从 1 开始）
    CorrectAnswer(usize),
    Replay,
}

impl ImageSlot {
    /// 该位置所有图片共用的文件名前缀
    pub fn prefix(&self) -> String {
        match self {
            ImageSlot::Title => "title_img_".to_string(),
            ImageSlot::Option(label) => format!("option_{}_img_", label),
            ImageSlot::CorrectAnswer(a) => format!("correct_answer_{}_img_", a),
            ImageSlot::Replay => "correct_replay_img_".to_string(),
        }
    }

    /// 第 n 张图片的槽位标签
    pub fn label(&self, n: usize) -> String {
        format!("{}{}", self.prefix(), n)
    }
}

/// 一条待下载的图片引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub url: String,
    pub slot: ImageSlot,
    /// 槽位内序号（从 1 开始）
    pub sequence: usize,
}

impl ImageReference {
    pub fn slot_label(&self) -> String {
        self.slot.label(self.sequence)
    }

    /// 保存时使用的文件名
    pub fn file_name(&self) -> String {
        format!("{}{}", self.slot_label(), image_extension(&self.url))
    }
}

/// 推导选项标签
///
/// 第一个 `<p>` 的文本恰好是一个字母时使用该字母；
/// 没有 `<p>` 或文本不是单个字母时使用选项序号
pub fn option_label(item: &Item) -> OptionLabel {
    let first = first_paragraph_text(&item.title_html).unwrap_or_default();
    let mut chars = first.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => OptionLabel::Letter(c),
        _ => OptionLabel::Index(item.order_index),
    }
}

/// 选项的显示文本（题目文本、Markdown、LaTeX 共用）
///
/// 字母标签段落会被合并为 `X. 内容`；内容本身已带有相同前缀时不再重复添加
pub fn option_display_text(item: &Item) -> String {
    let text = clean_text(&item.title_html);
    match option_label(item) {
        OptionLabel::Letter(c) => {
            let body = strip_label_paragraph(&text, c);
            if has_label_prefix(body, &c.to_string()) {
                body.to_string()
            } else {
                format!("{}. {}", c, body).trim_end().to_string()
            }
        }
        OptionLabel::Index(n) => {
            let label = n.to_string();
            if has_label_prefix(&text, &label) {
                text
            } else {
                format!("{}. {}", label, text).trim_end().to_string()
            }
        }
    }
}

/// 去掉开头单独成段的字母标签（标签后可跟同一行内的空白）
fn strip_label_paragraph(text: &str, label: char) -> &str {
    let rest = match text.strip_prefix(label) {
        Some(rest) => rest.trim_start_matches(|c: char| c.is_whitespace() && c != '\n'),
        None => return text,
    };
    if rest.is_empty() || rest.starts_with('\n') {
        rest.trim_start()
    } else {
        text
    }
}

fn has_label_prefix(text: &str, label: &str) -> bool {
    text.strip_prefix(label)
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| matches!(c, '.' | '．' | '、' | ')' | '）'))
}

/// 按固定顺序收集一道题中的所有图片引用
///
/// 顺序：题干 → 各选项 → 各正确答案 → 答案解析。
/// 序号按片段内提取顺序编号，不在此处去重或过滤。
pub fn plan_images(question: &Question) -> Vec<ImageReference> {
    let mut refs = Vec::new();

    push_fragment(&mut refs, &question.title_html, ImageSlot::Title);

    for item in &question.items {
        push_fragment(&mut refs, &item.title_html, ImageSlot::Option(option_label(item)));
    }

    for (idx, answer) in question.correct.answers.iter().enumerate() {
        push_fragment(&mut refs, answer, ImageSlot::CorrectAnswer(idx + 1));
    }

    push_fragment(&mut refs, &question.correct.replay_html, ImageSlot::Replay);

    refs
}

fn push_fragment(refs: &mut Vec<ImageReference>, html: &str, slot: ImageSlot) {
    for (i, url) in extract_image_urls(html).into_iter().enumerate() {
        refs.push(ImageReference {
            url,
            slot: slot.clone(),
            sequence: i + 1,
        });
    }
}

/// 是否为可下载的 http(s) 地址
pub fn is_downloadable(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// 从 URL 路径推断扩展名（含点），无法推断时返回 `.png`
pub fn image_extension(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();
    let file_name = path.rsplit('/').next().unwrap_or_default();

    match file_name.rfind('.') {
        Some(dot) if dot > 0 => {
            let ext = &file_name[dot..];
            let len = ext.chars().count();
            if len > 1 && len <= MAX_EXTENSION_CHARS {
                ext.to_string()
            } else {
                DEFAULT_EXTENSION.to_string()
            }
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}
