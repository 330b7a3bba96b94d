//! 富文本（HTML）处理
//!
//! - `clean_text`: HTML → 纯文本，保留段落与换行
//! - `extract_image_urls`: 提取所有 `<img src>` 地址
//! - `first_paragraph_text`: 第一个段落的纯文本（用于识别选项字母）

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img[src]").expect("valid img selector"));
static P_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid p selector"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid blank line regex"));
static EDGE_BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\n|\n\s*$").expect("valid edge regex"));

/// 将 HTML 片段转换为纯文本
///
/// `<p>` 之后追加换行，`<br>` 替换为换行，其余文本按文档顺序拼接；
/// 连续空行压缩为一个空行，最后去掉首尾空白。空输入返回空字符串。
pub fn clean_text(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut raw = String::with_capacity(html.len());
    collect_text(fragment.root_element(), &mut raw);

    let collapsed = BLANK_LINES.replace_all(&raw, "\n\n");
    let trimmed = EDGE_BLANK_LINE.replace_all(&collapsed, "");
    trimmed.trim().to_string()
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            match child_element.value().name() {
                "br" => out.push('\n'),
                "p" => {
                    collect_text(child_element, out);
                    out.push('\n');
                }
                _ => collect_text(child_element, out),
            }
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

/// 提取片段中所有不重复的图片地址（按首次出现顺序）
pub fn extract_image_urls(html: &str) -> Vec<String> {
    if html.is_empty() {
        return Vec::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut urls: Vec<String> = Vec::new();
    for img in fragment.select(&IMG_SELECTOR) {
        let src = img.value().attr("src").unwrap_or_default().trim();
        if !src.is_empty() && !urls.iter().any(|u| u == src) {
            urls.push(src.to_string());
        }
    }
    urls
}

/// 第一个 `<p>` 的文本；片段中没有段落时返回 None
pub fn first_paragraph_text(html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(html);
    fragment
        .select(&P_SELECTOR)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
}
