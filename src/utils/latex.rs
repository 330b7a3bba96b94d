/// 转义 LaTeX 特殊字符
///
/// 逐字符替换，反斜杠产生的 `{}` 不会被再次转义。
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str(r"\textbackslash{}"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '^' => out.push_str(r"\^{}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            _ => out.push(ch),
        }
    }
    out
}

/// 转义并把空行转换为 `\par`
pub fn escape_paragraphs(text: &str) -> String {
    escape_latex(text).replace("\n\n", "\n\\par\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_special_character() {
        assert_eq!(escape_latex(r"\"), r"\textbackslash{}");
        assert_eq!(escape_latex("{x}"), r"\{x\}");
        assert_eq!(escape_latex("a&b%c$d#e_f"), r"a\&b\%c\$d\#e\_f");
        assert_eq!(escape_latex("x^2~y"), r"x\^{}2\textasciitilde{}y");
        assert_eq!(escape_latex(""), "");
        assert_eq!(escape_latex("中文"), "中文");
    }

    #[test]
    fn test_backslash_braces_not_escaped_twice() {
        let once = escape_latex(r"\alpha_{1}");
        assert_eq!(once, r"\textbackslash{}alpha\_\{1\}");
        assert!(!once.contains(r"\textbackslash\{\}"));

        let twice = escape_latex(&once);
        assert!(!twice.contains(r"\textbackslash\{\}"));
        assert!(twice.starts_with(r"\textbackslash{}textbackslash\{\}"));
    }

    #[test]
    fn test_escape_paragraphs() {
        assert_eq!(escape_paragraphs("a\n\nb_c"), "a\n\\par\nb\\_c");
    }
}
