use phf::phf_map;
use std::fmt;

/// 题型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// 单选题
    SingleChoice,
    /// 多选题
    MultiChoice,
    /// 不定项选择题
    IndeterminateChoice,
    /// 判断题
    TrueFalse,
    /// 填空题/简答题
    FillInOrShortAnswer,
    /// 未知题型（保留原始代码）
    Unknown(Option<i64>),
}

static TYPE_CODES: phf::Map<i64, QuestionType> = phf_map! {
    1i64 => QuestionType::SingleChoice,
    2i64 => QuestionType::MultiChoice,
    3i64 => QuestionType::IndeterminateChoice,
    4i64 => QuestionType::TrueFalse,
    5i64 => QuestionType::FillInOrShortAnswer,
};

impl QuestionType {
    /// 从题型代码解析
    pub fn from_code(code: Option<i64>) -> Self {
        code.and_then(|c| TYPE_CODES.get(&c).copied())
            .unwrap_or(QuestionType::Unknown(code))
    }

    /// 获取中文题型名称
    pub fn name(self) -> String {
        match self {
            QuestionType::SingleChoice => "单选题".to_string(),
            QuestionType::MultiChoice => "多选题".to_string(),
            QuestionType::IndeterminateChoice => "不定项选择题".to_string(),
            QuestionType::TrueFalse => "判断题".to_string(),
            QuestionType::FillInOrShortAnswer => "填空题/简答题".to_string(),
            QuestionType::Unknown(Some(code)) => format!("未知题型 ({})", code),
            QuestionType::Unknown(None) => "未知题型 (未提供)".to_string(),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(QuestionType::from_code(Some(1)), QuestionType::SingleChoice);
        assert_eq!(QuestionType::from_code(Some(5)).name(), "填空题/简答题");
    }

    #[test]
    fn test_unknown_code_keeps_value() {
        assert_eq!(QuestionType::from_code(Some(9)).name(), "未知题型 (9)");
        assert_eq!(QuestionType::from_code(None), QuestionType::Unknown(None));
    }
}
