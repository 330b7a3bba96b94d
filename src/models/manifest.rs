//! 已下载图片清单
//!
//! 由题目物化流程生成，Markdown / LaTeX 生成器只从这里查找图片

use std::collections::BTreeMap;

/// 一张已保存到题目目录中的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedAsset {
    /// 槽位标签，如 `option_C_img_1`
    pub slot_label: String,
    /// 文件名，如 `option_C_img_1.jpg`
    pub file_name: String,
    pub source_url: String,
}

/// 题目目录名 → 已保存图片列表
#[derive(Debug, Clone, Default)]
pub struct AssetManifest {
    entries: BTreeMap<String, Vec<MaterializedAsset>>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一个题目目录的图片（同名目录追加）
    pub fn record(&mut self, question_folder: &str, assets: Vec<MaterializedAsset>) {
        self.entries
            .entry(question_folder.to_string())
            .or_default()
            .extend(assets);
    }

    pub fn assets(&self, question_folder: &str) -> &[MaterializedAsset] {
        self.entries
            .get(question_folder)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 按文件名前缀查找，结果按文件名排序
    pub fn files_with_prefix(&self, question_folder: &str, prefix: &str) -> Vec<&str> {
        let mut files: Vec<&str> = self
            .assets(question_folder)
            .iter()
            .map(|a| a.file_name.as_str())
            .filter(|name| name.starts_with(prefix))
            .collect();
        files.sort_unstable();
        files.dedup();
        files
    }
}
