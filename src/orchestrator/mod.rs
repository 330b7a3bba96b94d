//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次导出的完整调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `export_app` - 导出流程入口
//! - 持有报告来源、图片下载器和日志输出
//! - 获取并校验报告、创建考试目录
//! - 生成 Markdown / LaTeX 文档并汇总结果
//!
//! ### `exam_processor` - 单场考试处理器
//! - 按部分和题目顺序遍历整场考试
//! - 复用同一个 QuestionFlow
//! - 汇总图片清单和统计信息
//!
//! ### `worker` - 后台导出
//! - 在独立线程中运行 `export_app`
//! - 通过消息队列向调用方传递日志
//!
//! ## 层次关系
//!
//! ```text
//! worker (可选，后台线程)
//!     ↓
//! export_app (处理一次导出)
//!     ↓
//! exam_processor (处理 Vec<Part> / Vec<Question>)
//!     ↓
//! workflow::QuestionFlow (处理单个 Question)
//!     ↓
//! services (能力层：命名 / 文本 / Markdown / LaTeX)
//!     ↓
//! clients + infrastructure (HTTP 客户端、日志输出)
//! ```

pub mod exam_processor;
pub mod export_app;
pub mod worker;

// 重新导出主要类型
pub use exam_processor::{process_exam, ExamStats};
pub use export_app::{ExportPipeline, ExportSummary};
pub use worker::{spawn_export, spawn_pipeline, ExportHandle};
