//! # Exam Report Export
//!
//! 将优学院考试报告导出为逐题文本、图片、Markdown 与 LaTeX 试卷
//!
//! ## 架构设计
//!
//! 本系统采用严格的分层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `clients/` - 报告来源（`ReportSource`）与图片下载（`AssetFetcher`）
//! - `infrastructure/` - `EventSink`，面向操作者的日志输出
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 只做纯计算，不做 IO
//! - `asset_namer` - 图片槽位与选项标签
//! - `question_writer` - `question_data.txt` 内容
//! - `markdown_emitter` / `latex_emitter` - 整卷文档
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一道题"的落盘流程
//! - `QuestionCtx` - 上下文封装（考试、部分、题目、目录）
//! - `QuestionFlow` - 建目录 → 写文本 → 下载图片
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/export_app` - 一次完整导出
//! - `orchestrator/exam_processor` - 遍历整场考试，汇总图片清单
//! - `orchestrator/worker` - 后台线程运行导出
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{AssetFetcher, Credentials, ReportSource};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChannelSink, EventSink, TracingSink};
pub use models::{AssetManifest, Exam};
pub use orchestrator::{spawn_export, ExportHandle, ExportPipeline, ExportSummary};
pub use workflow::{QuestionCtx, QuestionFlow};
