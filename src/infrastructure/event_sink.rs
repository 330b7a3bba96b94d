//! 事件输出 - 基础设施层
//!
//! 导出流程只通过 `EventSink` 向操作者汇报进度，不关心输出到控制台还是后台队列

use std::sync::mpsc::Sender;
use tracing::Level;

/// 面向操作者的日志输出
pub trait EventSink: Send + Sync {
    /// 输出一条消息
    fn emit(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.emit(Level::INFO, message);
    }

    fn warn(&self, message: &str) {
        self.emit(Level::WARN, message);
    }

    fn error(&self, message: &str) {
        self.emit(Level::ERROR, message);
    }

    fn debug(&self, message: &str) {
        self.emit(Level::DEBUG, message);
    }
}

/// 直接写入 tracing 日志
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, level: Level, message: &str) {
        match level {
            Level::ERROR => tracing::error!("{}", message),
            Level::WARN => tracing::warn!("{}", message),
            Level::INFO => tracing::info!("{}", message),
            Level::DEBUG => tracing::debug!("{}", message),
            _ => tracing::trace!("{}", message),
        }
    }
}

/// 通过单向消息队列把日志行发送给另一个线程
///
/// 接收端关闭后消息被丢弃，不影响导出流程
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: Sender<String>,
}

impl ChannelSink {
    pub fn new(sender: Sender<String>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, level: Level, message: &str) {
        if level == Level::DEBUG || level == Level::TRACE {
            tracing::debug!("{}", message);
            return;
        }

        let line = match level {
            Level::ERROR => format!("❌ {}", message),
            Level::WARN => format!("⚠️ {}", message),
            _ => message.to_string(),
        };
        let _ = self.sender.send(line);
    }
}
