//! 运行日志模块
//!
//! 所有事件同时输出到控制台，并（如已配置）追加到纯文本日志文件，
//! 每行格式为 `<时间戳> - <LEVEL> - <消息>`。
//! 日志文件每次写入都重新以追加模式打开并在写入后关闭，不在整个运行期间持有句柄。

use super::constants::logging::LOG_TIMESTAMP_FORMAT;
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// 日志文件中的级别名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// 格式化单条日志行（不含换行符）
pub fn format_log_line(time: &DateTime<Local>, level: LogLevel, message: &str) -> String {
    format!(
        "{} - {} - {message}",
        time.format(LOG_TIMESTAMP_FORMAT),
        level.as_str()
    )
}

/// 运行日志（控制台 + 可选日志文件）
#[derive(Debug, Clone, Default)]
pub struct RunLog {
    path: Option<PathBuf>,
}

impl RunLog {
    /// 创建运行日志，`None` 表示只输出到控制台
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// 只输出到控制台
    pub fn console_only() -> Self {
        Self { path: None }
    }

    /// 日志文件路径
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.report(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.report(LogLevel::Warning, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.report(LogLevel::Error, message.as_ref());
    }

    /// 输出到控制台并追加到日志文件
    ///
    /// 日志写入失败不会中断运行，只在stderr提示一次该条记录丢失。
    pub fn report(&self, level: LogLevel, message: &str) {
        println!("[{}] {message}", level.as_str());
        if let Err(e) = self.record(level, message) {
            eprintln!("[WARNING] 日志写入失败 / Failed to write log record: {e}");
        }
    }

    /// 仅追加到日志文件（不输出到控制台），未配置日志文件时为空操作
    pub fn record(&self, level: LogLevel, message: &str) -> io::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let line = format_log_line(&Local::now(), level, message);
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")
    }
}
