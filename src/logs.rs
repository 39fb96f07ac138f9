//! Stage logging for the combine pipeline.
//!
//! Progress goes to stderr so table output on stdout stays clean. Setting
//! the `GRNMERGE_QUIET` environment variable (any non-empty value)
//! suppresses info and success lines; warnings and errors always print.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde::Serialize;

/// Log level for stderr display
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }
}

/// Process-wide logger
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::from_env);

/// Writes log entries to stderr.
pub struct Logger {
    quiet: bool,
}

impl Logger {
    pub fn from_env() -> Self {
        let quiet = std::env::var("GRNMERGE_QUIET")
            .map(|v| !v.is_empty())
            .unwrap_or(false);
        Self { quiet }
    }

    pub fn log(&self, entry: LogEntry) {
        if self.quiet && matches!(entry.level, LogLevel::Info | LogLevel::Success) {
            return;
        }

        let prefix = match entry.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        eprintln!(
            "{}{} {}",
            entry.timestamp.format("%H:%M:%S"),
            prefix,
            entry.message
        );
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}
