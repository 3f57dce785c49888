//! Configuration types for activity logging.
//!
//! Defines the format/level enums and the config struct used by the
//! console and file loggers.

/// Configuration for logger behavior.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Minimum level an entry must reach to be emitted.
    pub level: LogLevel,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Pretty,
        }
    }
}

/// Log level enumeration for filtering log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Fine-grained diagnostic detail (per-frame dispatch).
    Debug,
    /// Normal operational events.
    Info,
    /// Recoverable problems (retried journal write, dropped stat event).
    Warn,
    /// Failures requiring attention.
    Error,
}

/// Output format options for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Multi-line, human-oriented layout.
    #[default]
    Pretty,
    /// Single-line `|field|field|...` layout.
    Compact,
}
