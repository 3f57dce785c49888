//! Console-based activity logger implementation.
//!
//! This module provides a logger that outputs activity logs to the console
//! with optional pretty-printing for development and debugging.

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use crate::logging::activity::{ActivityLog, ActivityLogger};
use crate::logging::config::LogFormat;
use crate::logging::error::LogError;
use crate::logging::formatter::LogFormatter;

/// Console activity logger with optional pretty printing.
///
/// Outputs activity logs directly to stdout or stderr with configurable
/// formatting, colors, and destination stream.
#[derive(Debug)]
pub struct ConsoleActivityLogger {
    format: LogFormat,
    colors: bool,
    stderr: bool,
}

impl Default for ConsoleActivityLogger {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            colors: false,
            stderr: false,
        }
    }
}

impl ConsoleActivityLogger {
    /// Creates a new console logger with default settings (pretty format,
    /// no colors, writes to stdout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Enables or disables ANSI color codes around the severity marker.
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Writes to stderr instead of stdout when `true`.
    pub fn with_stderr(mut self, stderr: bool) -> Self {
        self.stderr = stderr;
        self
    }

    fn colorize(&self, log: &ActivityLog, line: String) -> String {
        if !self.colors {
            return line;
        }
        let code = if log.is_error() {
            "31"
        } else if log.is_warning() {
            "33"
        } else {
            "32"
        };
        format!("\x1b[{code}m{line}\x1b[0m")
    }
}

#[async_trait]
impl ActivityLogger for ConsoleActivityLogger {
    async fn log_activity(&self, log: ActivityLog) -> Result<(), LogError> {
        let line = LogFormatter::new(self.format).format(&log);
        let line = self.colorize(&log, line);
        if self.stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
        Ok(())
    }

    async fn flush(&self) -> Result<(), LogError> {
        use std::io::Write;
        if self.stderr {
            std::io::stderr()
                .flush()
                .map_err(|source| LogError::Io {
                    operation: "flush".to_string(),
                    path: "stderr".to_string(),
                    source,
                })?;
        } else {
            std::io::stdout()
                .flush()
                .map_err(|source| LogError::Io {
                    operation: "flush".to_string(),
                    path: "stdout".to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}
