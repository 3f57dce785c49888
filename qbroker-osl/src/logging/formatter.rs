//! Log formatting utilities.
//!
//! Renders an [`ActivityLog`] into one of the output formats a logger
//! destination accepts.

use super::activity::ActivityLog;
use super::config::LogFormat;

/// Formats [`ActivityLog`] entries into a chosen output format.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFormatter {
    format: LogFormat,
}

impl LogFormatter {
    /// Creates a formatter for the given format.
    pub fn new(format: LogFormat) -> Self {
        Self { format }
    }

    /// Renders `log` as a single line (no trailing newline).
    pub fn format(&self, log: &ActivityLog) -> String {
        match self.format {
            LogFormat::Json => Self::format_json(log),
            LogFormat::Pretty => Self::format_pretty(log),
            LogFormat::Compact => Self::format_compact(log),
        }
    }

    fn format_json(log: &ActivityLog) -> String {
        let metadata = serde_json::to_string(&log.metadata).unwrap_or_else(|_| "{}".to_string());
        format!(
            "{{\"operation_id\":\"{}\",\"operation_type\":\"{}\",\"user_context\":{},\"result\":\"{}\",\"duration_ms\":{},\"security_relevant\":{},\"timestamp\":\"{}\",\"metadata\":{}}}",
            escape(&log.operation_id),
            escape(&log.operation_type),
            match &log.user_context {
                Some(u) => format!("\"{}\"", escape(u)),
                None => "null".to_string(),
            },
            escape(&log.result),
            log.duration_ms,
            log.security_relevant,
            log.timestamp.to_rfc3339(),
            metadata,
        )
    }

    fn format_pretty(log: &ActivityLog) -> String {
        format!(
            "[{}] {} ({}) user={} duration={}ms security_relevant={} result={}",
            log.timestamp.to_rfc3339(),
            log.operation_type,
            log.operation_id,
            log.user_context.as_deref().unwrap_or("-"),
            log.duration_ms,
            log.security_relevant,
            log.result,
        )
    }

    fn format_compact(log: &ActivityLog) -> String {
        format!(
            "{}|{}|{}|{}|{}ms|{}",
            log.timestamp.to_rfc3339(),
            log.operation_id,
            log.operation_type,
            log.user_context.as_deref().unwrap_or("-"),
            log.duration_ms,
            log.result,
        )
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
