//! Activity logging types and core trait definition.
//!
//! This module defines the core types for structured activity logging:
//! the [`ActivityLog`] entry and the [`ActivityLogger`] trait that pluggable
//! destinations implement.

// Layer 1: Standard library imports
use std::collections::HashMap;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

// Layer 3: Internal module imports
use super::error::LogError;

/// Structured log entry representing a single broker operation activity.
///
/// Produced by the request dispatcher and by the send-log, ack-log, and
/// redelivery workers, then handed to whichever [`ActivityLogger`] the host
/// process has configured.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    /// Identifier correlating this entry with the operation it describes
    /// (for request handling this is the delivery/message id where one
    /// exists, otherwise a synthesized id).
    pub operation_id: String,
    /// The kind of operation (e.g. `"send_data_to_queue"`, `"ack_message"`).
    pub operation_type: String,
    /// The authenticated user context, if any (the broker has a single
    /// shared credential, so this is the configured user name once LOGIN
    /// has succeeded on the connection).
    pub user_context: Option<String>,
    /// A short human-readable outcome (`"Success"`, or `"Error: ..."`).
    pub result: String,
    /// Wall-clock duration of the operation in milliseconds.
    pub duration_ms: u64,
    /// Whether this entry concerns a security-relevant event (LOGIN
    /// failures, FORBIDDEN responses).
    pub security_relevant: bool,
    /// Free-form structured metadata (queue name, peer address, ...).
    pub metadata: HashMap<String, Value>,
    /// When the activity was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ActivityLog {
    /// Creates a new activity log entry stamped with the current time.
    pub fn new(
        operation_id: String,
        operation_type: String,
        user_context: Option<String>,
        result: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            operation_id,
            operation_type,
            user_context,
            result,
            duration_ms,
            security_relevant: false,
            metadata: HashMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Marks this entry as security-relevant.
    pub fn mark_security_relevant(mut self) -> Self {
        self.security_relevant = true;
        self
    }

    /// Attaches a metadata field, returning `self` for chaining.
    pub fn with_metadata(mut self, key: String, value: Value) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// True when [`Self::result`] starts with `"Error"`.
    pub fn is_error(&self) -> bool {
        self.result.starts_with("Error")
    }

    /// True when [`Self::result`] contains a warning marker (`"warn"` or
    /// `"timeout"`), mirroring the heuristic used by the tracing logger.
    pub fn is_warning(&self) -> bool {
        self.result.contains("warn") || self.result.contains("Warning") || self.result.contains("timeout")
    }
}

/// Core trait for pluggable activity logging destinations.
///
/// Implementations can target different output destinations (console, file,
/// tracing, external systems) while maintaining a consistent interface.
#[async_trait]
pub trait ActivityLogger: std::fmt::Debug + Send + Sync + 'static {
    /// Records a single activity entry.
    async fn log_activity(&self, log: ActivityLog) -> Result<(), LogError>;

    /// Flushes any buffered output. Destinations without buffering may
    /// implement this as a no-op.
    async fn flush(&self) -> Result<(), LogError>;
}
