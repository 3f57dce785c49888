//! Error types specific to activity logging destinations.
//!
//! Structured error categorization for all logger-related failures, with
//! contextual information for debugging.

use thiserror::Error;

/// Error types for activity logger operations.
#[derive(Debug, Error)]
pub enum LogError {
    /// An I/O failure while writing to a log destination (typically a file).
    #[error("I/O error during {operation} on '{path}': {source}")]
    Io {
        /// The operation being attempted (e.g. "open", "write", "flush").
        operation: String,
        /// The path involved.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The activity log could not be serialized into the requested format.
    #[error("failed to format activity log '{operation_id}': {message}")]
    Formatting {
        /// The operation id of the log entry that failed to format.
        operation_id: String,
        /// A human-readable description of the formatting failure.
        message: String,
    },

    /// The logger was misconfigured (bad path, unsupported format, etc).
    #[error("logger configuration error in '{field}': {message}")]
    Configuration {
        /// The configuration field that is invalid.
        field: String,
        /// A human-readable description of the problem.
        message: String,
    },
}
