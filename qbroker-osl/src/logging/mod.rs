//! Structured activity logging.
//!
//! The broker and its sidecar workers record one [`ActivityLog`] entry per
//! operation and hand it to whichever [`ActivityLogger`] destination the
//! host process configures: [`TracingActivityLogger`] for structured
//! `tracing` output, [`ConsoleActivityLogger`] for stdout/stderr, or
//! [`FileActivityLogger`] for an append-only audit file.

mod activity;
mod config;
mod error;
mod formatter;
pub mod loggers;
mod middleware;

pub use activity::{ActivityLog, ActivityLogger};
pub use config::{LogFormat, LogLevel, LoggerConfig};
pub use error::LogError;
pub use formatter::LogFormatter;
pub use loggers::{ConsoleActivityLogger, FileActivityLogger, TracingActivityLogger};
pub use middleware::LoggerMiddleware;
