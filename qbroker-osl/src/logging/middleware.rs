//! Generic logger middleware.
//!
//! Wraps an [`ActivityLogger`] so request-handling code can record an
//! activity without caring which concrete destination is configured.

use super::activity::{ActivityLog, ActivityLogger};
use super::error::LogError;

/// Generic logger middleware wrapping a single [`ActivityLogger`].
#[derive(Debug)]
pub struct LoggerMiddleware<L> {
    logger: L,
}

impl<L: ActivityLogger> LoggerMiddleware<L> {
    /// Wraps `logger`.
    pub fn new(logger: L) -> Self {
        Self { logger }
    }

    /// Borrows the wrapped logger.
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Records an activity through the wrapped logger.
    pub async fn record(&self, log: ActivityLog) -> Result<(), LogError> {
        self.logger.log_activity(log).await
    }

    /// Flushes the wrapped logger.
    pub async fn flush(&self) -> Result<(), LogError> {
        self.logger.flush().await
    }
}
