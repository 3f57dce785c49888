//! Error types for the redelivery sweep.

use thiserror::Error;

/// Failures while sweeping the ack journal for aged deliveries.
#[derive(Debug, Error)]
pub enum RedeliveryError {
    /// Reading or writing the ack journal failed.
    #[error("ack journal error: {0}")]
    Journal(#[from] qbroker_journal::JournalError),

    /// The connection pool could not hand out a client.
    #[error("connection pool error: {0}")]
    Pool(#[from] deadpool::managed::PoolError<qbroker_client::ClientError>),
}
