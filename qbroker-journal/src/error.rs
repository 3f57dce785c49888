//! Error types for journal storage and replay.

use thiserror::Error;

/// Failures from the on-disk send/ack journals or from replaying them
/// back into the broker.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The embedded SQLite store reported an error.
    #[error("journal database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A blocking database task panicked or was cancelled.
    #[error("journal task failed to complete: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// Replay's client connection to the broker failed.
    #[error("replay client error: {0}")]
    Client(#[from] qbroker_client::ClientError),
}
