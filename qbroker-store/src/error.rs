//! Error types for in-memory store operations.

use thiserror::Error;

/// Semantic failures from the queue/in-flight/stats store. These map to
/// `status=0` responses — the connection stays open.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `DECLARE_QUEUE` named a queue that already exists.
    #[error("queue '{0}' already exists")]
    QueueAlreadyExists(String),

    /// The named queue has not been declared (or was deleted).
    #[error("queue '{0}' does not exist")]
    QueueNotFound(String),

    /// `GET_DATA_FROM_QUEUE` on an empty (but declared) queue.
    #[error("queue '{0}' is empty")]
    QueueEmpty(String),

    /// `ACK_MESSAGE`/`DELETE_ACK_MESSAGE_ID` named an identifier that is
    /// not currently in-flight for that queue.
    #[error("message '{message_id}' is not in flight on queue '{queue_name}'")]
    NotInFlight {
        /// The queue that was checked.
        queue_name: String,
        /// The identifier that was not found.
        message_id: String,
    },
}
