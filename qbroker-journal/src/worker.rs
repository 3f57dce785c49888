//! The send-log and ack-log worker loops.
//!
//! Each owns exactly one journal table and is the only actor permitted
//! to mutate it (spec §5 "shared-resource policy"). Both loops run until
//! their mailbox sender is dropped, which happens when the broker shuts
//! down (spec §5 "graceful shutdown": log workers flush their input
//! queues before the process exits).

use std::sync::Arc;

use qbroker_rt::mailbox::MailboxReceiver;
use qbroker_rt::BoundedMailbox;
use tracing::{debug, warn};

use crate::db::{Journal, JournalRow};
use crate::error::JournalError;
use crate::events::{AckLogEvent, SendLogEvent};

/// Runs the send-log worker: owns the send journal, applying
/// `Accepted`/`Delivered`/`QueueDeleted` events until the mailbox closes.
pub async fn run_send_log_worker(
    journal: Arc<Journal>,
    mut mailbox: BoundedMailbox<SendLogEvent>,
) {
    while let Some(envelope) = mailbox.recv().await {
        let journal = Arc::clone(&journal);
        let result = match envelope.payload {
            SendLogEvent::Accepted {
                message_id,
                queue_name,
                message_data,
                pub_date,
            } => {
                tokio::task::spawn_blocking(move || {
                    journal.insert(&JournalRow {
                        message_id,
                        queue_name,
                        message_data,
                        pub_date,
                    })
                })
                .await
            }
            SendLogEvent::Delivered { message_id } => {
                tokio::task::spawn_blocking(move || journal.delete_by_id(&message_id)).await
            }
            SendLogEvent::QueueDeleted { queue_name } => {
                tokio::task::spawn_blocking(move || journal.delete_by_queue(&queue_name)).await
            }
        };
        log_outcome("send-log", result);
    }
    debug!("send-log worker mailbox closed, exiting");
}

/// Runs the ack-log worker: owns the ack journal, applying
/// `DeliveryIssued`/`Acked`/`AdminDropped`/`QueueDeleted` events until the
/// mailbox closes.
pub async fn run_ack_log_worker(journal: Arc<Journal>, mut mailbox: BoundedMailbox<AckLogEvent>) {
    while let Some(envelope) = mailbox.recv().await {
        let journal = Arc::clone(&journal);
        let result = match envelope.payload {
            AckLogEvent::DeliveryIssued {
                message_id,
                queue_name,
                message_data,
                pub_date,
            } => {
                tokio::task::spawn_blocking(move || {
                    journal.insert(&JournalRow {
                        message_id,
                        queue_name,
                        message_data,
                        pub_date,
                    })
                })
                .await
            }
            AckLogEvent::Acked { message_id } | AckLogEvent::AdminDropped { message_id } => {
                tokio::task::spawn_blocking(move || journal.delete_by_id(&message_id)).await
            }
            AckLogEvent::QueueDeleted { queue_name } => {
                tokio::task::spawn_blocking(move || journal.delete_by_queue(&queue_name)).await
            }
        };
        log_outcome("ack-log", result);
    }
    debug!("ack-log worker mailbox closed, exiting");
}

fn log_outcome(worker: &str, result: Result<Result<(), JournalError>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(worker, error = %err, "journal write failed, will re-converge on next restart"),
        Err(err) => warn!(worker, error = %err, "journal write task panicked"),
    }
}
