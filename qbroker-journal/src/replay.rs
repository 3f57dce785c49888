//! Start-up replay: rebuilds broker memory from the two journals.
//!
//! Each worker opens its own client connection and walks its own table
//! page by page in `pub_date` ascending order (spec §4.5/§4.6), declaring
//! each distinct queue it encounters before restoring rows into it.
//! `RESTORE_SEND_MESSAGE`/`RESTORE_ACK_MESSAGE_ID` are idempotent with
//! respect to identifier, so the two replays may run concurrently
//! without coordination (`SPEC_FULL.md` §"Crash recovery / replay").

use std::collections::HashSet;
use std::sync::Arc;

use qbroker_client::Client;
use tracing::info;

use crate::db::Journal;
use crate::error::JournalError;

const PAGE_SIZE: i64 = 100;

/// Replays the send journal into the broker via `client`.
pub async fn replay_send_log(journal: &Journal, client: &mut Client) -> Result<usize, JournalError> {
    let mut declared = HashSet::new();
    let mut offset = 0;
    let mut restored = 0;

    loop {
        let page = journal.page(offset, PAGE_SIZE)?;
        if page.is_empty() {
            break;
        }
        for row in &page {
            if declared.insert(row.queue_name.clone()) {
                client.declare_queue_idempotent(&row.queue_name).await?;
            }
            client
                .restore_send_message(&row.queue_name, &row.message_id, &row.message_data)
                .await?;
            restored += 1;
        }
        offset += page.len() as i64;
    }

    info!(restored, "send journal replay complete");
    Ok(restored)
}

/// Replays the ack journal into the broker's in-flight sets via `client`.
pub async fn replay_ack_log(journal: &Journal, client: &mut Client) -> Result<usize, JournalError> {
    let mut declared = HashSet::new();
    let mut offset = 0;
    let mut restored = 0;

    loop {
        let page = journal.page(offset, PAGE_SIZE)?;
        if page.is_empty() {
            break;
        }
        for row in &page {
            if declared.insert(row.queue_name.clone()) {
                client.declare_queue_idempotent(&row.queue_name).await?;
            }
            client
                .restore_ack_message_id(&row.queue_name, &row.message_id)
                .await?;
            restored += 1;
        }
        offset += page.len() as i64;
    }

    info!(restored, "ack journal replay complete");
    Ok(restored)
}

/// Convenience wrapper running both replays concurrently against two
/// independent client connections, used by `qbroker-server` at start-up.
pub async fn replay_all(
    send_journal: Arc<Journal>,
    ack_journal: Arc<Journal>,
    mut send_client: Client,
    mut ack_client: Client,
) -> Result<(usize, usize), JournalError> {
    let send_fut = async move { replay_send_log(&send_journal, &mut send_client).await };
    let ack_fut = async move { replay_ack_log(&ack_journal, &mut ack_client).await };
    let (sent, acked) = tokio::try_join!(send_fut, ack_fut)?;
    Ok((sent, acked))
}
