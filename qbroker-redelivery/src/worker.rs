//! The redelivery worker loop (spec §4.7).
//!
//! Sleeps for the configured resend interval, then pages through the ack
//! journal for rows older than `now - resend_interval`, re-injecting
//! each payload and evicting the original in-flight entry. Steps 1 and 2
//! of a single row cannot be made atomic with step 3 (the journal
//! delete); a crash between them yields a duplicate delivery, which
//! at-least-once semantics permit (spec §4.7 "Ordering").

use std::sync::Arc;
use std::time::Duration;

use qbroker_client::ClientPool;
use qbroker_journal::Journal;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::RedeliveryError;

const PAGE_SIZE: i64 = 100;

/// Runs the redelivery loop until `shutdown` fires.
pub async fn run_redelivery_worker(
    journal: Arc<Journal>,
    pool: ClientPool,
    resend_interval: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = tokio::time::sleep(resend_interval) => {}
            _ = shutdown.recv() => {
                debug!("redelivery worker received shutdown signal, exiting");
                break;
            }
        }

        if let Err(err) = sweep(&journal, &pool, resend_interval).await {
            warn!(error = %err, "redelivery sweep failed, will retry next interval");
        }
    }
}

/// One sweep: pages through every ack-journal row older than `cutoff`,
/// resending and evicting each. Stops early if an entire page makes no
/// progress, so a persistently failing row is retried next sweep rather
/// than spinning forever in this one.
async fn sweep(
    journal: &Journal,
    pool: &ClientPool,
    resend_interval: Duration,
) -> Result<(), RedeliveryError> {
    let cutoff = now_nanos() - resend_interval.as_nanos() as i64;
    let mut total_redelivered = 0;

    loop {
        let batch = journal.older_than(cutoff, PAGE_SIZE)?;
        if batch.is_empty() {
            break;
        }

        let mut progressed = false;
        for row in &batch {
            let mut conn = match pool.get().await {
                Ok(conn) => conn,
                Err(err) => {
                    warn!(error = %err, "no pooled connection available, deferring row");
                    continue;
                }
            };

            if let Err(err) = conn
                .send_data_to_queue(&row.queue_name, &row.message_data)
                .await
            {
                warn!(message_id = %row.message_id, error = %err, "resend failed, retrying next sweep");
                continue;
            }

            if let Err(err) = conn
                .delete_ack_message_id(&row.queue_name, &row.message_id)
                .await
            {
                warn!(message_id = %row.message_id, error = %err, "admin-drop failed after resend; original id remains in-flight until retried");
                continue;
            }

            journal.delete_by_id(&row.message_id)?;
            total_redelivered += 1;
            progressed = true;
        }

        if !progressed {
            break;
        }
    }

    if total_redelivered > 0 {
        info!(total_redelivered, "redelivery sweep complete");
    }
    Ok(())
}

fn now_nanos() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}
