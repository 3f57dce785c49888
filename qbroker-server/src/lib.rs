//! # qbroker-server — the broker process
//!
//! Wires together the pieces the other workspace crates provide: the
//! in-memory stores ([`qbroker_store`]), the wire protocol
//! ([`qbroker_proto`]), the request dispatcher ([`dispatch`]), the two
//! journal workers and crash-recovery replay ([`qbroker_journal`]), and
//! the redelivery worker ([`qbroker_redelivery`]). [`run`] is the single
//! entry point the `qbroker-server` binary calls after parsing its
//! configuration.

pub mod config;
pub mod connection;
pub mod dispatch;
pub mod error;

use std::sync::Arc;
use std::time::Duration;

use qbroker_client::{build_pool, Client, PoolConfig};
use qbroker_journal::{replay_all, run_ack_log_worker, run_send_log_worker, Journal, JournalError};
use qbroker_osl::logging::{ActivityLogger, TracingActivityLogger};
use qbroker_redelivery::run_redelivery_worker;
use qbroker_rt::mailbox::BackpressureStrategy;
use qbroker_rt::BoundedMailbox;
use qbroker_store::BrokerStore;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::config::BrokerConfig;
use crate::connection::handle_connection;
use crate::dispatch::Dispatcher;
use crate::error::ServerError;

/// Capacity of the send-log/ack-log event mailboxes. Spec §4.5 requires
/// a bound generous enough that a `send-accepted`/`delete-queue` event
/// is never dropped in practice; every event posted here is load-bearing
/// (unlike a stats-only channel), so the bound exists only to cap memory
/// under a runaway producer, not to shed load.
const LOG_MAILBOX_CAPACITY: usize = 8192;

/// Size of the client connection pool shared by journal replay and the
/// redelivery worker (spec §4.7: "a client connection pool of size 100").
const CLIENT_POOL_SIZE: usize = 100;

/// Runs the broker until a Ctrl-C/SIGTERM is observed.
///
/// Thin wrapper over [`run_until`] using `tokio::signal::ctrl_c` as the
/// shutdown trigger; see [`run_until`] for the start-up/shutdown order.
pub async fn run(config: BrokerConfig) -> Result<(), ServerError> {
    run_until(config, async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to install Ctrl-C handler, shutting down anyway");
        }
    })
    .await
}

/// Runs the broker until `shutdown` resolves.
///
/// Start-up order: bind the listener, spawn the send-log/ack-log worker
/// loops, replay both journals back into the store, build the
/// redelivery worker's connection pool, then accept connections. Shut
/// down in the order spec §5 names: the accept loop stops first,
/// in-flight handlers drain, the log workers flush their mailboxes, and
/// the journal files close last (when their `Arc<Journal>`s drop at the
/// end of this function). Exposed (rather than folded into [`run`]) so
/// integration tests can drive shutdown deterministically instead of
/// racing a real Ctrl-C.
pub async fn run_until(
    config: BrokerConfig,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<(), ServerError> {
    let store = Arc::new(BrokerStore::new());
    let send_journal = Arc::new(Journal::open(
        &config.completely_persistent_process_db_file,
        "send_msg",
    )?);
    let ack_journal = Arc::new(Journal::open(&config.ack_process_db_file, "ack_msg")?);

    // spec §4.5/§4.6: a full mailbox MUST NOT drop a `send-accepted` or
    // `delete-queue` event, so these block the dispatcher rather than
    // erroring (the default `BackpressureStrategy::Error` would make
    // `send()` return `MailboxError::Full`, which `dispatch.rs` only logs).
    let (send_mailbox, send_tx) =
        BoundedMailbox::with_backpressure(LOG_MAILBOX_CAPACITY, BackpressureStrategy::Block);
    let (ack_mailbox, ack_tx) =
        BoundedMailbox::with_backpressure(LOG_MAILBOX_CAPACITY, BackpressureStrategy::Block);
    let activity_logger: Arc<dyn ActivityLogger> = Arc::new(TracingActivityLogger::new());

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&store),
        send_tx,
        ack_tx,
        activity_logger,
        config.user_name.clone(),
        config.passwd.clone(),
    ));

    let listen_addr = config.listen_addr();
    let listener =
        TcpListener::bind(listen_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: listen_addr,
                source,
            })?;
    // `local_addr` (rather than `listen_addr`) so a `PORT: 0` config — as
    // used by tests that need an OS-assigned ephemeral port — still
    // yields a dialable address for replay/redelivery's loopback clients.
    let bound_addr = listener.local_addr().unwrap_or(listen_addr);
    info!(%bound_addr, "broker listening");

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let send_log_handle = tokio::spawn(run_send_log_worker(Arc::clone(&send_journal), send_mailbox));
    let ack_log_handle = tokio::spawn(run_ack_log_worker(Arc::clone(&ack_journal), ack_mailbox));

    let accept_handle = tokio::spawn(accept_loop(
        listener,
        Arc::clone(&dispatcher),
        config.max_conn,
        Duration::from_secs(config.timeout_secs.max(1)),
        shutdown_tx.subscribe(),
    ));

    let connect_addr = loopback_connect_addr(&config, bound_addr.port());
    match replay_journals(&send_journal, &ack_journal, &connect_addr, &config).await {
        Ok((sent, acked)) => info!(sent, acked, "crash-recovery replay complete"),
        Err(err) => warn!(
            error = %err,
            "journal replay failed; broker continues without the recovered rows"
        ),
    }

    let pool_config = PoolConfig {
        addr: connect_addr,
        user_name: config.user_name.clone(),
        passwd: config.passwd.clone(),
    };
    let redelivery_pool = build_pool(pool_config, CLIENT_POOL_SIZE)?;
    let redelivery_handle = tokio::spawn(run_redelivery_worker(
        Arc::clone(&ack_journal),
        redelivery_pool,
        Duration::from_secs(config.resend_interval_secs),
        shutdown_tx.subscribe(),
    ));

    shutdown.await;
    info!("shutdown signal received, draining connections");
    let _ = shutdown_tx.send(());

    if let Err(err) = accept_handle.await {
        warn!(error = %err, "accept loop task panicked");
    }
    debug!("accept loop drained, closing journal mailboxes");
    drop(dispatcher);

    if let Err(err) = send_log_handle.await {
        warn!(error = %err, "send-log worker task panicked");
    }
    if let Err(err) = ack_log_handle.await {
        warn!(error = %err, "ack-log worker task panicked");
    }
    if let Err(err) = redelivery_handle.await {
        warn!(error = %err, "redelivery worker task panicked");
    }

    info!("broker shutdown complete");
    Ok(())
}

/// Accepts connections until `shutdown` fires, then drains every
/// in-flight connection task before returning (spec §5: "accept loop
/// stops first; existing handlers drain").
///
/// Enforces `max_conn` with a counting semaphore; a connection accepted
/// beyond the cap is immediately closed rather than queued (spec §4.4
/// permits either disposition).
async fn accept_loop(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    max_conn: usize,
    idle_timeout: Duration,
    mut shutdown: broadcast::Receiver<()>,
) {
    let semaphore = Arc::new(tokio::sync::Semaphore::new(max_conn));
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer_addr) = match accepted {
                    Ok(pair) => pair,
                    Err(err) => {
                        warn!(error = %err, "accept failed");
                        continue;
                    }
                };

                match Arc::clone(&semaphore).try_acquire_owned() {
                    Ok(permit) => {
                        let dispatcher = Arc::clone(&dispatcher);
                        connections.spawn(async move {
                            handle_connection(stream, peer_addr, dispatcher, idle_timeout).await;
                            drop(permit);
                        });
                    }
                    Err(_) => {
                        debug!(%peer_addr, max_conn, "connection cap reached, closing immediately");
                        drop(stream);
                    }
                }
            }
            _ = shutdown.recv() => {
                info!("accept loop stopping");
                break;
            }
        }
    }

    while connections.join_next().await.is_some() {}
}

/// The address replay/redelivery clients dial to reach this same
/// process. `0.0.0.0` is a bind address, not a connect address, so it is
/// rewritten to the loopback interface. `bound_port` (rather than
/// `config.port`) is used so a `PORT: 0` config resolves to whatever
/// port the OS actually assigned.
fn loopback_connect_addr(config: &BrokerConfig, bound_port: u16) -> String {
    let host = if config.host == "0.0.0.0" {
        "127.0.0.1"
    } else {
        config.host.as_str()
    };
    format!("{host}:{bound_port}")
}

async fn replay_journals(
    send_journal: &Arc<Journal>,
    ack_journal: &Arc<Journal>,
    connect_addr: &str,
    config: &BrokerConfig,
) -> Result<(usize, usize), JournalError> {
    let send_client = connect_and_login(connect_addr, config).await?;
    let ack_client = connect_and_login(connect_addr, config).await?;
    replay_all(
        Arc::clone(send_journal),
        Arc::clone(ack_journal),
        send_client,
        ack_client,
    )
    .await
}

async fn connect_and_login(addr: &str, config: &BrokerConfig) -> Result<Client, JournalError> {
    let mut client = Client::connect(addr).await.map_err(JournalError::from)?;
    client
        .login(&config.user_name, &config.passwd)
        .await
        .map_err(JournalError::from)?;
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_rewrites_unspecified_host() {
        let config = sample_config("0.0.0.0");
        assert_eq!(loopback_connect_addr(&config, 15673), "127.0.0.1:15673");
    }

    #[test]
    fn loopback_preserves_explicit_host() {
        let config = sample_config("10.0.0.5");
        assert_eq!(loopback_connect_addr(&config, 15673), "10.0.0.5:15673");
    }

    fn sample_config(host: &str) -> BrokerConfig {
        BrokerConfig {
            host: host.to_string(),
            port: 15673,
            max_conn: 100,
            user_name: "admin".to_string(),
            passwd: "s3cr3t".to_string(),
            timeout_secs: 10,
            ack_process_db_file: "/tmp/ack.db".into(),
            completely_persistent_process_db_file: "/tmp/send.db".into(),
            resend_interval_secs: 300,
        }
    }
}
