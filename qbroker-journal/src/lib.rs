//! # qbroker-journal — the send-log and ack-log workers
//!
//! Owns the two on-disk journals (`send_msg`, `ack_msg`) backing the
//! broker's durable redelivery guarantee. [`db::Journal`] is the shared
//! SQLite-table abstraction; [`worker`] runs the two steady-state
//! consumption loops; [`replay`] rebuilds broker memory from both
//! journals at start-up.

pub mod db;
pub mod error;
pub mod events;
pub mod replay;
pub mod worker;

pub use db::{Journal, JournalRow};
pub use error::JournalError;
pub use events::{AckLogEvent, SendLogEvent};
pub use replay::{replay_ack_log, replay_all, replay_send_log};
pub use worker::{run_ack_log_worker, run_send_log_worker};
