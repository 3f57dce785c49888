//! # qbroker-store — the broker's in-memory queue state
//!
//! [`BrokerStore`] owns every declared queue's FIFO, in-flight set, and
//! statistics counters. Per spec §9, each queue's triple lives behind one
//! lock rather than three separately-locked stores, so declare/delete/
//! clear apply atomically without a cross-store acquisition order to
//! maintain. [`ids::IdGenerator`] mints the delivery identifiers and
//! [`session::Session`] tracks per-connection authentication state.

pub mod error;
pub mod ids;
pub mod queue;
pub mod session;
pub mod stats;

pub use error::StoreError;
pub use ids::IdGenerator;
pub use queue::{BrokerStore, QueueSnapshot, QueuedMessage};
pub use session::Session;
pub use stats::QueueStats;
