//! # qbroker-client — the internal replay/redelivery TCP client
//!
//! A thin wrapper over `qbroker-proto`'s framing for the two collaborators
//! that need to speak the wire protocol from inside the broker host: the
//! send-log/ack-log replay procedures ([`client::Client`] directly) and
//! the redelivery worker ([`pool::ClientPool`], a health-checked
//! connection pool). This is not the public client driver library — that
//! remains an external collaborator (spec §1, §13).

pub mod client;
pub mod error;
pub mod pool;

pub use client::Client;
pub use error::ClientError;
pub use pool::{build_pool, ClientManager, ClientPool, PoolConfig};
