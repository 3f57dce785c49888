//! Fatal start-up error types.
//!
//! Everything here exits the process non-zero (spec §7 "Fatal"); handler-
//! level failures never reach this type — they are answered on the wire
//! and keep the process alive.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort the broker before (or while) it starts serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configuration file could not be read or parsed.
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file parsed but failed validation.
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    /// The listen address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// A journal database could not be opened.
    #[error("failed to open journal: {0}")]
    Journal(#[from] qbroker_journal::JournalError),

    /// The connection pool used for replay/redelivery could not be built.
    #[error("failed to build connection pool: {0}")]
    Pool(#[from] deadpool::managed::BuildError),
}
