//! A `deadpool`-backed pool of broker [`Client`] connections.
//!
//! Grounded in spec §5/§9's "connection pool with health check": checkout
//! validates the connection with `PING` first and discards it in favour
//! of a fresh connection if the ping fails, rather than ever blocking the
//! caller on pool exhaustion.

use deadpool::managed::{self, Metrics, RecycleError, RecycleResult};

use crate::client::Client;
use crate::error::ClientError;

/// Connection parameters shared by every pooled [`Client`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub addr: String,
    pub user_name: String,
    pub passwd: String,
}

/// [`deadpool::managed::Manager`] that opens and authenticates fresh
/// [`Client`] connections, and validates pooled ones with `PING`.
#[derive(Debug)]
pub struct ClientManager {
    config: PoolConfig,
}

impl ClientManager {
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }
}

impl managed::Manager for ClientManager {
    type Type = Client;
    type Error = ClientError;

    async fn create(&self) -> Result<Client, ClientError> {
        let mut client = Client::connect(self.config.addr.as_str()).await?;
        client
            .login(&self.config.user_name, &self.config.passwd)
            .await?;
        Ok(client)
    }

    async fn recycle(&self, client: &mut Client, _: &Metrics) -> RecycleResult<ClientError> {
        match client.ping().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(RecycleError::message("broker rejected PING")),
            Err(err) => Err(RecycleError::Backend(err)),
        }
    }
}

/// A bounded pool of authenticated broker connections (spec §4.7 sizes
/// this at 100 for the redelivery worker).
pub type ClientPool = managed::Pool<ClientManager>;

/// Builds a [`ClientPool`] with the given maximum size.
pub fn build_pool(config: PoolConfig, max_size: usize) -> Result<ClientPool, managed::BuildError> {
    managed::Pool::builder(ClientManager::new(config))
        .max_size(max_size)
        .build()
}
