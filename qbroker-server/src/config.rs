//! Broker configuration (spec §6 "Configuration file").
//!
//! Written once by the (out-of-scope) operator CLI and read here. Field
//! names match the JSON keys verbatim so the file can be shared unchanged
//! with that external tool.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ServerError;

/// The well-known path consulted when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/qbroker/qbroker.json";

/// The broker's full runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    #[serde(rename = "HOST")]
    pub host: String,
    #[serde(rename = "PORT")]
    pub port: u16,
    #[serde(rename = "MAX_CONN")]
    pub max_conn: usize,
    #[serde(rename = "USER_NAME")]
    pub user_name: String,
    #[serde(rename = "PASSWD")]
    pub passwd: String,
    #[serde(rename = "TIMEOUT")]
    pub timeout_secs: u64,
    #[serde(rename = "ACK_PROCESS_DB_FILE")]
    pub ack_process_db_file: PathBuf,
    #[serde(rename = "COMPLETELY_PERSISTENT_PROCESS_DB_FILE")]
    pub completely_persistent_process_db_file: PathBuf,
    #[serde(rename = "RESEND_INTERVAL")]
    pub resend_interval_secs: u64,
}

impl BrokerConfig {
    /// Reads and validates the configuration file at `path`.
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let text = std::fs::read_to_string(path).map_err(|source| ServerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BrokerConfig = serde_json::from_str(&text)
            .map_err(|err| ServerError::ConfigInvalid(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The `HOST`/`PORT` pair as a [`SocketAddr`], failing validation
    /// already having ruled out an unparseable host.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.parse::<IpAddr>().unwrap_or(IpAddr::from([0, 0, 0, 0])),
            self.port,
        )
    }

    /// Validates the invariants spec §6's CLI surface enforces: a parseable
    /// local address, a port in 1–65535, and credentials of at least 5
    /// characters.
    fn validate(&self) -> Result<(), ServerError> {
        if self.host.parse::<IpAddr>().is_err() {
            return Err(ServerError::ConfigInvalid(format!(
                "HOST '{}' is not a valid local address",
                self.host
            )));
        }
        if self.port == 0 {
            return Err(ServerError::ConfigInvalid(
                "PORT must be in 1-65535".to_string(),
            ));
        }
        if self.user_name.len() < 5 || self.passwd.len() < 5 {
            return Err(ServerError::ConfigInvalid(
                "USER_NAME and PASSWD must be at least 5 characters".to_string(),
            ));
        }
        if self.max_conn == 0 {
            return Err(ServerError::ConfigInvalid(
                "MAX_CONN must be greater than zero".to_string(),
            ));
        }
        if self.resend_interval_secs == 0 {
            return Err(ServerError::ConfigInvalid(
                "RESEND_INTERVAL must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
