//! The `qbroker-server` binary: loads the configuration file and runs the
//! broker until it receives a shutdown signal.
//!
//! The flag surface that *writes* this configuration file (HOST, PORT,
//! MAX_CONN, ... plus `CONFIG_REUSE`) belongs to the out-of-scope
//! operator CLI (spec §1, §6). This binary only consumes an existing
//! file, via the one flag it does own: `--config`.

use std::path::PathBuf;

use clap::Parser;
use qbroker_server::config::{BrokerConfig, DEFAULT_CONFIG_PATH};
use tracing_subscriber::EnvFilter;

/// Starts the broker against an already-written configuration file.
#[derive(Debug, Parser)]
#[command(name = "qbroker-server", about = "In-memory message broker with durable redelivery")]
struct Cli {
    /// Path to the JSON configuration file written by the operator CLI.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = BrokerConfig::load(&cli.config)?;

    qbroker_server::run(config).await?;
    Ok(())
}
