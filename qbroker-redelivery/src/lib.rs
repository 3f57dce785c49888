//! # qbroker-redelivery — re-injects aged in-flight deliveries
//!
//! Periodically scans the ack journal for rows older than the configured
//! resend interval, resends each payload, then asks the broker to drop
//! the original in-flight entry (spec §4.7). Uses a `deadpool`-managed
//! pool of `qbroker-client` connections, validated with `PING` on
//! checkout (spec §5/§9).

pub mod error;
pub mod worker;

pub use error::RedeliveryError;
pub use worker::run_redelivery_worker;
