//! # qbroker-osl — structured activity logging for the broker
//!
//! The broker's request dispatcher and its sidecar workers (send-log,
//! ack-log, redelivery) each emit one [`logging::ActivityLog`] entry per
//! operation. `qbroker-osl` owns that entry type, the
//! [`logging::ActivityLogger`] trait pluggable destinations implement, and
//! three concrete destinations: [`logging::TracingActivityLogger`],
//! [`logging::ConsoleActivityLogger`], and [`logging::FileActivityLogger`].
//!
//! # Example
//!
//! ```rust
//! use qbroker_osl::logging::{ActivityLog, ActivityLogger, TracingActivityLogger};
//!
//! # async fn example() {
//! let logger = TracingActivityLogger::new();
//! let entry = ActivityLog::new(
//!     "delivery-42".to_string(),
//!     "ack_message".to_string(),
//!     Some("default".to_string()),
//!     "Success".to_string(),
//!     3,
//! );
//! logger.log_activity(entry).await.expect("tracing logger never fails");
//! # }
//! ```

pub mod logging;

pub use logging::{ActivityLog, ActivityLogger, LogError, LogFormat};
