//! Concrete [`ActivityLogger`](super::activity::ActivityLogger) destinations.

mod console;
mod file;
mod tracing;

pub use console::ConsoleActivityLogger;
pub use file::FileActivityLogger;
pub use tracing::TracingActivityLogger;
