//! Delivery identifier generation.
//!
//! The source generates identifiers from a raw timestamp string, which is
//! fragile under fast loops (spec §9 "Identifier generation"). This
//! generator instead concatenates the current wall-clock timestamp with a
//! process-local monotonic counter so bursts can never collide.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

/// Generates globally-unique (within this process's lifetime) delivery
/// identifiers.
#[derive(Debug, Default)]
pub struct IdGenerator {
    counter: AtomicU64,
}

impl IdGenerator {
    /// Creates a fresh generator with its counter at zero.
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Produces the next identifier: `<unix_nanos>-<counter>`.
    pub fn next_id(&self) -> String {
        let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let seq = self.counter.fetch_add(1, Ordering::Relaxed);
        format!("{nanos}-{seq}")
    }
}
