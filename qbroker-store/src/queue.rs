//! The broker's per-queue state and the store that owns all queues.
//!
//! Per spec §9 ("In-memory stores with per-queue sets/FIFOs"), each
//! queue's FIFO, in-flight set, and counters live behind one
//! `parking_lot::Mutex` so declare/delete/clear apply to all three
//! atomically (spec §3 invariant 5) without a cross-store lock-ordering
//! discipline.

use std::collections::{HashSet, VecDeque};

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::ids::IdGenerator;
use crate::stats::QueueStats;

/// One queued message: its broker-assigned identifier and opaque payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueuedMessage {
    pub message_id: String,
    pub message_data: String,
}

/// A queue's FIFO, in-flight set, and counters, guarded together.
#[derive(Debug, Default)]
struct QueueEntry {
    fifo: VecDeque<QueuedMessage>,
    inflight: HashSet<String>,
    stats: QueueStats,
}

impl QueueEntry {
    fn byte_size(&self) -> usize {
        self.fifo
            .iter()
            .map(|m| m.message_id.len() + m.message_data.len())
            .sum()
    }

    fn inflight_byte_size(&self) -> usize {
        self.inflight.iter().map(|id| id.len()).sum()
    }
}

/// Snapshot of one queue's depth/in-flight/rate figures for `GET_STAT`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueSnapshot {
    pub depth: usize,
    pub depth_bytes: usize,
    pub inflight: usize,
    pub inflight_bytes: usize,
    pub send_rate: f64,
    pub fetch_rate: f64,
    pub ack_rate: f64,
}

/// The broker's in-memory state: every declared queue, keyed by name.
#[derive(Debug)]
pub struct BrokerStore {
    queues: DashMap<String, Mutex<QueueEntry>>,
    ids: IdGenerator,
}

impl Default for BrokerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BrokerStore {
    pub fn new() -> Self {
        Self {
            queues: DashMap::new(),
            ids: IdGenerator::new(),
        }
    }

    /// `DECLARE_QUEUE`: creates the queue, its in-flight set, and its
    /// counters. Fails without mutation if the queue already exists.
    pub fn declare(&self, queue_name: &str) -> Result<(), StoreError> {
        if self.queues.contains_key(queue_name) {
            return Err(StoreError::QueueAlreadyExists(queue_name.to_string()));
        }
        self.queues
            .entry(queue_name.to_string())
            .or_insert_with(|| Mutex::new(QueueEntry::default()));
        Ok(())
    }

    /// `DELETE_QUEUE`: removes the queue, its in-flight set, and counters
    /// unconditionally, even with in-flight entries outstanding (spec §9
    /// open question 2).
    pub fn delete(&self, queue_name: &str) -> Result<(), StoreError> {
        self.queues
            .remove(queue_name)
            .map(|_| ())
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))
    }

    /// `CLEAR_QUEUE`: empties the FIFO and in-flight set, keeping the
    /// queue declared and its counters intact.
    pub fn clear(&self, queue_name: &str) -> Result<(), StoreError> {
        let entry = self
            .queues
            .get(queue_name)
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))?;
        let mut guard = entry.lock();
        guard.fifo.clear();
        guard.inflight.clear();
        Ok(())
    }

    /// `SEND_DATA_TO_QUEUE`: mints a fresh identifier, appends to the
    /// FIFO tail, and increments `sent`. Returns the new identifier.
    pub fn send(&self, queue_name: &str, message_data: String) -> Result<String, StoreError> {
        let entry = self
            .queues
            .get(queue_name)
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))?;
        let message_id = self.ids.next_id();
        let mut guard = entry.lock();
        guard.fifo.push_back(QueuedMessage {
            message_id: message_id.clone(),
            message_data,
        });
        guard.stats.record_sent();
        Ok(message_id)
    }

    /// `GET_DATA_FROM_QUEUE`: pops the FIFO head into the in-flight set
    /// and increments `fetched`. Fails if the queue is unknown or empty.
    pub fn fetch(&self, queue_name: &str) -> Result<QueuedMessage, StoreError> {
        let entry = self
            .queues
            .get(queue_name)
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))?;
        let mut guard = entry.lock();
        let message = guard
            .fifo
            .pop_front()
            .ok_or_else(|| StoreError::QueueEmpty(queue_name.to_string()))?;
        guard.inflight.insert(message.message_id.clone());
        guard.stats.record_fetched();
        Ok(message)
    }

    /// `ACK_MESSAGE`: removes `message_id` from the in-flight set and
    /// increments `acked`.
    pub fn ack(&self, queue_name: &str, message_id: &str) -> Result<(), StoreError> {
        self.remove_inflight(queue_name, message_id, true)
    }

    /// `DELETE_ACK_MESSAGE_ID`: administrative drop, identical to `ack`
    /// but does not touch the `acked` counter.
    pub fn admin_drop(&self, queue_name: &str, message_id: &str) -> Result<(), StoreError> {
        self.remove_inflight(queue_name, message_id, false)
    }

    fn remove_inflight(
        &self,
        queue_name: &str,
        message_id: &str,
        count_as_acked: bool,
    ) -> Result<(), StoreError> {
        let entry = self
            .queues
            .get(queue_name)
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))?;
        let mut guard = entry.lock();
        if !guard.inflight.remove(message_id) {
            return Err(StoreError::NotInFlight {
                queue_name: queue_name.to_string(),
                message_id: message_id.to_string(),
            });
        }
        if count_as_acked {
            guard.stats.record_acked();
        }
        Ok(())
    }

    /// `RESTORE_ACK_MESSAGE_ID`: recovery-only, inserts `message_id`
    /// directly into the in-flight set. The queue must already exist.
    pub fn restore_inflight(&self, queue_name: &str, message_id: &str) -> Result<(), StoreError> {
        let entry = self
            .queues
            .get(queue_name)
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))?;
        entry.lock().inflight.insert(message_id.to_string());
        Ok(())
    }

    /// `RESTORE_SEND_MESSAGE`: recovery-only, appends to the FIFO tail
    /// preserving the caller-supplied identifier (spec §9 open question
    /// 1). A no-op (but not an error) if the identifier is already
    /// present in this queue's FIFO or in-flight set, so replay is
    /// idempotent.
    pub fn restore_send(
        &self,
        queue_name: &str,
        message_id: &str,
        message_data: String,
    ) -> Result<(), StoreError> {
        let entry = self
            .queues
            .get(queue_name)
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))?;
        let mut guard = entry.lock();
        let already_present = guard.inflight.contains(message_id)
            || guard.fifo.iter().any(|m| m.message_id == message_id);
        if already_present {
            return Ok(());
        }
        guard.fifo.push_back(QueuedMessage {
            message_id: message_id.to_string(),
            message_data,
        });
        Ok(())
    }

    /// `GET_SPEED`: current send/fetch/ack rates for one queue.
    pub fn speed(&self, queue_name: &str) -> Result<(f64, f64, f64), StoreError> {
        let entry = self
            .queues
            .get(queue_name)
            .ok_or_else(|| StoreError::QueueNotFound(queue_name.to_string()))?;
        Ok(entry.lock().stats.rates())
    }

    /// `GET_STAT`: a consistent-per-queue snapshot of every declared
    /// queue's depth, in-flight count, byte footprint, and rates.
    pub fn snapshot(&self) -> Vec<(String, QueueSnapshot)> {
        self.queues
            .iter()
            .map(|entry| {
                let queue_name = entry.key().clone();
                let mut guard = entry.value().lock();
                let (send_rate, fetch_rate, ack_rate) = guard.stats.rates();
                let snapshot = QueueSnapshot {
                    depth: guard.fifo.len(),
                    depth_bytes: guard.byte_size(),
                    inflight: guard.inflight.len(),
                    inflight_bytes: guard.inflight_byte_size(),
                    send_rate,
                    fetch_rate,
                    ack_rate,
                };
                (queue_name, snapshot)
            })
            .collect()
    }

    /// Whether `queue_name` is currently declared.
    pub fn exists(&self, queue_name: &str) -> bool {
        self.queues.contains_key(queue_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_is_idempotent_failure_on_repeat() {
        let store = BrokerStore::new();
        store.declare("q1").unwrap();
        assert!(matches!(
            store.declare("q1"),
            Err(StoreError::QueueAlreadyExists(_))
        ));
    }

    #[test]
    fn send_then_fetch_round_trips_payload() {
        let store = BrokerStore::new();
        store.declare("q1").unwrap();
        let id = store.send("q1", "hello".to_string()).unwrap();
        let fetched = store.fetch("q1").unwrap();
        assert_eq!(fetched.message_id, id);
        assert_eq!(fetched.message_data, "hello");
    }

    #[test]
    fn fetch_on_empty_queue_fails() {
        let store = BrokerStore::new();
        store.declare("q1").unwrap();
        assert!(matches!(store.fetch("q1"), Err(StoreError::QueueEmpty(_))));
    }

    #[test]
    fn ack_requires_inflight_membership() {
        let store = BrokerStore::new();
        store.declare("q1").unwrap();
        let id = store.send("q1", "x".to_string()).unwrap();
        store.fetch("q1").unwrap();
        store.ack("q1", &id).unwrap();
        assert!(matches!(
            store.ack("q1", &id),
            Err(StoreError::NotInFlight { .. })
        ));
    }

    #[test]
    fn restore_send_is_idempotent_by_identifier() {
        let store = BrokerStore::new();
        store.declare("q1").unwrap();
        store
            .restore_send("q1", "fixed-id", "payload".to_string())
            .unwrap();
        store
            .restore_send("q1", "fixed-id", "payload".to_string())
            .unwrap();
        let snapshot = store.snapshot();
        let (_, stats) = snapshot.iter().find(|(name, _)| name == "q1").unwrap();
        assert_eq!(stats.depth, 1);
    }

    #[test]
    fn delete_queue_succeeds_with_inflight_entries() {
        let store = BrokerStore::new();
        store.declare("q1").unwrap();
        let id = store.send("q1", "x".to_string()).unwrap();
        store.fetch("q1").unwrap();
        let _ = id;
        store.delete("q1").unwrap();
        assert!(!store.exists("q1"));
    }
}
