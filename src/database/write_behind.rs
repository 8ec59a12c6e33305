//! Write-behind queue for durable storage.
//!
//! Mutations enqueue the serialized value for a key and return immediately.
//! The UI flushes the queue once a frame has been drawn. Only the newest
//! value per key is kept, so a burst of ratings costs one write.

use super::storage::KeyValueStore;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct WriteBehindQueue {
    pending: BTreeMap<String, String>,
}

impl WriteBehindQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `value` for `key`, replacing any write not yet flushed
    pub fn enqueue(&mut self, key: &str, value: String) {
        log::debug!("queued write for '{}' ({} bytes)", key, value.len());
        self.pending.insert(key.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Writes every pending value. Failed writes are logged and dropped; the
    /// in-memory state they came from stays authoritative. Returns the number
    /// of successful writes.
    pub fn flush(&mut self, store: &mut dyn KeyValueStore) -> usize {
        let mut written = 0;
        for (key, value) in std::mem::take(&mut self.pending) {
            match store.set_item(&key, &value) {
                Ok(()) => written += 1,
                Err(e) => log::warn!("Failed to persist '{}': {}", key, e),
            }
        }
        if written > 0 {
            log::debug!("flushed {} pending write(s)", written);
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::storage::{MemoryStore, UnavailableStore};

    #[test]
    fn test_nothing_written_before_flush() {
        let mut queue = WriteBehindQueue::new();
        let store = MemoryStore::new();

        queue.enqueue("favorites", "[\"a\"]".to_string());

        assert_eq!(queue.len(), 1);
        assert_eq!(store.get_item("favorites").unwrap(), None);
    }

    #[test]
    fn test_flush_keeps_latest_value_per_key() {
        let mut queue = WriteBehindQueue::new();
        let mut store = MemoryStore::new();

        queue.enqueue("reviewed", r#"{"q1":3}"#.to_string());
        queue.enqueue("reviewed", r#"{"q1":1}"#.to_string());
        queue.enqueue("favorites", "[]".to_string());

        assert_eq!(queue.flush(&mut store), 2);
        assert!(queue.is_empty());
        assert_eq!(store.get_item("reviewed").unwrap().as_deref(), Some(r#"{"q1":1}"#));
        assert_eq!(store.get_item("favorites").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_failed_writes_are_dropped() {
        let mut queue = WriteBehindQueue::new();
        queue.enqueue("reviewed", "{}".to_string());

        assert_eq!(queue.flush(&mut UnavailableStore), 0);
        assert!(queue.is_empty());
    }
}
