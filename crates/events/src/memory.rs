//! In-process broker with the same list semantics as the Redis one.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::{EventQueue, IngestionEvent, QueueError};

#[derive(Debug, Default)]
pub struct MemoryQueue {
    lists: Mutex<HashMap<String, VecDeque<String>>>,
    pushed: Notify,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the list at `key`, head first.
    pub fn entries(&self, key: &str) -> Vec<String> {
        self.lock()
            .get(key)
            .map(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self, key: &str) -> usize {
        self.lock().get(key).map_or(0, VecDeque::len)
    }

    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }

    fn try_pop(&self, keys: &[String]) -> Option<IngestionEvent> {
        let mut lists = self.lock();
        keys.iter().find_map(|key| {
            lists
                .get_mut(key)
                .and_then(VecDeque::pop_front)
                .map(|payload| IngestionEvent::new(key.clone(), payload))
        })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, VecDeque<String>>> {
        // A panic while holding the lock cannot leave a list half-updated.
        self.lists.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EventQueue for MemoryQueue {
    async fn pop(
        &self,
        keys: &[String],
        timeout: Duration,
    ) -> Result<Option<IngestionEvent>, QueueError> {
        let deadline = Instant::now() + timeout;
        loop {
            let notified = self.pushed.notified();
            tokio::pin!(notified);
            // Register before checking so a push in between is not missed.
            notified.as_mut().enable();

            if let Some(event) = self.try_pop(keys) {
                return Ok(Some(event));
            }
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return Ok(None);
            }
        }
    }

    async fn push(&self, key: &str, payload: &str) -> Result<(), QueueError> {
        self.lock()
            .entry(key.to_string())
            .or_default()
            .push_back(payload.to_string());
        self.pushed.notify_waiters();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn keys(names: &[&str]) -> Vec<String> {
        names.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test]
    async fn pop_returns_entries_in_push_order() {
        let queue = MemoryQueue::new();
        queue.push("a", "1").await.unwrap();
        queue.push("a", "2").await.unwrap();

        let first = queue.pop(&keys(&["a"]), Duration::from_millis(10)).await.unwrap();
        let second = queue.pop(&keys(&["a"]), Duration::from_millis(10)).await.unwrap();
        assert_eq!(first, Some(IngestionEvent::new("a", "1")));
        assert_eq!(second, Some(IngestionEvent::new("a", "2")));
        assert!(queue.is_empty("a"));
    }

    #[tokio::test]
    async fn pop_checks_keys_in_order() {
        let queue = MemoryQueue::new();
        queue.push("low", "x").await.unwrap();
        queue.push("high", "y").await.unwrap();

        let event = queue
            .pop(&keys(&["high", "low"]), Duration::from_millis(10))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.key, "high");
        assert_eq!(queue.entries("low"), vec!["x".to_string()]);
    }

    #[tokio::test]
    async fn pop_times_out_on_empty_lists() {
        let queue = MemoryQueue::new();
        let popped = queue.pop(&keys(&["a"]), Duration::from_millis(20)).await.unwrap();
        assert!(popped.is_none());
    }

    #[tokio::test]
    async fn blocked_pop_wakes_on_push() {
        let queue = Arc::new(MemoryQueue::new());
        let waiter = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.pop(&keys(&["a"]), Duration::from_secs(5)).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        queue.push("a", "late").await.unwrap();

        let event = waiter.await.unwrap().unwrap().unwrap();
        assert_eq!(event.payload, "late");
    }
}
