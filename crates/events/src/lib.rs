//! Broker boundary for content ingestion.
//!
//! The upload service pushes one JSON payload per finished (or failed)
//! upload onto a list; the ingestion worker pops from both lists and pushes
//! payloads it could not process onto a dead-letter list. [`EventQueue`]
//! abstracts the broker so the worker can run against Redis in production
//! and against [`MemoryQueue`] in tests.

pub mod event;
pub mod memory;
pub mod redis_queue;

use std::time::Duration;

use async_trait::async_trait;

pub use event::{IngestionEvent, UploadOutcome, UploadQueues};
pub use memory::MemoryQueue;
pub use redis_queue::RedisQueue;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Broker error: {0}")]
    Broker(#[from] redis::RedisError),

    #[error("Queue closed")]
    Closed,
}

/// A list-based message broker.
#[async_trait]
pub trait EventQueue: Send + Sync {
    /// Pop the first available entry from `keys`, checked in order, waiting
    /// up to `timeout`. `Ok(None)` when the wait timed out.
    ///
    /// The entry is removed before the caller processes it; there is no
    /// acknowledgment.
    async fn pop(&self, keys: &[String], timeout: Duration)
        -> Result<Option<IngestionEvent>, QueueError>;

    /// Append `payload` to the list at `key`.
    async fn push(&self, key: &str, payload: &str) -> Result<(), QueueError>;
}
