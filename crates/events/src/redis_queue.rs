//! Redis list broker: `BLPOP` to consume, `RPUSH` to produce.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};

use crate::{EventQueue, IngestionEvent, QueueError};

/// Extra time the client waits for a reply beyond the longest blocking pop.
const RESPONSE_MARGIN: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct RedisQueue {
    conn: ConnectionManager,
    /// Longest `BLPOP` wait, in whole seconds, the client will send.
    max_block_secs: u64,
}

impl fmt::Debug for RedisQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisQueue")
            .field("connection", &"ConnectionManager")
            .field("max_block_secs", &self.max_block_secs)
            .finish()
    }
}

impl RedisQueue {
    /// Connect with pops allowed to block for up to `max_block`.
    ///
    /// The connection's response timeout is set above `max_block`. A reply to
    /// `BLPOP` that arrives after the client gave up would carry an entry the
    /// server has already removed.
    pub async fn connect(redis_url: &str, max_block: Duration) -> Result<Self, QueueError> {
        tracing::info!(url = %redis_url, "Connecting to Redis broker");
        let max_block_secs = block_secs(max_block);
        let response_timeout = Duration::from_secs(max_block_secs) + RESPONSE_MARGIN;
        let client = redis::Client::open(redis_url)?;
        let config = ConnectionManagerConfig::new().set_response_timeout(Some(response_timeout));
        let conn = ConnectionManager::new_with_config(client, config).await?;
        Ok(Self {
            conn,
            max_block_secs,
        })
    }
}

/// `BLPOP` takes whole seconds and treats 0 as "forever".
fn block_secs(timeout: Duration) -> u64 {
    let secs = timeout.as_secs() + u64::from(timeout.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl EventQueue for RedisQueue {
    /// Waits at most the `max_block` given to [`RedisQueue::connect`], even
    /// when `timeout` is longer.
    async fn pop(
        &self,
        keys: &[String],
        timeout: Duration,
    ) -> Result<Option<IngestionEvent>, QueueError> {
        let seconds = block_secs(timeout).min(self.max_block_secs);
        let mut conn = self.conn.clone();
        let popped: Option<(String, String)> = redis::cmd("BLPOP")
            .arg(keys)
            .arg(seconds)
            .query_async(&mut conn)
            .await?;
        Ok(popped.map(|(key, payload)| IngestionEvent { key, payload }))
    }

    async fn push(&self, key: &str, payload: &str) -> Result<(), QueueError> {
        let mut conn = self.conn.clone();
        let _len: i64 = redis::cmd("RPUSH")
            .arg(key)
            .arg(payload)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_time_rounds_up_to_whole_seconds() {
        assert_eq!(block_secs(Duration::ZERO), 1);
        assert_eq!(block_secs(Duration::from_millis(50)), 1);
        assert_eq!(block_secs(Duration::from_secs(1)), 1);
        assert_eq!(block_secs(Duration::from_millis(1500)), 2);
    }
}
