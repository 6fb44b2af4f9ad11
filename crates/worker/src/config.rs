use std::time::Duration;

use streamify_events::UploadQueues;

/// Ingestion worker configuration.
///
/// All fields have defaults suitable for local development. Override via
/// environment variables.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Broker connection string (`REDIS_URL`).
    pub redis_url: String,
    /// Lists to consume from and dead-letter to (`UPLOAD_SUCCESS_QUEUE`,
    /// `UPLOAD_ERROR_QUEUE`, `DEAD_LETTER_QUEUE`).
    pub queues: UploadQueues,
    /// Upper bound on one blocking pop, so a stop request is noticed
    /// (`WORKER_POLL_TIMEOUT_SECS`, default 1).
    pub poll_timeout: Duration,
    /// Pause after a broker failure (`WORKER_RETRY_BACKOFF_MS`, default 1000).
    pub retry_backoff: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".into(),
            queues: UploadQueues::default(),
            poll_timeout: Duration::from_secs(1),
            retry_backoff: Duration::from_millis(1000),
        }
    }
}

impl WorkerConfig {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let redis_url = std::env::var("REDIS_URL").unwrap_or(defaults.redis_url);

        let queues = UploadQueues {
            succeeded: std::env::var("UPLOAD_SUCCESS_QUEUE").unwrap_or(defaults.queues.succeeded),
            failed: std::env::var("UPLOAD_ERROR_QUEUE").unwrap_or(defaults.queues.failed),
            dead_letter: std::env::var("DEAD_LETTER_QUEUE").unwrap_or(defaults.queues.dead_letter),
        };

        let poll_timeout = std::env::var("WORKER_POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_timeout);

        let retry_backoff = std::env::var("WORKER_RETRY_BACKOFF_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.retry_backoff);

        Self {
            redis_url,
            queues,
            poll_timeout,
            retry_backoff,
        }
    }
}
