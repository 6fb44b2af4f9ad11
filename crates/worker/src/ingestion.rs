//! The consume loop and per-event handling.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use streamify_core::error::{CoreError, CoreResult};
use streamify_core::registration::RegisterContent;
use streamify_core::types::DbId;
use streamify_events::{EventQueue, IngestionEvent, UploadOutcome, UploadQueues};
use streamify_services::ContentOrchestrator;
use tokio_util::sync::CancellationToken;

use crate::config::WorkerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    /// Stop requested; the in-flight pop or event is being finished.
    Stopping,
    Stopped,
}

impl WorkerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WorkerState::Running,
            1 => WorkerState::Stopping,
            _ => WorkerState::Stopped,
        }
    }
}

/// What happened to one popped event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Content registered under this id.
    Registered(DbId),
    /// Upload-failed notice; nothing to persist.
    Discarded,
    /// Processing failed and the raw payload was pushed to the dead-letter list.
    DeadLettered,
    /// Processing failed and the dead-letter push failed too.
    Lost,
}

pub struct IngestionWorker {
    queue: Arc<dyn EventQueue>,
    orchestrator: ContentOrchestrator,
    queues: UploadQueues,
    poll_timeout: Duration,
    retry_backoff: Duration,
    state: AtomicU8,
}

impl IngestionWorker {
    pub fn new(
        queue: Arc<dyn EventQueue>,
        orchestrator: ContentOrchestrator,
        config: &WorkerConfig,
    ) -> Self {
        Self {
            queue,
            orchestrator,
            queues: config.queues.clone(),
            poll_timeout: config.poll_timeout,
            retry_backoff: config.retry_backoff,
            state: AtomicU8::new(WorkerState::Stopped as u8),
        }
    }

    pub fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Consume events one at a time until `cancel` fires.
    ///
    /// The token is only checked between iterations: a pending pop runs to
    /// its timeout and an event already popped is fully handled before the
    /// loop exits.
    pub async fn run(&self, cancel: CancellationToken) {
        self.state.store(WorkerState::Running as u8, Ordering::Release);
        tracing::info!(
            queues = ?self.queues.inbound(),
            dead_letter = %self.queues.dead_letter,
            "Ingestion worker started"
        );

        let mark_stopping = async {
            cancel.cancelled().await;
            let _ = self.state.compare_exchange(
                WorkerState::Running as u8,
                WorkerState::Stopping as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            );
            tracing::info!("Ingestion worker stopping");
        };
        tokio::join!(self.consume(&cancel), mark_stopping);

        self.state.store(WorkerState::Stopped as u8, Ordering::Release);
        tracing::info!("Ingestion worker stopped");
    }

    async fn consume(&self, cancel: &CancellationToken) {
        let keys = self.queues.inbound();
        while !cancel.is_cancelled() {
            match self.queue.pop(&keys, self.poll_timeout).await {
                Ok(Some(event)) => {
                    self.handle(&event).await;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(error = %e, "Broker pop failed");
                    tokio::select! {
                        _ = cancel.cancelled() => {}
                        _ = tokio::time::sleep(self.retry_backoff) => {}
                    }
                }
            }
        }
    }

    /// Process one event. Never fails: every processing error ends in a
    /// dead-letter push.
    pub async fn handle(&self, event: &IngestionEvent) -> Disposition {
        match self.queues.outcome(&event.key) {
            UploadOutcome::Failed => {
                tracing::warn!(queue = %event.key, payload = %event.payload, "Upload failed upstream, discarding");
                Disposition::Discarded
            }
            UploadOutcome::Succeeded => match self.ingest(&event.payload).await {
                Ok(content_id) => {
                    tracing::info!(queue = %event.key, content_id = %content_id, "Content ingested");
                    Disposition::Registered(content_id)
                }
                Err(e) => self.dead_letter(event, &e).await,
            },
            UploadOutcome::Unknown => {
                let e = CoreError::Validation(format!("unexpected queue {}", event.key));
                self.dead_letter(event, &e).await
            }
        }
    }

    /// `Ok` once the aggregate is committed. Nothing is read back, so a
    /// committed payload is never dead-lettered.
    async fn ingest(&self, payload: &str) -> CoreResult<DbId> {
        let request: RegisterContent = serde_json::from_str(payload)
            .map_err(|e| CoreError::Validation(format!("malformed upload payload: {e}")))?;
        self.orchestrator.commit_content(request).await
    }

    async fn dead_letter(&self, event: &IngestionEvent, error: &CoreError) -> Disposition {
        tracing::error!(
            queue = %event.key,
            kind = error.kind(),
            error = %error,
            payload = %event.payload,
            "Ingestion failed, dead-lettering payload"
        );
        match self.queue.push(&self.queues.dead_letter, &event.payload).await {
            Ok(()) => Disposition::DeadLettered,
            Err(e) => {
                tracing::error!(
                    queue = %event.key,
                    dead_letter = %self.queues.dead_letter,
                    error = %e,
                    payload = %event.payload,
                    "Dead-letter push failed, event lost"
                );
                Disposition::Lost
            }
        }
    }
}
