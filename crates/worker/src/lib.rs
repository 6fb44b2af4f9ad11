//! Content ingestion worker.
//!
//! Consumes upload-completion events from the broker, registers the
//! described content through [`ContentOrchestrator`], and pushes the raw
//! payload of any event it fails to process onto the dead-letter list.
//!
//! Delivery is at-least-once up to the pop: an event is removed from its list
//! before it is processed and nothing acknowledges it afterwards, so a crash
//! between the pop and the dead-letter push loses that event.
//!
//! [`ContentOrchestrator`]: streamify_services::ContentOrchestrator

pub mod config;
pub mod ingestion;

pub use config::WorkerConfig;
pub use ingestion::{Disposition, IngestionWorker, WorkerState};
