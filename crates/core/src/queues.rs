//! Broker queue keys shared between the upload service and the ingestion worker.
//!
//! These are the defaults; the worker can override each one from the
//! environment.

/// Pushed by the media service once every file of a content upload is stored.
pub const UPLOAD_SUCCEEDED: &str = "spring:content:upload:success";

/// Pushed by the media service when an upload could not be completed.
pub const UPLOAD_FAILED: &str = "spring:content:upload:error";

/// Raw payloads of events that failed processing, kept verbatim for replay.
pub const DEAD_LETTER: &str = "flask:metadata:save:rollback";
