//! Domain building blocks shared by every Streamify crate.
//!
//! - [`error`] -- the error taxonomy every layer reports through.
//! - [`types`] -- identifier and timestamp aliases.
//! - [`queues`] -- broker queue keys for upload ingestion.
//! - [`registration`] -- validated bundles for multi-entity registration.

pub mod error;
pub mod queues;
pub mod registration;
pub mod types;
