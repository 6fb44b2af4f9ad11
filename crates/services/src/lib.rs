//! Business layer: thin per-entity services over the generic repository,
//! and the registration orchestrators that build multi-row aggregates in a
//! single unit of work.

pub mod aggregate;
pub mod media;
pub mod orchestrator;
pub mod password;
pub mod services;

pub use aggregate::{AccountAggregate, ContentAggregate};
pub use media::{MediaLinks, MediaUrls};
pub use orchestrator::{AccountOrchestrator, ContentOrchestrator};
