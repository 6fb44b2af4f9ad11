//! Row models. Each entity comes with its insertable `Create*` form, an
//! `Update*` patch listing the columns callers may change, and a filter enum.

pub mod account;
pub mod auth;
pub mod content;
pub mod content_link;
pub mod device;
pub mod franchise;
pub mod genre;
pub mod profile;
pub mod subscription_plan;
pub mod watch_history;
