pub mod account;
pub mod auth;
pub mod catalog;
pub mod device;
pub mod media;
pub mod profile;
pub mod subscription_plan;
pub mod watch_history;
