//! Thin per-entity services.
//!
//! Each call runs in the caller's unit of work. Single-step writes commit
//! through the repository (`auto_commit = true`); owner-scoped entities are
//! always addressed by the `(account, id)` pair so one account can never
//! reach another account's rows.

pub mod account;
pub mod auth;
pub mod catalog;
pub mod content;
pub mod device;
pub mod profile;
pub mod subscription_plan;
pub mod watch_history;

pub use account::AccountService;
pub use auth::AuthService;
pub use catalog::{FranchiseService, GenreService};
pub use content::ContentService;
pub use device::DeviceService;
pub use profile::ProfileService;
pub use subscription_plan::SubscriptionPlanService;
pub use watch_history::WatchHistoryService;
