use std::sync::Arc;

use streamify_core::error::CoreResult;
use streamify_db::UnitOfWork;
use streamify_services::{AccountOrchestrator, ContentOrchestrator};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in the binary (or the test harness) and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub pool: streamify_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub accounts: AccountOrchestrator,
    pub contents: ContentOrchestrator,
}

impl AppState {
    pub fn new(pool: streamify_db::DbPool, config: ServerConfig) -> Self {
        Self {
            accounts: AccountOrchestrator::new(pool.clone()),
            contents: ContentOrchestrator::new(pool.clone()),
            pool,
            config: Arc::new(config),
        }
    }

    /// Open the unit of work that scopes one request.
    pub async fn scope(&self) -> CoreResult<UnitOfWork> {
        UnitOfWork::begin(&self.pool).await
    }
}
