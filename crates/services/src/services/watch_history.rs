use serde::Deserialize;
use streamify_core::error::CoreResult;
use streamify_core::types::{new_id, DbId};
use streamify_db::models::watch_history::{
    CreateWatchHistory, UpdateWatchHistory, WatchHistory, WatchHistoryFilter,
};
use streamify_db::repositories::WatchHistoryRepo;
use streamify_db::UnitOfWork;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewWatchHistory {
    pub content_id: DbId,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub last_position: Option<f64>,
}

pub struct WatchHistoryService;

impl WatchHistoryService {
    pub async fn list(account_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Vec<WatchHistory>> {
        WatchHistoryRepo::get_many(&WatchHistoryFilter::ByAccount(account_id), uow).await
    }

    pub async fn get(
        account_id: DbId,
        watch_id: DbId,
        uow: &mut UnitOfWork,
    ) -> CoreResult<WatchHistory> {
        let filter = WatchHistoryFilter::ByAccountAndId(account_id, watch_id);
        WatchHistoryRepo::get_one(&filter, uow).await
    }

    /// A second entry for the same content fails with `Integrity`; callers
    /// update the existing entry instead.
    pub async fn create(
        account_id: DbId,
        input: &NewWatchHistory,
        uow: &mut UnitOfWork,
    ) -> CoreResult<WatchHistory> {
        input.validate()?;
        let new = CreateWatchHistory {
            id: new_id(),
            account_id,
            content_id: input.content_id,
            last_position: input.last_position,
        };
        WatchHistoryRepo::create(new, uow, true).await?.into_committed()
    }

    pub async fn update(
        account_id: DbId,
        watch_id: DbId,
        patch: &UpdateWatchHistory,
        uow: &mut UnitOfWork,
    ) -> CoreResult<WatchHistory> {
        let filter = WatchHistoryFilter::ByAccountAndId(account_id, watch_id);
        WatchHistoryRepo::update_one(&filter, patch, uow, true).await
    }

    pub async fn delete(
        account_id: DbId,
        watch_id: DbId,
        uow: &mut UnitOfWork,
    ) -> CoreResult<WatchHistory> {
        let filter = WatchHistoryFilter::ByAccountAndId(account_id, watch_id);
        WatchHistoryRepo::delete_one(&filter, uow, true).await
    }
}
