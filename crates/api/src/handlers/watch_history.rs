//! Handlers for `/accounts/{id}/watches`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamify_core::types::DbId;
use streamify_db::models::watch_history::{UpdateWatchHistory, WatchHistory};
use streamify_services::services::watch_history::NewWatchHistory;
use streamify_services::services::WatchHistoryService;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/accounts/{id}/watches
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(account_id): Path<DbId>,
    Json(input): Json<NewWatchHistory>,
) -> AppResult<(StatusCode, Json<DataResponse<WatchHistory>>)> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = WatchHistoryService::create(account_id, &input, &mut uow).await;
    let watch = uow.finish(result).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(watch))))
}

/// GET /api/v1/accounts/{id}/watches
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(account_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WatchHistory>>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = WatchHistoryService::list(account_id, &mut uow).await;
    let watches = uow.finish(result).await?;
    Ok(Json(DataResponse::new(watches)))
}

/// GET /api/v1/accounts/{id}/watches/{watch_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, watch_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<WatchHistory>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = WatchHistoryService::get(account_id, watch_id, &mut uow).await;
    let watch = uow.finish(result).await?;
    Ok(Json(DataResponse::new(watch)))
}

/// PUT /api/v1/accounts/{id}/watches/{watch_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, watch_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateWatchHistory>,
) -> AppResult<Json<DataResponse<WatchHistory>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = WatchHistoryService::update(account_id, watch_id, &input, &mut uow).await;
    let watch = uow.finish(result).await?;
    Ok(Json(DataResponse::new(watch)))
}

/// DELETE /api/v1/accounts/{id}/watches/{watch_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, watch_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = WatchHistoryService::delete(account_id, watch_id, &mut uow).await;
    uow.finish(result).await?;
    Ok(StatusCode::NO_CONTENT)
}
