//! Handlers for `/accounts/{id}/devices`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamify_core::registration::DeviceInfo;
use streamify_core::types::DbId;
use streamify_db::models::device::{Device, UpdateDevice};
use streamify_services::services::DeviceService;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/accounts/{id}/devices
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(account_id): Path<DbId>,
    Json(input): Json<DeviceInfo>,
) -> AppResult<(StatusCode, Json<DataResponse<Device>>)> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = DeviceService::create(account_id, &input, &mut uow).await;
    let device = uow.finish(result).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(device))))
}

/// GET /api/v1/accounts/{id}/devices
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(account_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Device>>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = DeviceService::list(account_id, &mut uow).await;
    let devices = uow.finish(result).await?;
    Ok(Json(DataResponse::new(devices)))
}

/// GET /api/v1/accounts/{id}/devices/{device_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, device_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Device>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = DeviceService::get(account_id, device_id, &mut uow).await;
    let device = uow.finish(result).await?;
    Ok(Json(DataResponse::new(device)))
}

/// PUT /api/v1/accounts/{id}/devices/{device_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, device_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateDevice>,
) -> AppResult<Json<DataResponse<Device>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = DeviceService::update(account_id, device_id, &input, &mut uow).await;
    let device = uow.finish(result).await?;
    Ok(Json(DataResponse::new(device)))
}

/// DELETE /api/v1/accounts/{id}/devices/{device_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, device_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = DeviceService::delete(account_id, device_id, &mut uow).await;
    uow.finish(result).await?;
    Ok(StatusCode::NO_CONTENT)
}
