//! Handlers for `/accounts/{id}/profiles`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamify_core::types::DbId;
use streamify_db::models::profile::{Profile, UpdateProfile};
use streamify_services::services::profile::NewProfile;
use streamify_services::services::ProfileService;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/accounts/{id}/profiles
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(account_id): Path<DbId>,
    Json(input): Json<NewProfile>,
) -> AppResult<(StatusCode, Json<DataResponse<Profile>>)> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = ProfileService::create(account_id, &input, &mut uow).await;
    let profile = uow.finish(result).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(profile))))
}

/// GET /api/v1/accounts/{id}/profiles
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Path(account_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = ProfileService::list(account_id, &mut uow).await;
    let profiles = uow.finish(result).await?;
    Ok(Json(DataResponse::new(profiles)))
}

/// GET /api/v1/accounts/{id}/profiles/{profile_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, profile_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DataResponse<Profile>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = ProfileService::get(account_id, profile_id, &mut uow).await;
    let profile = uow.finish(result).await?;
    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/accounts/{id}/profiles/{profile_id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, profile_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProfile>,
) -> AppResult<Json<DataResponse<Profile>>> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = ProfileService::update(account_id, profile_id, &input, &mut uow).await;
    let profile = uow.finish(result).await?;
    Ok(Json(DataResponse::new(profile)))
}

/// DELETE /api/v1/accounts/{id}/profiles/{profile_id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((account_id, profile_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    user.ensure_owner(account_id)?;
    let mut uow = state.scope().await?;
    let result = ProfileService::delete(account_id, profile_id, &mut uow).await;
    uow.finish(result).await?;
    Ok(StatusCode::NO_CONTENT)
}
