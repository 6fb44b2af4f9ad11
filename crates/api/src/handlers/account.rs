//! Handlers for the `/accounts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamify_core::registration::RegisterAccount;
use streamify_core::types::DbId;
use streamify_db::models::account::{Account, UpdateAccount};
use streamify_services::services::AccountService;
use streamify_services::AccountAggregate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/accounts
///
/// Public: creates the account, its credential, first device and default
/// profile in one transaction.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterAccount>,
) -> AppResult<(StatusCode, Json<DataResponse<AccountAggregate>>)> {
    let aggregate = state.accounts.register_account(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(aggregate))))
}

/// GET /api/v1/accounts
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Account>>>> {
    let mut uow = state.scope().await?;
    let result = AccountService::list(&mut uow).await;
    let accounts = uow.finish(result).await?;
    Ok(Json(DataResponse::new(accounts)))
}

/// GET /api/v1/accounts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AccountAggregate>>> {
    user.ensure_owner(id)?;
    let mut uow = state.scope().await?;
    let result = AccountService::get(id, &mut uow).await;
    let aggregate = uow.finish(result).await?;
    Ok(Json(DataResponse::new(aggregate)))
}

/// PUT /api/v1/accounts/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccount>,
) -> AppResult<Json<DataResponse<Account>>> {
    user.ensure_owner(id)?;
    let mut uow = state.scope().await?;
    let result = AccountService::update(id, &input, &mut uow).await;
    let account = uow.finish(result).await?;
    Ok(Json(DataResponse::new(account)))
}

/// DELETE /api/v1/accounts/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.ensure_owner(id)?;
    let mut uow = state.scope().await?;
    let result = AccountService::delete(id, &mut uow).await;
    let account = uow.finish(result).await?;
    tracing::info!(account_id = %account.id, "Account deleted");
    Ok(StatusCode::NO_CONTENT)
}
