//! Handlers for the `/subscription-plans` resource.
//!
//! Plans are read by name and written by id, so `/{plan}` carries either.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamify_core::types::DbId;
use streamify_db::models::subscription_plan::{SubscriptionPlan, UpdateSubscriptionPlan};
use streamify_services::services::subscription_plan::NewSubscriptionPlan;
use streamify_services::services::SubscriptionPlanService;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/subscription-plans
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SubscriptionPlan>>>> {
    let mut uow = state.scope().await?;
    let result = SubscriptionPlanService::list(&mut uow).await;
    let plans = uow.finish(result).await?;
    Ok(Json(DataResponse::new(plans)))
}

/// GET /api/v1/subscription-plans/{plan_name}
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(plan_name): Path<String>,
) -> AppResult<Json<DataResponse<SubscriptionPlan>>> {
    let mut uow = state.scope().await?;
    let result = SubscriptionPlanService::get_by_name(&plan_name, &mut uow).await;
    let plan = uow.finish(result).await?;
    Ok(Json(DataResponse::new(plan)))
}

/// POST /api/v1/subscription-plans
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<NewSubscriptionPlan>,
) -> AppResult<(StatusCode, Json<DataResponse<SubscriptionPlan>>)> {
    let mut uow = state.scope().await?;
    let result = SubscriptionPlanService::create(&input, &mut uow).await;
    let plan = uow.finish(result).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(plan))))
}

/// PUT /api/v1/subscription-plans/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSubscriptionPlan>,
) -> AppResult<Json<DataResponse<SubscriptionPlan>>> {
    let mut uow = state.scope().await?;
    let result = SubscriptionPlanService::update(id, &input, &mut uow).await;
    let plan = uow.finish(result).await?;
    Ok(Json(DataResponse::new(plan)))
}

/// DELETE /api/v1/subscription-plans/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut uow = state.scope().await?;
    let result = SubscriptionPlanService::delete(id, &mut uow).await;
    uow.finish(result).await?;
    Ok(StatusCode::NO_CONTENT)
}
