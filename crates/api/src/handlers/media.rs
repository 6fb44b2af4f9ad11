//! Handlers for the `/media` resource (the content catalog).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use streamify_core::registration::RegisterContent;
use streamify_core::types::DbId;
use streamify_db::models::content::{Content, UpdateContent};
use streamify_services::services::ContentService;
use streamify_services::ContentAggregate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/media
///
/// Same payload and orchestration as an upload-succeeded event.
pub async fn create(
    State(state): State<AppState>,
    _user: AuthUser,
    Json(input): Json<RegisterContent>,
) -> AppResult<(StatusCode, Json<DataResponse<ContentAggregate>>)> {
    let aggregate = state
        .contents
        .register_content(input)
        .await?
        .with_links(&state.config.media);
    Ok((StatusCode::CREATED, Json(DataResponse::new(aggregate))))
}

/// GET /api/v1/media
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Content>>>> {
    let mut uow = state.scope().await?;
    let result = ContentService::list(&mut uow).await;
    let contents = uow.finish(result).await?;
    Ok(Json(DataResponse::new(contents)))
}

/// GET /api/v1/media/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContentAggregate>>> {
    let mut uow = state.scope().await?;
    let result = ContentService::get(id, &mut uow).await;
    let aggregate = uow.finish(result).await?.with_links(&state.config.media);
    Ok(Json(DataResponse::new(aggregate)))
}

/// PUT /api/v1/media/{id}
pub async fn update(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateContent>,
) -> AppResult<Json<DataResponse<Content>>> {
    let mut uow = state.scope().await?;
    let result = ContentService::update(id, &input, &mut uow).await;
    let content = uow.finish(result).await?;
    Ok(Json(DataResponse::new(content)))
}

/// DELETE /api/v1/media/{id}
pub async fn delete(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut uow = state.scope().await?;
    let result = ContentService::delete(id, &mut uow).await;
    uow.finish(result).await?;
    Ok(StatusCode::NO_CONTENT)
}
