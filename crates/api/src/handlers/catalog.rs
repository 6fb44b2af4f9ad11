//! Handlers for `/genres` and `/franchises`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use streamify_db::models::franchise::Franchise;
use streamify_db::models::genre::Genre;
use streamify_services::services::catalog::{NewFranchise, NewGenre};
use streamify_services::services::{FranchiseService, GenreService};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/genres
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Genre>>>> {
    let mut uow = state.scope().await?;
    let result = GenreService::list(&mut uow).await;
    let genres = uow.finish(result).await?;
    Ok(Json(DataResponse::new(genres)))
}

/// POST /api/v1/genres
pub async fn create_genre(
    State(state): State<AppState>,
    Json(input): Json<NewGenre>,
) -> AppResult<(StatusCode, Json<DataResponse<Genre>>)> {
    let mut uow = state.scope().await?;
    let result = GenreService::create(&input, &mut uow).await;
    let genre = uow.finish(result).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(genre))))
}

/// GET /api/v1/franchises
pub async fn list_franchises(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Franchise>>>> {
    let mut uow = state.scope().await?;
    let result = FranchiseService::list(&mut uow).await;
    let franchises = uow.finish(result).await?;
    Ok(Json(DataResponse::new(franchises)))
}

/// POST /api/v1/franchises
pub async fn create_franchise(
    State(state): State<AppState>,
    Json(input): Json<NewFranchise>,
) -> AppResult<(StatusCode, Json<DataResponse<Franchise>>)> {
    let mut uow = state.scope().await?;
    let result = FranchiseService::create(&input, &mut uow).await;
    let franchise = uow.finish(result).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(franchise))))
}
