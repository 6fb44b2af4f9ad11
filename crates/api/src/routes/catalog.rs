use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/genres`.
pub fn genre_router() -> Router<AppState> {
    Router::new().route("/", get(catalog::list_genres).post(catalog::create_genre))
}

/// Routes mounted at `/franchises`.
pub fn franchise_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(catalog::list_franchises).post(catalog::create_franchise),
    )
}
