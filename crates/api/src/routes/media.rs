//! Route definitions for the `/media` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::media;
use crate::state::AppState;

/// Routes mounted at `/media`. All require auth.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create (register content with its links)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(media::list).post(media::create))
        .route(
            "/{id}",
            get(media::get_by_id).put(media::update).delete(media::delete),
        )
}
