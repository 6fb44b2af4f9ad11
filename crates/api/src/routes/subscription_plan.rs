use axum::routing::get;
use axum::Router;

use crate::handlers::subscription_plan;
use crate::state::AppState;

/// Routes mounted at `/subscription-plans`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (auth)
/// GET    /{plan_name}   -> get_by_name
/// PUT    /{id}          -> update (auth)
/// DELETE /{id}          -> delete (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(subscription_plan::list).post(subscription_plan::create),
        )
        .route(
            "/{plan}",
            get(subscription_plan::get_by_name)
                .put(subscription_plan::update)
                .delete(subscription_plan::delete),
        )
}
