//! Route definitions for the `/accounts` resource and its owned entities.

use axum::routing::get;
use axum::Router;

use crate::handlers::{account, device, profile, watch_history};
use crate::state::AppState;

/// Routes mounted at `/accounts`.
///
/// ```text
/// POST   /                                   -> register (public)
/// GET    /                                   -> list
/// GET    /{id}                               -> get_by_id
/// PUT    /{id}                               -> update
/// DELETE /{id}                               -> delete
///
/// GET    /{id}/devices                       -> list
/// POST   /{id}/devices                       -> create
/// GET    /{id}/devices/{device_id}           -> get_by_id
/// PUT    /{id}/devices/{device_id}           -> update
/// DELETE /{id}/devices/{device_id}           -> delete
///
/// (same shape for /profiles/{profile_id} and /watches/{watch_id})
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(account::list).post(account::register))
        .route(
            "/{id}",
            get(account::get_by_id)
                .put(account::update)
                .delete(account::delete),
        )
        .route("/{id}/devices", get(device::list).post(device::create))
        .route(
            "/{id}/devices/{device_id}",
            get(device::get_by_id)
                .put(device::update)
                .delete(device::delete),
        )
        .route("/{id}/profiles", get(profile::list).post(profile::create))
        .route(
            "/{id}/profiles/{profile_id}",
            get(profile::get_by_id)
                .put(profile::update)
                .delete(profile::delete),
        )
        .route(
            "/{id}/watches",
            get(watch_history::list).post(watch_history::create),
        )
        .route(
            "/{id}/watches/{watch_id}",
            get(watch_history::get_by_id)
                .put(watch_history::update)
                .delete(watch_history::delete),
        )
}
