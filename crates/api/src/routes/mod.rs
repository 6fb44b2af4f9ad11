pub mod account;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod media;
pub mod subscription_plan;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/login                                      login (public)
///
/// /accounts                                        register (public), list
/// /accounts/{id}                                   get, update, delete (own account)
/// /accounts/{id}/devices[/{device_id}]             owned devices
/// /accounts/{id}/profiles[/{profile_id}]           owned profiles
/// /accounts/{id}/watches[/{watch_id}]              owned watch history
///
/// /media                                           list, register content
/// /media/{id}                                      get, update, delete
///
/// /genres                                          list, create
/// /franchises                                      list, create
///
/// /subscription-plans                              list, create
/// /subscription-plans/{plan_name}                  get by name
/// /subscription-plans/{id}                         update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/accounts", account::router())
        .nest("/media", media::router())
        .nest("/genres", catalog::genre_router())
        .nest("/franchises", catalog::franchise_router())
        .nest("/subscription-plans", subscription_plan::router())
}
