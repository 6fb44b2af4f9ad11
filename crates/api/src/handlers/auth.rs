//! Handler for `POST /auth/login`.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use streamify_db::models::auth::Auth;
use streamify_services::services::AuthService;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /auth/login`.
///
/// `username` also accepts an email address.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "email")]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub data: Auth,
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let mut uow = state.scope().await?;
    let result = AuthService::authenticate(&input.username, &input.password, &mut uow).await;
    let auth = uow.finish(result).await?;

    let access_token = generate_access_token(auth.account_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    tracing::info!(account_id = %auth.account_id, "Login succeeded");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.expires_in(),
        data: auth,
    }))
}
