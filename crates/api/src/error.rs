use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use streamify_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "error", "code", "kind" }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str, String) {
        match self {
            AppError::Core(core) => {
                let kind = core.kind();
                match core {
                    CoreError::NotFound { entity, key } => (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        kind,
                        format!("{entity} matching {key} not found"),
                    ),
                    CoreError::Validation(msg) => {
                        (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", kind, msg.clone())
                    }
                    CoreError::Integrity(msg) => {
                        (StatusCode::CONFLICT, "INTEGRITY_ERROR", kind, msg.clone())
                    }
                    CoreError::Unauthorized(msg) => {
                        (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", kind, msg.clone())
                    }
                    CoreError::Forbidden(msg) => {
                        (StatusCode::FORBIDDEN, "FORBIDDEN", kind, msg.clone())
                    }
                    CoreError::Connection(msg) => {
                        tracing::error!(error = %msg, "Backing store unavailable");
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "CONNECTION_ERROR",
                            kind,
                            "The service is temporarily unavailable".to_string(),
                        )
                    }
                    CoreError::Unknown(msg) => {
                        tracing::error!(error = %msg, "Unhandled core error");
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "INTERNAL_ERROR",
                            kind,
                            INTERNAL_MESSAGE.to_string(),
                        )
                    }
                }
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                "ValidationError",
                msg.clone(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "UnknownError",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, kind, message) = self.parts();
        let body = json!({
            "error": message,
            "code": code,
            "kind": kind,
        });
        (status, axum::Json(body)).into_response()
    }
}
