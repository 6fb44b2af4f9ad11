/// Failures every layer reports through.
///
/// Repository and store errors are classified into these variants as soon as
/// they leave the database driver, so orchestrators and the HTTP boundary can
/// reason about them without knowing the driver.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} matching {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Uniqueness, foreign-key or check constraint violation.
    #[error("Integrity violation: {0}")]
    Integrity(String),

    /// The backing store is unreachable or the transport failed mid-scope.
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl CoreError {
    /// Short taxonomy name, stable across releases (used in error bodies and logs).
    pub fn kind(&self) -> &'static str {
        match self {
            CoreError::NotFound { .. } => "NotFound",
            CoreError::Validation(_) => "ValidationError",
            CoreError::Integrity(_) => "IntegrityError",
            CoreError::Connection(_) => "ConnectionError",
            CoreError::Unauthorized(_) => "Unauthorized",
            CoreError::Forbidden(_) => "Forbidden",
            CoreError::Unknown(_) => "UnknownError",
        }
    }

    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        CoreError::Validation(format!("invalid fields: {}", fields.join(", ")))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
