//! Classification of driver errors into the [`CoreError`] taxonomy.

use streamify_core::error::CoreError;

/// SQLSTATE class for integrity constraint violations.
const INTEGRITY_CLASS: &str = "23";
/// SQLSTATE class for connection exceptions.
const CONNECTION_CLASS: &str = "08";

/// Map a driver error onto the shared error taxonomy.
///
/// Constraint violations (unique, foreign key, not null, check) become
/// `Integrity`; transport and pool failures become `Connection`; everything
/// else is `Unknown`.
pub fn classify(err: sqlx::Error) -> CoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            let detail = match db_err.constraint() {
                Some(constraint) => format!("{} ({constraint})", db_err.message()),
                None => db_err.message().to_string(),
            };
            if code.starts_with(INTEGRITY_CLASS) {
                CoreError::Integrity(detail)
            } else if code.starts_with(CONNECTION_CLASS) {
                CoreError::Connection(detail)
            } else {
                CoreError::Unknown(format!("{detail} [{code}]"))
            }
        }
        sqlx::Error::RowNotFound => CoreError::not_found("Row", "query"),
        sqlx::Error::Io(e) => CoreError::Connection(e.to_string()),
        sqlx::Error::Tls(e) => CoreError::Connection(e.to_string()),
        sqlx::Error::Protocol(msg) => CoreError::Connection(msg),
        sqlx::Error::PoolTimedOut => CoreError::Connection("pool timed out".into()),
        sqlx::Error::PoolClosed => CoreError::Connection("pool closed".into()),
        sqlx::Error::WorkerCrashed => CoreError::Connection("connection worker crashed".into()),
        other => CoreError::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pool_failures_are_connection_errors() {
        assert_matches!(classify(sqlx::Error::PoolTimedOut), CoreError::Connection(_));
        assert_matches!(classify(sqlx::Error::PoolClosed), CoreError::Connection(_));
    }

    #[test]
    fn io_failure_is_connection_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert_matches!(classify(sqlx::Error::Io(io)), CoreError::Connection(_));
    }

    #[test]
    fn missing_row_is_not_found() {
        assert_matches!(classify(sqlx::Error::RowNotFound), CoreError::NotFound { .. });
    }

    #[test]
    fn decode_failure_is_unknown() {
        let err = sqlx::Error::ColumnNotFound("nickname".into());
        assert_matches!(classify(err), CoreError::Unknown(_));
    }
}
