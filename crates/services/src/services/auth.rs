//! Credential lookup and password login.

use streamify_core::error::{CoreError, CoreResult};
use streamify_db::models::auth::{Auth, AuthFilter};
use streamify_db::repositories::AuthRepo;
use streamify_db::UnitOfWork;

use crate::password::verify_password;

pub struct AuthService;

impl AuthService {
    /// Check a login attempt. `identifier` is treated as an email when it
    /// contains `@`, otherwise as a username.
    ///
    /// Unknown identifiers and wrong passwords both fail with the same
    /// `Unauthorized` message.
    pub async fn authenticate(
        identifier: &str,
        password: &str,
        uow: &mut UnitOfWork,
    ) -> CoreResult<Auth> {
        let filter = if identifier.contains('@') {
            AuthFilter::ByEmail(identifier.to_string())
        } else {
            AuthFilter::ByUsername(identifier.to_string())
        };

        let Some(auth) = AuthRepo::find_one(&filter, uow).await? else {
            return Err(invalid_credentials());
        };
        if !verify_password(password, &auth.password_hash)? {
            tracing::debug!(account_id = %auth.account_id, "Password mismatch");
            return Err(invalid_credentials());
        }
        if !auth.is_active() {
            return Err(CoreError::Forbidden("Account is inactive".into()));
        }
        Ok(auth)
    }
}

fn invalid_credentials() -> CoreError {
    CoreError::Unauthorized("Invalid credentials".into())
}
