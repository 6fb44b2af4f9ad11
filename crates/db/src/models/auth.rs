//! Auth: the login credential belonging to an account.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{DbId, Timestamp};

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_INACTIVE: &str = "inactive";

/// Full credential row.
///
/// The password hash is never serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Auth {
    pub id: DbId,
    pub account_id: DbId,
    pub username: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub status: String,
    pub created_at: Timestamp,
}

impl Auth {
    pub fn is_active(&self) -> bool {
        self.status == STATUS_ACTIVE
    }
}

#[derive(Debug, Clone)]
pub struct CreateAuth {
    pub id: DbId,
    pub account_id: DbId,
    pub username: Option<String>,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAuth {
    pub username: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    /// Set by the service after hashing, never taken from a request body.
    #[serde(skip)]
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AuthFilter {
    ById(DbId),
    ByAccount(DbId),
    ByEmail(String),
    ByUsername(String),
}

impl Filter for AuthFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            AuthFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            AuthFilter::ByAccount(account_id) => {
                vec![Condition::Eq("account_id", (*account_id).into())]
            }
            AuthFilter::ByEmail(email) => vec![Condition::Eq("email", email.as_str().into())],
            AuthFilter::ByUsername(username) => {
                vec![Condition::Eq("username", username.as_str().into())]
            }
        }
    }
}

impl Insertable for CreateAuth {
    const TABLE: &'static str = "auths";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("account_id", self.account_id.into()),
            ("username", self.username.clone().into()),
            ("email", self.email.clone().into()),
            ("password_hash", self.password_hash.clone().into()),
        ]
    }
}

impl Patch<Auth> for UpdateAuth {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "username", &self.username);
        assign(&mut out, "email", &self.email);
        assign(&mut out, "status", &self.status);
        assign(&mut out, "password_hash", &self.password_hash);
        out
    }

    fn apply(&self, auth: &mut Auth) {
        if let Some(v) = &self.username {
            auth.username = Some(v.clone());
        }
        if let Some(v) = &self.email {
            auth.email = v.clone();
        }
        if let Some(v) = &self.status {
            auth.status = v.clone();
        }
        if let Some(v) = &self.password_hash {
            auth.password_hash = v.clone();
        }
    }
}

impl Entity for Auth {
    const NAME: &'static str = "Auth";
    const TABLE: &'static str = "auths";
    const COLUMNS: &'static str = "id, account_id, username, email, password_hash, status, created_at";

    type New = CreateAuth;
    type Filter = AuthFilter;
    type Patch = UpdateAuth;

    fn key(&self) -> AuthFilter {
        AuthFilter::ById(self.id)
    }

    fn new_key(new: &CreateAuth) -> AuthFilter {
        AuthFilter::ById(new.id)
    }
}
