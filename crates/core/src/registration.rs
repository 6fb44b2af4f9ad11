//! Registration requests: the validated bundles an orchestrator turns into
//! a multi-row aggregate.
//!
//! The HTTP layer and the ingestion worker both deserialize into these types
//! and call [`validate`](Validate::validate) before handing them over, so an
//! orchestrator only ever sees structurally sound input.

use std::collections::HashSet;
use std::net::IpAddr;

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::CoreResult;
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Account registration
// ---------------------------------------------------------------------------

/// Core account attributes.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AccountInfo {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    pub birth_date: Date,
    #[serde(default)]
    pub subscription_plan_id: Option<DbId>,
}

/// Credential attributes. The password is plaintext here and is hashed before
/// it is staged.
#[derive(Clone, Deserialize, Validate)]
pub struct AuthInfo {
    #[serde(default)]
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

impl std::fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthInfo")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The device the account registers from.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DeviceInfo {
    #[validate(length(min = 1, max = 100))]
    pub device_brand: String,
    #[validate(length(min = 1, max = 100))]
    pub device_model: String,
    #[validate(custom(function = "ip_address"))]
    pub ip_address: String,
}

/// Everything needed to create an account with its credential, first device
/// and default profile.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterAccount {
    #[validate(nested)]
    pub account_info: AccountInfo,
    #[validate(nested)]
    pub auth_info: AuthInfo,
    #[validate(nested)]
    pub device_info: DeviceInfo,
}

impl RegisterAccount {
    pub fn check(&self) -> CoreResult<()> {
        Ok(self.validate()?)
    }
}

// ---------------------------------------------------------------------------
// Content registration
// ---------------------------------------------------------------------------

/// A catalog entry plus the genres and franchises it links to.
///
/// This is also the shape of an upload-completion event payload, which uses
/// camelCase keys (`releaseDate`, `thumbnailFile`, ...).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterContent {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    pub description: String,
    #[serde(alias = "release_date")]
    pub release_date: Date,
    #[validate(length(min = 1, max = 32))]
    pub duration: String,
    #[serde(alias = "thumbnail_file")]
    #[validate(length(min = 1))]
    pub thumbnail_file: String,
    #[serde(alias = "content_file")]
    #[validate(length(min = 1))]
    pub content_file: String,
    #[serde(alias = "trailer_file")]
    #[validate(length(min = 1))]
    pub trailer_file: String,
    #[serde(default)]
    #[validate(custom(function = "distinct_ids"))]
    pub genres: Vec<DbId>,
    #[serde(default)]
    #[validate(custom(function = "distinct_ids"))]
    pub franchises: Vec<DbId>,
}

impl RegisterContent {
    pub fn check(&self) -> CoreResult<()> {
        Ok(self.validate()?)
    }
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

fn ip_address(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("ip_address"))
}

fn distinct_ids(ids: &[DbId]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(ids.len());
    if ids.iter().all(|id| seen.insert(*id)) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_id"))
    }
}
