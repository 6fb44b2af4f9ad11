//! Registration orchestrators.
//!
//! Each registration opens one unit of work, stages the root row, flushes so
//! the root exists inside the transaction, stages every dependent row
//! against the root's id and commits once. Any failure rolls the whole scope
//! back, so either the full aggregate is committed or nothing is. The
//! committed aggregate is then re-read so callers see database defaults.

use streamify_core::error::CoreResult;
use streamify_core::registration::{RegisterAccount, RegisterContent};
use streamify_core::types::{new_id, DbId};
use streamify_db::models::account::CreateAccount;
use streamify_db::models::auth::CreateAuth;
use streamify_db::models::content::CreateContent;
use streamify_db::models::content_link::{ContentFranchise, ContentGenre};
use streamify_db::models::device::CreateDevice;
use streamify_db::models::profile::CreateProfile;
use streamify_db::repositories::{
    AccountRepo, AuthRepo, ContentFranchiseRepo, ContentGenreRepo, ContentRepo, DeviceRepo,
    ProfileRepo,
};
use streamify_db::{DbPool, UnitOfWork};

use crate::aggregate::{AccountAggregate, ContentAggregate};
use crate::password::hash_password;
use crate::services::profile::default_avatar;

/// Builds an account together with its credential, first device and default
/// profile.
#[derive(Clone)]
pub struct AccountOrchestrator {
    pool: DbPool,
}

impl AccountOrchestrator {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn register_account(&self, request: RegisterAccount) -> CoreResult<AccountAggregate> {
        request.check()?;
        let password_hash = hash_password(&request.auth_info.password)?;

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let staged = stage_account(&request, password_hash, &mut uow).await;
        let account_id = uow.finish(staged).await.inspect_err(|e| {
            tracing::warn!(email = %request.auth_info.email, error = %e, "Account registration rolled back");
        })?;

        tracing::info!(account_id = %account_id, "Account registered");
        AccountAggregate::load(account_id, &mut uow).await
    }
}

async fn stage_account(
    request: &RegisterAccount,
    password_hash: String,
    uow: &mut UnitOfWork,
) -> CoreResult<DbId> {
    let info = &request.account_info;
    let account = CreateAccount {
        id: new_id(),
        first_name: info.first_name.clone(),
        last_name: info.last_name.clone(),
        birth_date: info.birth_date,
        subscription_plan_id: info.subscription_plan_id,
    };
    let account_id = account.id;
    AccountRepo::create(account, uow, false).await?;
    uow.flush().await?;

    let auth = &request.auth_info;
    AuthRepo::create(
        CreateAuth {
            id: new_id(),
            account_id,
            username: auth.username.clone(),
            email: auth.email.clone(),
            password_hash,
        },
        uow,
        false,
    )
    .await?;

    let device = &request.device_info;
    DeviceRepo::create(
        CreateDevice {
            id: new_id(),
            account_id,
            device_brand: device.device_brand.clone(),
            device_model: device.device_model.clone(),
            ip_address: device.ip_address.clone(),
        },
        uow,
        false,
    )
    .await?;

    let nickname = auth
        .username
        .clone()
        .unwrap_or_else(|| info.first_name.clone());
    ProfileRepo::create(
        CreateProfile {
            id: new_id(),
            account_id,
            nickname,
            avatar_url: Some(default_avatar()),
            maturity_rating: 0,
            language_code: 0,
            is_admin: true,
        },
        uow,
        false,
    )
    .await?;

    Ok(account_id)
}

/// Builds a content row together with its genre and franchise links.
#[derive(Clone)]
pub struct ContentOrchestrator {
    pool: DbPool,
}

impl ContentOrchestrator {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Register and return the committed aggregate.
    ///
    /// Empty genre or franchise lists are valid and produce no link rows. An
    /// error from the re-read after the commit does not undo the commit; use
    /// [`commit_content`](Self::commit_content) when the caller must tell
    /// the two apart.
    pub async fn register_content(&self, request: RegisterContent) -> CoreResult<ContentAggregate> {
        let (content_id, mut uow) = self.commit(&request).await?;
        ContentAggregate::load(content_id, &mut uow).await
    }

    /// Register without re-reading. `Ok` means the aggregate is committed.
    pub async fn commit_content(&self, request: RegisterContent) -> CoreResult<DbId> {
        let (content_id, _uow) = self.commit(&request).await?;
        Ok(content_id)
    }

    async fn commit(&self, request: &RegisterContent) -> CoreResult<(DbId, UnitOfWork)> {
        request.check()?;

        let mut uow = UnitOfWork::begin(&self.pool).await?;
        let staged = stage_content(request, &mut uow).await;
        let content_id = uow.finish(staged).await.inspect_err(|e| {
            tracing::warn!(title = %request.title, error = %e, "Content registration rolled back");
        })?;

        tracing::info!(
            content_id = %content_id,
            genres = request.genres.len(),
            franchises = request.franchises.len(),
            "Content registered"
        );
        Ok((content_id, uow))
    }
}

async fn stage_content(request: &RegisterContent, uow: &mut UnitOfWork) -> CoreResult<DbId> {
    let content = CreateContent {
        id: new_id(),
        title: request.title.clone(),
        description: request.description.clone(),
        release_date: request.release_date,
        duration: request.duration.clone(),
        thumbnail_file: request.thumbnail_file.clone(),
        content_file: request.content_file.clone(),
        trailer_file: Some(request.trailer_file.clone()),
        episode_number: None,
    };
    let content_id = content.id;
    ContentRepo::create(content, uow, false).await?;
    uow.flush().await?;

    for &genre_id in &request.genres {
        ContentGenreRepo::create(ContentGenre { content_id, genre_id }, uow, false).await?;
    }
    for &franchise_id in &request.franchises {
        ContentFranchiseRepo::create(
            ContentFranchise {
                content_id,
                franchise_id,
            },
            uow,
            false,
        )
        .await?;
    }

    Ok(content_id)
}
