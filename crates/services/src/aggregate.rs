//! Committed aggregates returned by the orchestrators.

use serde::Serialize;
use streamify_core::error::CoreResult;
use streamify_core::types::DbId;
use streamify_db::models::account::{Account, AccountFilter};
use streamify_db::models::auth::{Auth, AuthFilter};
use streamify_db::models::content::{Content, ContentFilter};
use streamify_db::models::content_link::{ContentFranchiseFilter, ContentGenreFilter};
use streamify_db::models::device::{Device, DeviceFilter};
use streamify_db::models::franchise::{Franchise, FranchiseFilter};
use streamify_db::models::genre::{Genre, GenreFilter};
use streamify_db::models::profile::{Profile, ProfileFilter};
use streamify_db::repositories::{
    AccountRepo, AuthRepo, ContentFranchiseRepo, ContentGenreRepo, ContentRepo, DeviceRepo,
    FranchiseRepo, GenreRepo, ProfileRepo,
};
use streamify_db::UnitOfWork;

use crate::media::{MediaLinks, MediaUrls};

/// An account with its credential, devices and profiles.
///
/// `auth` serializes without the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct AccountAggregate {
    #[serde(flatten)]
    pub account: Account,
    pub auth: Auth,
    pub devices: Vec<Device>,
    pub profiles: Vec<Profile>,
}

impl AccountAggregate {
    pub async fn load(account_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Self> {
        let account = AccountRepo::get_one(&AccountFilter::ById(account_id), uow).await?;
        let auth = AuthRepo::get_one(&AuthFilter::ByAccount(account_id), uow).await?;
        let devices = DeviceRepo::get_many(&DeviceFilter::ByAccount(account_id), uow).await?;
        let profiles = ProfileRepo::get_many(&ProfileFilter::ByAccount(account_id), uow).await?;
        Ok(AccountAggregate {
            account,
            auth,
            devices,
            profiles,
        })
    }
}

/// A content row with the genres and franchises it is linked to.
///
/// Media URLs are serialized next to the content fields once attached with
/// [`with_links`](Self::with_links).
#[derive(Debug, Clone, Serialize)]
pub struct ContentAggregate {
    #[serde(flatten)]
    pub content: Content,
    pub genres: Vec<Genre>,
    pub franchises: Vec<Franchise>,
    #[serde(flatten)]
    pub links: Option<MediaLinks>,
}

impl ContentAggregate {
    pub async fn load(content_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Self> {
        let content = ContentRepo::get_one(&ContentFilter::ById(content_id), uow).await?;

        let genre_ids = ContentGenreRepo::get_many(&ContentGenreFilter::ByContent(content_id), uow)
            .await?
            .into_iter()
            .map(|link| link.genre_id)
            .collect::<Vec<_>>();
        let genres = if genre_ids.is_empty() {
            Vec::new()
        } else {
            GenreRepo::get_many(&GenreFilter::AnyId(genre_ids), uow).await?
        };

        let franchise_ids =
            ContentFranchiseRepo::get_many(&ContentFranchiseFilter::ByContent(content_id), uow)
                .await?
                .into_iter()
                .map(|link| link.franchise_id)
                .collect::<Vec<_>>();
        let franchises = if franchise_ids.is_empty() {
            Vec::new()
        } else {
            FranchiseRepo::get_many(&FranchiseFilter::AnyId(franchise_ids), uow).await?
        };

        Ok(ContentAggregate {
            content,
            genres,
            franchises,
            links: None,
        })
    }

    pub fn with_links(mut self, urls: &MediaUrls) -> Self {
        self.links = Some(urls.links(&self.content));
        self
    }
}
