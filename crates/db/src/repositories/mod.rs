//! Generic entity repository.
//!
//! One implementation parameterized over the entity type; the per-table
//! repositories are type aliases. Every operation runs inside a caller-owned
//! [`UnitOfWork`], and the `auto_commit` flag decides whether the call closes
//! that scope or leaves it open for further staging.

use std::marker::PhantomData;

use sqlx::postgres::PgRow;
use sqlx::FromRow;
use streamify_core::error::{CoreError, CoreResult};

use crate::models::account::Account;
use crate::models::auth::Auth;
use crate::models::content::Content;
use crate::models::content_link::{ContentFranchise, ContentGenre};
use crate::models::device::Device;
use crate::models::franchise::Franchise;
use crate::models::genre::Genre;
use crate::models::profile::Profile;
use crate::models::subscription_plan::SubscriptionPlan;
use crate::models::watch_history::WatchHistory;
use crate::query::{Filter, Patch, Statement};
use crate::unit_of_work::{Insertable, PendingWrite, UnitOfWork};

/// A persisted row type.
pub trait Entity: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    /// Name used in `NotFound` errors.
    const NAME: &'static str;
    const TABLE: &'static str;
    const COLUMNS: &'static str;

    type New: Insertable + 'static;
    type Filter: Filter + 'static;
    type Patch: Patch<Self> + 'static;

    /// Filter selecting exactly this row.
    fn key(&self) -> Self::Filter;

    /// Filter selecting the row a `New` value will become.
    fn new_key(new: &Self::New) -> Self::Filter;
}

/// Result of [`Repository::create`].
pub enum Created<E: Entity> {
    /// Committed and re-read, so database defaults are populated.
    Committed(E),
    /// Staged in a scope that is still open.
    Staged(E::New),
}

impl<E: Entity> Created<E> {
    /// The committed row, or an error if the insert was only staged.
    pub fn into_committed(self) -> CoreResult<E> {
        match self {
            Created::Committed(entity) => Ok(entity),
            Created::Staged(_) => Err(CoreError::Unknown(format!(
                "{} was staged, not committed",
                E::NAME
            ))),
        }
    }
}

impl<E> std::fmt::Debug for Created<E>
where
    E: Entity + std::fmt::Debug,
    E::New: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Created::Committed(entity) => f.debug_tuple("Committed").field(entity).finish(),
            Created::Staged(new) => f.debug_tuple("Staged").field(new).finish(),
        }
    }
}

/// Condition-based CRUD over one entity type.
pub struct Repository<E>(PhantomData<fn() -> E>);

impl<E: Entity> Repository<E> {
    /// Stage an insert. With `auto_commit` the scope is committed and the row
    /// re-read; otherwise the input is handed back and the scope stays open.
    pub async fn create(
        new: E::New,
        uow: &mut UnitOfWork,
        auto_commit: bool,
    ) -> CoreResult<Created<E>> {
        uow.stage(&new)?;
        if !auto_commit {
            return Ok(Created::Staged(new));
        }
        uow.commit().await?;
        let entity = Self::get_one(&E::new_key(&new), uow).await?;
        Ok(Created::Committed(entity))
    }

    /// The row matching `filter`, if any.
    pub async fn find_one(filter: &E::Filter, uow: &mut UnitOfWork) -> CoreResult<Option<E>> {
        let statement = Statement::select(E::TABLE, E::COLUMNS, filter, Some(1));
        let rows = uow.fetch::<E>(&statement).await?;
        Ok(rows.into_iter().next())
    }

    /// The row matching `filter`, or `NotFound`.
    pub async fn get_one(filter: &E::Filter, uow: &mut UnitOfWork) -> CoreResult<E> {
        Self::find_one(filter, uow)
            .await?
            .ok_or_else(|| CoreError::not_found(E::NAME, format!("{filter:?}")))
    }

    /// Every row matching `filter`, in the filter's order. May be empty.
    pub async fn get_many(filter: &E::Filter, uow: &mut UnitOfWork) -> CoreResult<Vec<E>> {
        let statement = Statement::select(E::TABLE, E::COLUMNS, filter, None);
        uow.fetch::<E>(&statement).await
    }

    /// Locate the row, stage the patch against its key and return the
    /// updated entity (re-read when `auto_commit`).
    pub async fn update_one(
        filter: &E::Filter,
        patch: &E::Patch,
        uow: &mut UnitOfWork,
        auto_commit: bool,
    ) -> CoreResult<E> {
        let mut entity = Self::get_one(filter, uow).await?;
        let key = entity.key();
        if let Some(write) = PendingWrite::update(E::TABLE, patch.assignments(), &key) {
            uow.stage_write(write)?;
        }
        patch.apply(&mut entity);
        if !auto_commit {
            return Ok(entity);
        }
        uow.commit().await?;
        Self::get_one(&key, uow).await
    }

    /// Locate the row and stage its deletion. Returns the row as it was.
    pub async fn delete_one(
        filter: &E::Filter,
        uow: &mut UnitOfWork,
        auto_commit: bool,
    ) -> CoreResult<E> {
        let entity = Self::get_one(filter, uow).await?;
        uow.stage_write(PendingWrite::delete(E::TABLE, &entity.key()))?;
        if auto_commit {
            uow.commit().await?;
        }
        Ok(entity)
    }
}

pub type AccountRepo = Repository<Account>;
pub type AuthRepo = Repository<Auth>;
pub type DeviceRepo = Repository<Device>;
pub type ProfileRepo = Repository<Profile>;
pub type ContentRepo = Repository<Content>;
pub type GenreRepo = Repository<Genre>;
pub type FranchiseRepo = Repository<Franchise>;
pub type ContentGenreRepo = Repository<ContentGenre>;
pub type ContentFranchiseRepo = Repository<ContentFranchise>;
pub type SubscriptionPlanRepo = Repository<SubscriptionPlan>;
pub type WatchHistoryRepo = Repository<WatchHistory>;
