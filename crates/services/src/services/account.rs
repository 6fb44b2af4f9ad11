use streamify_core::error::CoreResult;
use streamify_core::types::DbId;
use streamify_db::models::account::{Account, AccountFilter, UpdateAccount};
use streamify_db::repositories::AccountRepo;
use streamify_db::UnitOfWork;

use crate::aggregate::AccountAggregate;

pub struct AccountService;

impl AccountService {
    pub async fn get(account_id: DbId, uow: &mut UnitOfWork) -> CoreResult<AccountAggregate> {
        AccountAggregate::load(account_id, uow).await
    }

    pub async fn list(uow: &mut UnitOfWork) -> CoreResult<Vec<Account>> {
        AccountRepo::get_many(&AccountFilter::All, uow).await
    }

    pub async fn update(
        account_id: DbId,
        patch: &UpdateAccount,
        uow: &mut UnitOfWork,
    ) -> CoreResult<Account> {
        AccountRepo::update_one(&AccountFilter::ById(account_id), patch, uow, true).await
    }

    /// Deleting an account cascades to its credential, devices, profiles and
    /// watch history.
    pub async fn delete(account_id: DbId, uow: &mut UnitOfWork) -> CoreResult<Account> {
        AccountRepo::delete_one(&AccountFilter::ById(account_id), uow, true).await
    }
}
