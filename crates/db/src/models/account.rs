//! Account: the root of the account aggregate.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{Date, DbId, Timestamp};

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Account {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub subscription_plan_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct CreateAccount {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Date,
    pub subscription_plan_id: Option<DbId>,
}

/// Updatable account fields. Identity and timestamps are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateAccount {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<Date>,
    pub subscription_plan_id: Option<DbId>,
}

#[derive(Debug, Clone)]
pub enum AccountFilter {
    All,
    ById(DbId),
    BySubscriptionPlan(DbId),
}

impl Filter for AccountFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            AccountFilter::All => vec![],
            AccountFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            AccountFilter::BySubscriptionPlan(plan_id) => {
                vec![Condition::Eq("subscription_plan_id", (*plan_id).into())]
            }
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("created_at DESC")
    }
}

impl Insertable for CreateAccount {
    const TABLE: &'static str = "accounts";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("first_name", self.first_name.clone().into()),
            ("last_name", self.last_name.clone().into()),
            ("birth_date", self.birth_date.into()),
            ("subscription_plan_id", self.subscription_plan_id.into()),
        ]
    }
}

impl Patch<Account> for UpdateAccount {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "first_name", &self.first_name);
        assign(&mut out, "last_name", &self.last_name);
        assign(&mut out, "birth_date", &self.birth_date);
        assign(&mut out, "subscription_plan_id", &self.subscription_plan_id);
        if !out.is_empty() {
            out.push(("updated_at", chrono::Utc::now().into()));
        }
        out
    }

    fn apply(&self, account: &mut Account) {
        if let Some(v) = &self.first_name {
            account.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            account.last_name = v.clone();
        }
        if let Some(v) = self.birth_date {
            account.birth_date = v;
        }
        if let Some(v) = self.subscription_plan_id {
            account.subscription_plan_id = Some(v);
        }
    }
}

impl Entity for Account {
    const NAME: &'static str = "Account";
    const TABLE: &'static str = "accounts";
    const COLUMNS: &'static str =
        "id, first_name, last_name, birth_date, subscription_plan_id, created_at, updated_at";

    type New = CreateAccount;
    type Filter = AccountFilter;
    type Patch = UpdateAccount;

    fn key(&self) -> AccountFilter {
        AccountFilter::ById(self.id)
    }

    fn new_key(new: &CreateAccount) -> AccountFilter {
        AccountFilter::ById(new.id)
    }
}
