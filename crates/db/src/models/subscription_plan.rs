//! Subscription plans an account can be enrolled in.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use streamify_core::types::{DbId, Timestamp};

use crate::query::{assign, Condition, Filter, Patch, SqlValue};
use crate::repositories::Entity;
use crate::unit_of_work::Insertable;

/// Plan names accepted by the `ck_subscription_plans_plan_name` constraint.
pub const PLAN_NAMES: [&str; 5] = ["free", "basic", "super", "mega", "pro"];

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SubscriptionPlan {
    pub id: DbId,
    pub plan_name: String,
    pub payment_methods: Vec<String>,
    pub price_cents: i64,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone)]
pub struct CreateSubscriptionPlan {
    pub id: DbId,
    pub plan_name: String,
    pub payment_methods: Vec<String>,
    pub price_cents: i64,
}

/// The plan name is its public identifier and cannot be changed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateSubscriptionPlan {
    pub payment_methods: Option<Vec<String>>,
    pub price_cents: Option<i64>,
}

#[derive(Debug, Clone)]
pub enum SubscriptionPlanFilter {
    All,
    ById(DbId),
    ByName(String),
}

impl Filter for SubscriptionPlanFilter {
    fn conditions(&self) -> Vec<Condition> {
        match self {
            SubscriptionPlanFilter::All => vec![],
            SubscriptionPlanFilter::ById(id) => vec![Condition::Eq("id", (*id).into())],
            SubscriptionPlanFilter::ByName(name) => {
                vec![Condition::Eq("plan_name", name.as_str().into())]
            }
        }
    }

    fn order_by(&self) -> Option<&'static str> {
        Some("price_cents")
    }
}

impl Insertable for CreateSubscriptionPlan {
    const TABLE: &'static str = "subscription_plans";

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("id", self.id.into()),
            ("plan_name", self.plan_name.clone().into()),
            ("payment_methods", self.payment_methods.clone().into()),
            ("price_cents", self.price_cents.into()),
        ]
    }
}

impl Patch<SubscriptionPlan> for UpdateSubscriptionPlan {
    fn assignments(&self) -> Vec<(&'static str, SqlValue)> {
        let mut out = Vec::new();
        assign(&mut out, "payment_methods", &self.payment_methods);
        assign(&mut out, "price_cents", &self.price_cents);
        out
    }

    fn apply(&self, plan: &mut SubscriptionPlan) {
        if let Some(v) = &self.payment_methods {
            plan.payment_methods = v.clone();
        }
        if let Some(v) = self.price_cents {
            plan.price_cents = v;
        }
    }
}

impl Entity for SubscriptionPlan {
    const NAME: &'static str = "SubscriptionPlan";
    const TABLE: &'static str = "subscription_plans";
    const COLUMNS: &'static str = "id, plan_name, payment_methods, price_cents, created_at";

    type New = CreateSubscriptionPlan;
    type Filter = SubscriptionPlanFilter;
    type Patch = UpdateSubscriptionPlan;

    fn key(&self) -> SubscriptionPlanFilter {
        SubscriptionPlanFilter::ById(self.id)
    }

    fn new_key(new: &CreateSubscriptionPlan) -> SubscriptionPlanFilter {
        SubscriptionPlanFilter::ById(new.id)
    }
}
