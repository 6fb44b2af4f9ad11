use serde::Deserialize;
use streamify_core::error::{CoreError, CoreResult};
use streamify_core::types::{new_id, DbId};
use streamify_db::models::subscription_plan::{
    CreateSubscriptionPlan, SubscriptionPlan, SubscriptionPlanFilter, UpdateSubscriptionPlan,
    PLAN_NAMES,
};
use streamify_db::repositories::SubscriptionPlanRepo;
use streamify_db::UnitOfWork;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewSubscriptionPlan {
    pub plan_name: String,
    #[serde(default)]
    pub payment_methods: Vec<String>,
    #[validate(range(min = 0))]
    pub price_cents: i64,
}

pub struct SubscriptionPlanService;

impl SubscriptionPlanService {
    pub async fn list(uow: &mut UnitOfWork) -> CoreResult<Vec<SubscriptionPlan>> {
        SubscriptionPlanRepo::get_many(&SubscriptionPlanFilter::All, uow).await
    }

    pub async fn get_by_name(plan_name: &str, uow: &mut UnitOfWork) -> CoreResult<SubscriptionPlan> {
        let filter = SubscriptionPlanFilter::ByName(plan_name.to_string());
        SubscriptionPlanRepo::get_one(&filter, uow).await
    }

    pub async fn create(
        input: &NewSubscriptionPlan,
        uow: &mut UnitOfWork,
    ) -> CoreResult<SubscriptionPlan> {
        input.validate()?;
        if !PLAN_NAMES.contains(&input.plan_name.as_str()) {
            return Err(CoreError::Validation(format!(
                "plan_name must be one of: {}",
                PLAN_NAMES.join(", ")
            )));
        }
        let new = CreateSubscriptionPlan {
            id: new_id(),
            plan_name: input.plan_name.clone(),
            payment_methods: input.payment_methods.clone(),
            price_cents: input.price_cents,
        };
        SubscriptionPlanRepo::create(new, uow, true).await?.into_committed()
    }

    pub async fn update(
        plan_id: DbId,
        patch: &UpdateSubscriptionPlan,
        uow: &mut UnitOfWork,
    ) -> CoreResult<SubscriptionPlan> {
        if patch.price_cents.is_some_and(|price| price < 0) {
            return Err(CoreError::Validation("price_cents must not be negative".into()));
        }
        let filter = SubscriptionPlanFilter::ById(plan_id);
        SubscriptionPlanRepo::update_one(&filter, patch, uow, true).await
    }

    /// Accounts on the plan keep existing with no plan.
    pub async fn delete(plan_id: DbId, uow: &mut UnitOfWork) -> CoreResult<SubscriptionPlan> {
        let filter = SubscriptionPlanFilter::ById(plan_id);
        SubscriptionPlanRepo::delete_one(&filter, uow, true).await
    }
}
