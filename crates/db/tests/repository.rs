use assert_matches::assert_matches;
use chrono::NaiveDate;
use sqlx::PgPool;
use streamify_core::error::CoreError;
use streamify_core::types::{new_id, DbId};
use streamify_db::models::account::{AccountFilter, CreateAccount, UpdateAccount};
use streamify_db::models::content_link::{ContentGenre, ContentGenreFilter};
use streamify_db::models::device::{CreateDevice, DeviceFilter};
use streamify_db::models::genre::{CreateGenre, GenreFilter};
use streamify_db::models::subscription_plan::{CreateSubscriptionPlan, SubscriptionPlanFilter};
use streamify_db::repositories::{
    AccountRepo, ContentGenreRepo, DeviceRepo, GenreRepo, SubscriptionPlanRepo,
};
use streamify_db::{Created, ScopeState, UnitOfWork};

async fn seed_account(pool: &PgPool) -> DbId {
    let mut uow = UnitOfWork::begin(pool).await.unwrap();
    let account = AccountRepo::create(
        CreateAccount {
            id: new_id(),
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            subscription_plan_id: None,
        },
        &mut uow,
        true,
    )
    .await
    .unwrap()
    .into_committed()
    .unwrap();
    account.id
}

fn device(account_id: DbId, brand: &str) -> CreateDevice {
    CreateDevice {
        id: new_id(),
        account_id,
        device_brand: brand.into(),
        device_model: "7".into(),
        ip_address: "10.0.0.5".into(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_auto_commit_returns_server_defaults(pool: PgPool) {
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let created = AccountRepo::create(
        CreateAccount {
            id: new_id(),
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            subscription_plan_id: None,
        },
        &mut uow,
        true,
    )
    .await
    .unwrap();

    let account = assert_matches!(created, Created::Committed(a) => a);
    assert_eq!(uow.state(), ScopeState::Committed);
    assert!(account.updated_at.is_none());
    assert!(account.created_at <= chrono::Utc::now());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_without_auto_commit_leaves_scope_open(pool: PgPool) {
    let account_id = seed_account(&pool).await;
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();

    let created = DeviceRepo::create(device(account_id, "Pixel"), &mut uow, false)
        .await
        .unwrap();
    let staged = assert_matches!(created, Created::Staged(d) => d);
    assert_eq!(staged.account_id, account_id);
    assert_eq!(uow.state(), ScopeState::Open);
    assert_eq!(uow.pending(), 1);

    uow.rollback().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_one_missing_is_not_found(pool: PgPool) {
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let err = AccountRepo::get_one(&AccountFilter::ById(new_id()), &mut uow)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Account", .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_many_scoped_by_owner(pool: PgPool) {
    let first = seed_account(&pool).await;
    let second = seed_account(&pool).await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    DeviceRepo::create(device(first, "Pixel"), &mut uow, false).await.unwrap();
    DeviceRepo::create(device(first, "iPhone"), &mut uow, false).await.unwrap();
    DeviceRepo::create(device(second, "Galaxy"), &mut uow, true).await.unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let devices = DeviceRepo::get_many(&DeviceFilter::ByAccount(first), &mut uow)
        .await
        .unwrap();
    assert_eq!(devices.len(), 2);
    assert!(devices.iter().all(|d| d.account_id == first));

    let none = DeviceRepo::get_many(&DeviceFilter::ByAccount(new_id()), &mut uow)
        .await
        .unwrap();
    assert!(none.is_empty());
    uow.commit().await.unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_owner_and_id_pair_hides_other_accounts_rows(pool: PgPool) {
    let owner = seed_account(&pool).await;
    let intruder = seed_account(&pool).await;

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let device = DeviceRepo::create(device(owner, "Pixel"), &mut uow, true)
        .await
        .unwrap()
        .into_committed()
        .unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let err = DeviceRepo::get_one(&DeviceFilter::ByAccountAndId(intruder, device.id), &mut uow)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::NotFound { entity: "Device", .. });
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_one_applies_patch_and_sets_updated_at(pool: PgPool) {
    let account_id = seed_account(&pool).await;
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();

    let patch = UpdateAccount {
        first_name: Some("Anabel".into()),
        ..Default::default()
    };
    let account = AccountRepo::update_one(&AccountFilter::ById(account_id), &patch, &mut uow, true)
        .await
        .unwrap();

    assert_eq!(account.first_name, "Anabel");
    assert_eq!(account.last_name, "Ruiz");
    assert!(account.updated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_patch_changes_nothing(pool: PgPool) {
    let account_id = seed_account(&pool).await;
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();

    let account = AccountRepo::update_one(
        &AccountFilter::ById(account_id),
        &UpdateAccount::default(),
        &mut uow,
        true,
    )
    .await
    .unwrap();
    assert!(account.updated_at.is_none());
}

#[test]
fn test_patch_rejects_protected_fields() {
    let result = serde_json::from_str::<UpdateAccount>(r#"{"id": "00000000-0000-0000-0000-000000000000"}"#);
    assert!(result.is_err());
    let result = serde_json::from_str::<UpdateAccount>(r#"{"created_at": "2020-01-01T00:00:00Z"}"#);
    assert!(result.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_one_cascades_to_dependents(pool: PgPool) {
    let account_id = seed_account(&pool).await;
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    DeviceRepo::create(device(account_id, "Pixel"), &mut uow, true).await.unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let deleted = AccountRepo::delete_one(&AccountFilter::ById(account_id), &mut uow, true)
        .await
        .unwrap();
    assert_eq!(deleted.id, account_id);

    let devices: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM devices")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(devices.0, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_violation_is_integrity_error(pool: PgPool) {
    let plan = |id| CreateSubscriptionPlan {
        id,
        plan_name: "basic".into(),
        payment_methods: vec!["card".into()],
        price_cents: 999,
    };
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    SubscriptionPlanRepo::create(plan(new_id()), &mut uow, true).await.unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let err = SubscriptionPlanRepo::create(plan(new_id()), &mut uow, true)
        .await
        .unwrap_err();
    assert_matches!(err, CoreError::Integrity(_));

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let plans = SubscriptionPlanRepo::get_many(&SubscriptionPlanFilter::All, &mut uow)
        .await
        .unwrap();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].payment_methods, vec!["card".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_link_rows_and_any_of_filter(pool: PgPool) {
    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let drama = new_id();
    let comedy = new_id();
    GenreRepo::create(CreateGenre { id: drama, genre_name: "Drama".into() }, &mut uow, false)
        .await
        .unwrap();
    GenreRepo::create(CreateGenre { id: comedy, genre_name: "Comedy".into() }, &mut uow, false)
        .await
        .unwrap();
    GenreRepo::create(CreateGenre { id: new_id(), genre_name: "Horror".into() }, &mut uow, true)
        .await
        .unwrap();

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let genres = GenreRepo::get_many(&GenreFilter::AnyId(vec![drama, comedy]), &mut uow)
        .await
        .unwrap();
    let names: Vec<_> = genres.iter().map(|g| g.genre_name.as_str()).collect();
    assert_eq!(names, vec!["Comedy", "Drama"]);

    // Link to a missing content row violates the foreign key.
    let err = ContentGenreRepo::create(
        ContentGenre { content_id: new_id(), genre_id: drama },
        &mut uow,
        true,
    )
    .await
    .unwrap_err();
    assert_matches!(err, CoreError::Integrity(_));

    let mut uow = UnitOfWork::begin(&pool).await.unwrap();
    let links = ContentGenreRepo::get_many(&ContentGenreFilter::ByGenre(drama), &mut uow)
        .await
        .unwrap();
    assert!(links.is_empty());
}
