//! HTTP tests for registration, login and the account-owned resources.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, post_json, post_json_auth,
    put_json_auth, register_and_login, registration,
};
use sqlx::PgPool;

async fn count(pool: &PgPool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_returns_full_aggregate(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/accounts", registration("ana@example.com", Some("ana"))).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let data = &json["data"];
    let account_id = data["id"].as_str().unwrap();

    assert_eq!(data["first_name"], "Ana");
    assert_eq!(data["auth"]["email"], "ana@example.com");
    assert_eq!(data["auth"]["account_id"], account_id);
    assert!(data["auth"].get("password_hash").is_none());
    assert_eq!(data["devices"].as_array().unwrap().len(), 1);
    assert_eq!(data["devices"][0]["ip_address"], "10.0.0.5");
    assert_eq!(data["profiles"].as_array().unwrap().len(), 1);
    assert_eq!(data["profiles"][0]["nickname"], "ana");
    assert_eq!(data["profiles"][0]["is_admin"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_duplicate_email_is_conflict(pool: PgPool) {
    let first = post_json(
        build_test_app(pool.clone()),
        "/api/v1/accounts",
        registration("ana@example.com", None),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(
        build_test_app(pool.clone()),
        "/api/v1/accounts",
        registration("ana@example.com", None),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = body_json(second).await;
    assert_eq!(json["kind"], "IntegrityError");
    assert_eq!(json["code"], "INTEGRITY_ERROR");

    assert_eq!(count(&pool, "accounts").await, 1);
    assert_eq!(count(&pool, "auths").await, 1);
    assert_eq!(count(&pool, "devices").await, 1);
    assert_eq!(count(&pool, "profiles").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_register_invalid_request_is_bad_request(pool: PgPool) {
    let mut body = registration("not-an-email", None);
    body["device_info"]["ip_address"] = "999.0.0.1".into();

    let response = post_json(build_test_app(pool.clone()), "/api/v1/accounts", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["kind"], "ValidationError");
    assert_eq!(count(&pool, "accounts").await, 0);
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_by_email_and_username(pool: PgPool) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/accounts",
        registration("ana@example.com", Some("ana")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    for identifier in ["ana@example.com", "ana"] {
        let response = post_json(
            build_test_app(pool.clone()),
            "/api/v1/auth/login",
            serde_json::json!({ "username": identifier, "password": "secret123" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "login as {identifier}");
        let json = body_json(response).await;
        assert!(json["access_token"].is_string());
        assert_eq!(json["expires_in"], 15 * 60);
        assert_eq!(json["data"]["email"], "ana@example.com");
        assert!(json["data"].get("password_hash").is_none());
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_wrong_password_is_unauthorized(pool: PgPool) {
    register_and_login(&pool, "ana@example.com").await;

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/login",
        serde_json::json!({ "email": "ana@example.com", "password": "wrong-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_inactive_account_is_forbidden(pool: PgPool) {
    register_and_login(&pool, "ana@example.com").await;
    sqlx::query("UPDATE auths SET status = 'inactive'")
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/login",
        serde_json::json!({ "username": "ana@example.com", "password": "secret123" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Auth enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_routes_require_token(pool: PgPool) {
    let response = get(build_test_app(pool.clone()), "/api/v1/accounts").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(build_test_app(pool), "/api/v1/media", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["kind"], "Unauthorized");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_other_accounts_are_forbidden(pool: PgPool) {
    let (_ana_id, ana_token) = register_and_login(&pool, "ana@example.com").await;
    let (bob_id, _bob_token) = register_and_login(&pool, "bob@example.com").await;

    let uri = format!("/api/v1/accounts/{bob_id}/devices");
    let response = get_auth(build_test_app(pool.clone()), &uri, &ana_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let uri = format!("/api/v1/accounts/{bob_id}");
    let response = delete_auth(build_test_app(pool.clone()), &uri, &ana_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(count(&pool, "accounts").await, 2);
}

// ---------------------------------------------------------------------------
// Account and owned resources
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_and_update_own_account(pool: PgPool) {
    let (account_id, token) = register_and_login(&pool, "ana@example.com").await;
    let uri = format!("/api/v1/accounts/{account_id}");

    let response = get_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["auth"]["email"], "ana@example.com");

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "last_name": "Ruiz Soto" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["last_name"], "Ruiz Soto");
    assert!(json["data"]["updated_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_rejects_protected_fields(pool: PgPool) {
    let (account_id, token) = register_and_login(&pool, "ana@example.com").await;
    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/accounts/{account_id}"),
        serde_json::json!({ "id": "00000000-0000-0000-0000-000000000000" }),
        &token,
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_device_lifecycle(pool: PgPool) {
    let (account_id, token) = register_and_login(&pool, "ana@example.com").await;
    let base = format!("/api/v1/accounts/{account_id}/devices");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &base,
        serde_json::json!({
            "device_brand": "Apple",
            "device_model": "iPad",
            "ip_address": "192.168.1.20"
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let device_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(build_test_app(pool.clone()), &base, &token).await;
    assert_eq!(body_json(response).await["data"].as_array().unwrap().len(), 2);

    let uri = format!("{base}/{device_id}");
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        serde_json::json!({ "device_model": "iPad Pro" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["device_model"], "iPad Pro");

    let response = delete_auth(build_test_app(pool.clone()), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["kind"], "NotFound");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_created_by_owner_is_not_admin(pool: PgPool) {
    let (account_id, token) = register_and_login(&pool, "ana@example.com").await;
    let base = format!("/api/v1/accounts/{account_id}/profiles");

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &base,
        serde_json::json!({ "nickname": "Kids", "maturity_rating": 7 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_admin"], false);
    assert!(json["data"]["avatar_url"].as_str().unwrap().starts_with("avatar"));

    let response = post_json_auth(
        build_test_app(pool),
        &base,
        serde_json::json!({ "nickname": "Sneaky", "is_admin": true }),
        &token,
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_update_rejects_out_of_range_values(pool: PgPool) {
    let (account_id, token) = register_and_login(&pool, "ana@example.com").await;
    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/accounts/{account_id}/profiles"),
        &token,
    )
    .await;
    let profile_id = body_json(response).await["data"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/v1/accounts/{account_id}/profiles/{profile_id}");

    for body in [
        serde_json::json!({ "maturity_rating": 99 }),
        serde_json::json!({ "nickname": "" }),
    ] {
        let response = put_json_auth(build_test_app(pool.clone()), &uri, body, &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["kind"], "ValidationError");
    }

    let response = get_auth(build_test_app(pool), &uri, &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["maturity_rating"], 0);
    assert_eq!(json["data"]["nickname"], "Ana");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_watch_history_duplicate_is_conflict(pool: PgPool) {
    let (account_id, token) = register_and_login(&pool, "ana@example.com").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/media",
        serde_json::json!({
            "title": "Arrival",
            "description": "Linguist meets heptapods",
            "releaseDate": "2016-11-11",
            "duration": "1h 56m",
            "thumbnailFile": "arrival.png",
            "contentFile": "arrival.mp4",
            "trailerFile": "arrival-trailer.mp4"
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let content_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let base = format!("/api/v1/accounts/{account_id}/watches");
    let body = serde_json::json!({ "content_id": content_id, "last_position": 12.5 });
    let response = post_json_auth(build_test_app(pool.clone()), &base, body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let watch_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_json_auth(build_test_app(pool.clone()), &base, body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json_auth(
        build_test_app(pool),
        &format!("{base}/{watch_id}"),
        serde_json::json!({ "last_position": 600.0 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["last_position"], 600.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_account_cascades(pool: PgPool) {
    let (account_id, token) = register_and_login(&pool, "ana@example.com").await;

    let response = delete_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/accounts/{account_id}"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert_eq!(count(&pool, "accounts").await, 0);
    assert_eq!(count(&pool, "auths").await, 0);
    assert_eq!(count(&pool, "devices").await, 0);
    assert_eq!(count(&pool, "profiles").await, 0);
}
