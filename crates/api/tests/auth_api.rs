//! HTTP-level tests for authentication and access-control boundaries.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json, seed_staff};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_bearer_token(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        None,
        json!({ "email": "ops@example.com", "password": "staff-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["user"]["organization_id"], staff.organization_id);

    // The issued token works against a staff endpoint.
    let token = body["access_token"].as_str().unwrap().to_string();
    let response = get(app, "/api/v1/sponsors", Some(&format!("Bearer {token}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_with_wrong_password_is_unauthorized(pool: SqlitePool) {
    seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        None,
        json!({ "email": "ops@example.com", "password": "nope" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_bearer_is_unauthorized_not_notfound(pool: SqlitePool) {
    let app = build_test_app(pool);
    // Credential absence is detected before any entity lookup.
    let response = get(app, "/api/v1/sponsors", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_bearer_is_unauthorized(pool: SqlitePool) {
    let app = build_test_app(pool);
    let response = get(app, "/api/v1/sponsors", Some("Bearer not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cross_org_ids_read_as_not_found(pool: SqlitePool) {
    let staff_a = seed_staff(&pool, "Org A", "a@example.com").await;
    let staff_b = seed_staff(&pool, "Org B", "b@example.com").await;
    let app = build_test_app(pool);

    // Org A creates a sponsor.
    let response = post_json(
        app.clone(),
        "/api/v1/sponsors",
        Some(&staff_a.bearer),
        json!({ "organization_id": staff_a.organization_id, "name": "Voltage Energy" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let sponsor = body_json(response).await;
    let sponsor_id = sponsor["id"].as_i64().unwrap();

    // Org B sees 404, not 403: no existence leak across organizations.
    let response = get(
        app,
        &format!("/api/v1/sponsors/{sponsor_id}"),
        Some(&staff_b.bearer),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
