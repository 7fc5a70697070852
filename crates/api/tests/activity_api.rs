//! HTTP-level tests for the activity trail: one event per mutation, scoped
//! and filterable.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, patch_json, post_json, seed_staff};
use serde_json::json;
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn every_mutation_appends_exactly_one_event(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);

    // Four mutations: sponsor, deal, deliverable, deliverable patch.
    let response = post_json(
        app.clone(),
        "/api/v1/sponsors",
        Some(&staff.bearer),
        json!({ "organization_id": staff.organization_id, "name": "Voltage Energy" }),
    )
    .await;
    let sponsor = body_json(response).await;

    let response = post_json(
        app.clone(),
        "/api/v1/deals",
        Some(&staff.bearer),
        json!({
            "sponsor_id": sponsor["id"],
            "name": "Spring Push",
            "start_date": "2026-03-01",
            "end_date": "2026-03-31",
        }),
    )
    .await;
    let deal = body_json(response).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/deals/{}/deliverables", deal["id"]),
        Some(&staff.bearer),
        json!({ "title": "TikTok #1", "type": "tiktok", "due_date": "2026-03-10" }),
    )
    .await;
    let deliverable = body_json(response).await;

    patch_json(
        app.clone(),
        &format!("/api/v1/deliverables/{}", deliverable["id"]),
        Some(&staff.bearer),
        json!({ "status": "internal_review" }),
    )
    .await;

    let response = get(app.clone(), "/api/v1/activity", Some(&staff.bearer)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let events = body["data"].as_array().unwrap();
    assert_eq!(events.len(), 4);

    // Reverse chronological: latest mutation first.
    assert_eq!(events[0]["action"], "updated");
    assert_eq!(events[0]["entity_type"], "deliverable");
    assert_eq!(events[3]["action"], "created");
    assert_eq!(events[3]["entity_type"], "sponsor");
    for event in events {
        assert_eq!(event["actor"], "ops@example.com");
        assert_eq!(event["organization_id"].as_i64(), Some(staff.organization_id));
    }

    // Deal filter excludes the sponsor-level event.
    let response = get(
        app,
        &format!("/api/v1/activity?deal_id={}", deal["id"]),
        Some(&staff.bearer),
    )
    .await;
    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reads_do_not_append_events(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);

    get(app.clone(), "/api/v1/sponsors", Some(&staff.bearer)).await;
    get(app.clone(), "/api/v1/deals", Some(&staff.bearer)).await;

    let response = get(app, "/api/v1/activity", Some(&staff.bearer)).await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn activity_is_invisible_across_organizations(pool: SqlitePool) {
    let staff_a = seed_staff(&pool, "Org A", "a@example.com").await;
    let staff_b = seed_staff(&pool, "Org B", "b@example.com").await;
    let app = build_test_app(pool);

    post_json(
        app.clone(),
        "/api/v1/sponsors",
        Some(&staff_a.bearer),
        json!({ "organization_id": staff_a.organization_id, "name": "Voltage Energy" }),
    )
    .await;

    let response = get(app, "/api/v1/activity", Some(&staff_b.bearer)).await;
    let body = body_json(response).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
