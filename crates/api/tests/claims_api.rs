//! HTTP-level tests for the guarantee-claims workflow.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, build_test_app, get, patch_json, post_json, seed_staff, StaffUser};
use serde_json::json;
use sqlx::SqlitePool;

/// Seed sponsor + deal (cap 0.15, cure 5) + one deliverable, returning
/// (deal json, deliverable json).
async fn seed_claim_fixture(
    app: Router,
    staff: &StaffUser,
    guaranteed: bool,
) -> (serde_json::Value, serde_json::Value) {
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
            "guarantee_cap_pct": 0.15,
            "cure_days": 5,
        }),
    )
    .await;
    let deal = body_json(response).await;

    let response = post_json(
        app,
        &format!("/api/v1/deals/{}/deliverables", deal["id"]),
        Some(&staff.bearer),
        json!({
            "title": "TikTok #1",
            "type": "tiktok",
            "due_date": "2026-03-10",
            "guaranteed": guaranteed,
            "value": 300.0,
        }),
    )
    .await;
    let deliverable = body_json(response).await;
    (deal, deliverable)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_lifecycle_submit_then_decide(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);
    let (deal, deliverable) = seed_claim_fixture(app.clone(), &staff, true).await;
    let deal_token = deal["portal_token"].as_str().unwrap();

    // Sponsor submits the claim through the deal portal.
    let response = post_json(
        app.clone(),
        "/api/v1/portal/claims",
        None,
        json!({
            "deal_token": deal_token,
            "deliverable_id": deliverable["id"],
            "reason": "late post",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let claim = body_json(response).await;
    assert_eq!(claim["status"], "submitted");
    let claim_id = claim["id"].as_i64().unwrap();

    // Staff approves with a credit payout in one atomic decide.
    let response = post_json(
        app.clone(),
        &format!("/api/v1/claims/{claim_id}/decide"),
        Some(&staff.bearer),
        json!({
            "status": "approved",
            "payout_type": "credit",
            "payout_amount": 300.0,
            "notes": "cure window missed",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let decided = body_json(response).await;
    assert_eq!(decided["status"], "approved");
    assert_eq!(decided["payout_type"], "credit");
    assert_eq!(decided["payout_amount"], 300.0);

    // Exactly one decision event on the trail.
    let response = get(app, "/api/v1/activity", Some(&staff.bearer)).await;
    let body = body_json(response).await;
    let decided_events: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|e| e["action"] == "decided")
        .collect();
    assert_eq!(decided_events.len(), 1);
    assert_eq!(decided_events[0]["deal_id"], deal["id"]);
    assert_eq!(
        decided_events[0]["organization_id"].as_i64(),
        Some(staff.organization_id)
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_against_non_guaranteed_deliverable_fails(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);
    let (deal, deliverable) = seed_claim_fixture(app.clone(), &staff, false).await;

    let response = post_json(
        app,
        "/api/v1/portal/claims",
        None,
        json!({
            "deal_token": deal["portal_token"],
            "deliverable_id": deliverable["id"],
            "reason": "late post",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_requires_a_reason(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);
    let (deal, deliverable) = seed_claim_fixture(app.clone(), &staff, true).await;

    let response = post_json(
        app,
        "/api/v1/portal/claims",
        None,
        json!({
            "deal_token": deal["portal_token"],
            "deliverable_id": deliverable["id"],
            "reason": "   ",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn claim_cannot_cross_deals_of_the_same_sponsor(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);
    let (deal, _) = seed_claim_fixture(app.clone(), &staff, true).await;

    // A second deal under the same sponsor, with its own deliverable.
    let response = post_json(
        app.clone(),
        "/api/v1/deals",
        Some(&staff.bearer),
        json!({
            "sponsor_id": deal["sponsor_id"],
            "name": "Summer Push",
            "start_date": "2026-06-01",
            "end_date": "2026-06-30",
        }),
    )
    .await;
    let sibling = body_json(response).await;

    let response = post_json(
        app.clone(),
        &format!("/api/v1/deals/{}/deliverables", sibling["id"]),
        Some(&staff.bearer),
        json!({
            "title": "Summer TikTok",
            "type": "tiktok",
            "due_date": "2026-06-10",
            "guaranteed": true,
        }),
    )
    .await;
    let sibling_deliverable = body_json(response).await;

    // The first deal's token cannot claim against the sibling deliverable.
    let response = post_json(
        app,
        "/api/v1/portal/claims",
        None,
        json!({
            "deal_token": deal["portal_token"],
            "deliverable_id": sibling_deliverable["id"],
            "reason": "late post",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn decide_only_approves_or_denies(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);
    let (deal, deliverable) = seed_claim_fixture(app.clone(), &staff, true).await;

    let response = post_json(
        app.clone(),
        "/api/v1/portal/claims",
        None,
        json!({
            "deal_token": deal["portal_token"],
            "deliverable_id": deliverable["id"],
            "reason": "missed tags",
        }),
    )
    .await;
    let claim = body_json(response).await;
    let claim_id = claim["id"].as_i64().unwrap();

    let response = post_json(
        app.clone(),
        &format!("/api/v1/claims/{claim_id}/decide"),
        Some(&staff.bearer),
        json!({ "status": "paid" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // But the administrative override may set paid directly.
    let response = patch_json(
        app,
        &format!("/api/v1/claims/{claim_id}"),
        Some(&staff.bearer),
        json!({ "status": "paid" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let claim = body_json(response).await;
    assert_eq!(claim["status"], "paid");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn payout_amount_is_not_capped(pool: SqlitePool) {
    let staff = seed_staff(&pool, "Night Crew", "ops@example.com").await;
    let app = build_test_app(pool);
    let (deal, deliverable) = seed_claim_fixture(app.clone(), &staff, true).await;

    let response = post_json(
        app.clone(),
        "/api/v1/portal/claims",
        None,
        json!({
            "deal_token": deal["portal_token"],
            "deliverable_id": deliverable["id"],
            "reason": "late post",
        }),
    )
    .await;
    let claim = body_json(response).await;

    // Far above guarantee_cap_pct * total_value; the cap is informational.
    let response = post_json(
        app,
        &format!("/api/v1/claims/{}/decide", claim["id"]),
        Some(&staff.bearer),
        json!({ "status": "approved", "payout_type": "refund", "payout_amount": 10000.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let decided = body_json(response).await;
    assert_eq!(decided["payout_amount"], 10000.0);
}
