//! Handlers for the `/claims` resource (staff side).
//!
//! Claims are created through the deal portal; staff list, decide, override,
//! and archive them.

use axum::extract::{Path, Query, State};
use axum::Json;

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_core::claims::validate_decision;
use sponsorops_core::error::CoreError;
use sponsorops_core::lifecycle::LifecycleOp;
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::models::claim::{Claim, DecideClaim, UpdateClaim};
use sponsorops_db::repositories::lifecycle_repo::ArchivableKind;
use sponsorops_db::repositories::{ActivityRepo, ClaimRepo};

use crate::auth::staff::Staff;
use crate::error::{AppError, AppResult};
use crate::handlers::apply_lifecycle;
use crate::query::IncludeArchivedParams;
use crate::response::LifecycleResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Claim", id })
}

/// GET /api/v1/claims
pub async fn list_claims(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<Vec<Claim>>> {
    let org_id = principal.require_staff()?;
    let claims = ClaimRepo::list(&state.pool, org_id, params.include_archived).await?;
    Ok(Json(claims))
}

/// PATCH /api/v1/claims/{id}
///
/// Administrative quick-status override: any of the four statuses may be
/// assigned directly, with no eligibility re-check. Exists to correct
/// mistakes.
pub async fn update_claim(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClaim>,
) -> AppResult<Json<Claim>> {
    let org_id = principal.require_staff()?;

    let mut tx = state.pool.begin().await?;
    let claim = ClaimRepo::update(&mut tx, org_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(claim.deal_id),
            entity_type: entity_types::CLAIM,
            entity_id: claim.id,
            action: actions::UPDATED,
            actor: principal.actor().to_string(),
            summary: format!("Claim updated: {}", claim.reason),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(claim))
}

/// POST /api/v1/claims/{id}/decide
///
/// Record a decision: status (approved or denied), payout type, payout
/// amount, and notes in one atomic update. The payout amount is not checked
/// against the deal's guarantee cap; the cap is informational.
pub async fn decide_claim(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<DecideClaim>,
) -> AppResult<Json<Claim>> {
    let org_id = principal.require_staff()?;
    validate_decision(input.status).map_err(AppError::Core)?;

    let mut tx = state.pool.begin().await?;
    let claim = ClaimRepo::decide(&mut tx, org_id, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(claim.deal_id),
            entity_type: entity_types::CLAIM,
            entity_id: claim.id,
            action: actions::DECIDED,
            actor: principal.actor().to_string(),
            summary: format!("Claim {}: {}", claim.status, claim.reason),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(claim))
}

/// POST /api/v1/claims/{id}/archive
pub async fn archive_claim(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Claim,
        id,
        LifecycleOp::Archive,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/claims/{id}/restore
pub async fn restore_claim(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Claim,
        id,
        LifecycleOp::Restore,
    )
    .await?;
    Ok(Json(response))
}
