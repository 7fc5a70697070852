//! Handlers for the `/deals` resource, including nested deliverables, the
//! brand kit, and the deal's claims listing.

use axum::extract::{Path, Query, State};
use axum::Json;
use validator::Validate;

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_core::error::CoreError;
use sponsorops_core::lifecycle::LifecycleOp;
use sponsorops_core::status::DealStatus;
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::models::brand_kit::{BrandKit, UpdateBrandKit};
use sponsorops_db::models::claim::Claim;
use sponsorops_db::models::deal::{CreateDeal, Deal, UpdateDeal};
use sponsorops_db::models::deliverable::{CreateDeliverable, Deliverable};
use sponsorops_db::repositories::lifecycle_repo::ArchivableKind;
use sponsorops_db::repositories::{
    ActivityRepo, BrandKitRepo, ClaimRepo, DealRepo, DeliverableRepo, SponsorRepo,
};

use crate::auth::staff::Staff;
use crate::error::{AppError, AppResult};
use crate::handlers::apply_lifecycle;
use crate::query::IncludeArchivedParams;
use crate::response::LifecycleResponse;
use crate::state::AppState;

fn deal_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Deal", id })
}

/// GET /api/v1/deals
pub async fn list_deals(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<Vec<Deal>>> {
    let org_id = principal.require_staff()?;
    let deals = DealRepo::list(&state.pool, org_id, params.include_archived).await?;
    Ok(Json(deals))
}

/// POST /api/v1/deals
pub async fn create_deal(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Json(input): Json<CreateDeal>,
) -> AppResult<Json<Deal>> {
    let org_id = principal.require_staff()?;
    input.validate()?;
    if input.start_date > input.end_date {
        return Err(AppError::Core(CoreError::Validation(
            "start_date must not be after end_date".into(),
        )));
    }
    // The sponsor must exist inside the caller's organization.
    SponsorRepo::find_by_id(&state.pool, org_id, input.sponsor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sponsor",
            id: input.sponsor_id,
        }))?;

    let mut tx = state.pool.begin().await?;
    let deal = DealRepo::create(&mut tx, org_id, &input).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(deal.id),
            entity_type: entity_types::DEAL,
            entity_id: deal.id,
            action: actions::CREATED,
            actor: principal.actor().to_string(),
            summary: format!("Deal created: {}", deal.name),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(deal))
}

/// GET /api/v1/deals/{id}
pub async fn get_deal(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Deal>> {
    let org_id = principal.require_staff()?;
    let deal = DealRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| deal_not_found(id))?;
    Ok(Json(deal))
}

/// PATCH /api/v1/deals/{id}
///
/// Contract-field updates plus an optional status change. Completing a deal
/// requires every deliverable to be delivered or canceled. Archiving goes
/// through the dedicated archive operation, never through a status patch.
pub async fn update_deal(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeal>,
) -> AppResult<Json<Deal>> {
    let org_id = principal.require_staff()?;
    input.validate()?;
    if let Some(DealStatus::Archived) = input.status {
        return Err(AppError::Core(CoreError::Validation(
            "Use the archive operation to archive a deal".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;
    let mut deal = DealRepo::update(&mut tx, org_id, id, &input)
        .await?
        .ok_or_else(|| deal_not_found(id))?;
    if deal.start_date > deal.end_date {
        return Err(AppError::Core(CoreError::Validation(
            "start_date must not be after end_date".into(),
        )));
    }

    if let Some(status) = input.status {
        let completed_at = if status == DealStatus::Completed {
            let unsettled = DeliverableRepo::count_unsettled(&mut tx, id).await?;
            if unsettled > 0 {
                return Err(AppError::Core(CoreError::Validation(
                    "Cannot complete: some deliverables are not delivered or canceled".into(),
                )));
            }
            Some(chrono::Utc::now())
        } else {
            None
        };
        deal = DealRepo::set_status(&mut tx, org_id, id, status, completed_at)
            .await?
            .ok_or_else(|| deal_not_found(id))?;
    }

    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(deal.id),
            entity_type: entity_types::DEAL,
            entity_id: deal.id,
            action: actions::UPDATED,
            actor: principal.actor().to_string(),
            summary: format!("Deal updated: {}", deal.name),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(deal))
}

/// POST /api/v1/deals/{id}/archive
pub async fn archive_deal(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Deal,
        id,
        LifecycleOp::Archive,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/deals/{id}/restore
pub async fn restore_deal(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Deal,
        id,
        LifecycleOp::Restore,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/deals/{id}/deliverables
pub async fn list_deliverables(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<Vec<Deliverable>>> {
    let org_id = principal.require_staff()?;
    DealRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| deal_not_found(id))?;
    let deliverables =
        DeliverableRepo::list_for_deal(&state.pool, id, params.include_archived).await?;
    Ok(Json(deliverables))
}

/// POST /api/v1/deals/{id}/deliverables
pub async fn create_deliverable(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<CreateDeliverable>,
) -> AppResult<Json<Deliverable>> {
    let org_id = principal.require_staff()?;
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Deliverable title is required".into(),
        )));
    }
    DealRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| deal_not_found(id))?;

    let mut tx = state.pool.begin().await?;
    let deliverable = DeliverableRepo::create(&mut tx, id, &input).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(id),
            entity_type: entity_types::DELIVERABLE,
            entity_id: deliverable.id,
            action: actions::CREATED,
            actor: principal.actor().to_string(),
            summary: format!("Deliverable created: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(deliverable))
}

/// GET /api/v1/deals/{id}/brandkit
///
/// Lazily creates an empty kit on first read, like the rest of the brand
/// kit surface this is not treated as a visible state change.
pub async fn get_brandkit(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<BrandKit>> {
    let org_id = principal.require_staff()?;
    DealRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| deal_not_found(id))?;

    let mut tx = state.pool.begin().await?;
    let row = BrandKitRepo::get_or_create(&mut tx, id).await?;
    tx.commit().await?;

    Ok(Json(BrandKit::try_from(row).map_err(AppError::Core)?))
}

/// PUT /api/v1/deals/{id}/brandkit
///
/// Whole-object replacement; there is no partial merge.
pub async fn update_brandkit(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBrandKit>,
) -> AppResult<Json<BrandKit>> {
    let org_id = principal.require_staff()?;
    DealRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| deal_not_found(id))?;

    let mut tx = state.pool.begin().await?;
    let row = BrandKitRepo::replace(&mut tx, id, &input).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(id),
            entity_type: entity_types::BRANDKIT,
            entity_id: row.id,
            action: actions::UPDATED,
            actor: principal.actor().to_string(),
            summary: "BrandKit updated".to_string(),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(BrandKit::try_from(row).map_err(AppError::Core)?))
}

/// GET /api/v1/deals/{id}/claims
pub async fn list_deal_claims(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Claim>>> {
    let org_id = principal.require_staff()?;
    DealRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or_else(|| deal_not_found(id))?;
    let claims = ClaimRepo::list_for_deal(&state.pool, id).await?;
    Ok(Json(claims))
}
