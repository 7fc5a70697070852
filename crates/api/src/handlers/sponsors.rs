//! Handlers for the `/sponsors` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use validator::Validate;

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_core::error::CoreError;
use sponsorops_core::lifecycle::LifecycleOp;
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::models::deal::Deal;
use sponsorops_db::models::sponsor::{CreateSponsor, Sponsor, UpdateSponsor};
use sponsorops_db::repositories::lifecycle_repo::ArchivableKind;
use sponsorops_db::repositories::{ActivityRepo, DealRepo, OrganizationRepo, SponsorRepo};

use crate::auth::staff::Staff;
use crate::error::{AppError, AppResult};
use crate::handlers::apply_lifecycle;
use crate::query::IncludeArchivedParams;
use crate::response::LifecycleResponse;
use crate::state::AppState;

/// GET /api/v1/sponsors
pub async fn list_sponsors(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<Vec<Sponsor>>> {
    let org_id = principal.require_staff()?;
    let sponsors = SponsorRepo::list(&state.pool, org_id, params.include_archived).await?;
    Ok(Json(sponsors))
}

/// POST /api/v1/sponsors
pub async fn create_sponsor(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Json(input): Json<CreateSponsor>,
) -> AppResult<Json<Sponsor>> {
    let org_id = principal.require_staff()?;
    input.validate()?;
    if input.organization_id != org_id
        || OrganizationRepo::find_by_id(&state.pool, input.organization_id)
            .await?
            .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: input.organization_id,
        }));
    }

    let mut tx = state.pool.begin().await?;
    let sponsor = SponsorRepo::create(&mut tx, &input).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: None,
            entity_type: entity_types::SPONSOR,
            entity_id: sponsor.id,
            action: actions::CREATED,
            actor: principal.actor().to_string(),
            summary: format!("Sponsor created: {}", sponsor.name),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(sponsor))
}

/// GET /api/v1/sponsors/{id}
pub async fn get_sponsor(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Sponsor>> {
    let org_id = principal.require_staff()?;
    let sponsor = SponsorRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sponsor",
            id,
        }))?;
    Ok(Json(sponsor))
}

/// PATCH /api/v1/sponsors/{id}
pub async fn update_sponsor(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateSponsor>,
) -> AppResult<Json<Sponsor>> {
    let org_id = principal.require_staff()?;
    input.validate()?;

    let mut tx = state.pool.begin().await?;
    let sponsor = SponsorRepo::update(&mut tx, org_id, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sponsor",
            id,
        }))?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: None,
            entity_type: entity_types::SPONSOR,
            entity_id: sponsor.id,
            action: actions::UPDATED,
            actor: principal.actor().to_string(),
            summary: format!("Sponsor updated: {}", sponsor.name),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(sponsor))
}

/// POST /api/v1/sponsors/{id}/archive
pub async fn archive_sponsor(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Sponsor,
        id,
        LifecycleOp::Archive,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/sponsors/{id}/restore
pub async fn restore_sponsor(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Sponsor,
        id,
        LifecycleOp::Restore,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/sponsors/{id}/deals
pub async fn list_sponsor_deals(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Query(params): Query<IncludeArchivedParams>,
) -> AppResult<Json<Vec<Deal>>> {
    let org_id = principal.require_staff()?;
    SponsorRepo::find_by_id(&state.pool, org_id, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Sponsor",
            id,
        }))?;
    let deals = DealRepo::list_for_sponsor(&state.pool, id, params.include_archived).await?;
    Ok(Json(deals))
}
