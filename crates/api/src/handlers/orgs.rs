//! Handlers for the `/orgs` resource.
//!
//! A staff principal is scoped to exactly one organization; reads and
//! updates outside that scope read as NotFound rather than Forbidden so ids
//! in other tenants cannot be probed.

use axum::extract::{Path, State};
use axum::Json;

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_core::error::CoreError;
use sponsorops_core::principal::Principal;
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::models::organization::{CreateOrganization, Organization, UpdateOrganization};
use sponsorops_db::repositories::{ActivityRepo, OrganizationRepo};

use crate::auth::staff::Staff;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn require_own_org(principal: &Principal, id: DbId) -> Result<DbId, AppError> {
    let org_id = principal.require_staff()?;
    if org_id != id {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id,
        }));
    }
    Ok(org_id)
}

/// GET /api/v1/orgs
///
/// List the caller's organizations (exactly one under the current model).
pub async fn list_orgs(
    State(state): State<AppState>,
    Staff(principal): Staff,
) -> AppResult<Json<Vec<Organization>>> {
    let org_id = principal.require_staff()?;
    let org = OrganizationRepo::find_by_id(&state.pool, org_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id: org_id,
        }))?;
    Ok(Json(vec![org]))
}

/// POST /api/v1/orgs
pub async fn create_org(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Json(input): Json<CreateOrganization>,
) -> AppResult<Json<Organization>> {
    principal.require_staff()?;
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Organization name is required".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;
    let org = OrganizationRepo::create(&mut tx, name).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org.id,
            deal_id: None,
            entity_type: entity_types::ORGANIZATION,
            entity_id: org.id,
            action: actions::CREATED,
            actor: principal.actor().to_string(),
            summary: format!("Organization created: {}", org.name),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(org))
}

/// GET /api/v1/orgs/{id}
pub async fn get_org(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Organization>> {
    require_own_org(&principal, id)?;
    let org = OrganizationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id,
        }))?;
    Ok(Json(org))
}

/// PATCH /api/v1/orgs/{id}
pub async fn update_org(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrganization>,
) -> AppResult<Json<Organization>> {
    require_own_org(&principal, id)?;
    let name = input.name.trim();
    if name.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Organization name is required".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;
    let org = OrganizationRepo::rename(&mut tx, id, name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Organization",
            id,
        }))?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org.id,
            deal_id: None,
            entity_type: entity_types::ORGANIZATION,
            entity_id: org.id,
            action: actions::UPDATED,
            actor: principal.actor().to_string(),
            summary: format!("Organization renamed: {}", org.name),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(org))
}
