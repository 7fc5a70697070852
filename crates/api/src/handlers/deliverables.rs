//! Handlers for the `/deliverables` resource (staff side).

use axum::extract::{Path, State};
use axum::Json;

use sponsorops_core::activity::{actions, entity_types};
use sponsorops_core::error::CoreError;
use sponsorops_core::lifecycle::LifecycleOp;
use sponsorops_core::status::ProofKind;
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::models::comment::{Comment, CreateComment};
use sponsorops_db::models::deliverable::{Deliverable, UpdateDeliverable};
use sponsorops_db::models::proof::{CreateProof, Proof};
use sponsorops_db::repositories::lifecycle_repo::ArchivableKind;
use sponsorops_db::repositories::{
    ActivityRepo, CommentRepo, DealRepo, DeliverableRepo, ProofRepo,
};

use crate::auth::staff::Staff;
use crate::error::{AppError, AppResult};
use crate::handlers::apply_lifecycle;
use crate::response::LifecycleResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Deliverable",
        id,
    })
}

/// Load a deliverable and verify its owning deal sits inside the caller's
/// organization. A cross-org id reads as a missing deliverable.
async fn load_scoped(
    state: &AppState,
    org_id: DbId,
    id: DbId,
) -> AppResult<Deliverable> {
    let deliverable = DeliverableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    DealRepo::find_by_id(&state.pool, org_id, deliverable.deal_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(deliverable)
}

/// A proof must reference something: a URL for links, a blob-store path for
/// files.
pub(crate) fn validate_proof(input: &CreateProof) -> Result<(), CoreError> {
    match input.kind {
        ProofKind::Link if input.url.as_deref().unwrap_or("").trim().is_empty() => Err(
            CoreError::Validation("A link proof requires a url".into()),
        ),
        ProofKind::File if input.file_path.as_deref().unwrap_or("").trim().is_empty() => Err(
            CoreError::Validation("A file proof requires a file_path".into()),
        ),
        _ => Ok(()),
    }
}

/// PATCH /api/v1/deliverables/{id}
///
/// Direct field updates, including free status reassignment. The approval
/// stamp and cancellation markers are never touched here.
pub async fn update_deliverable(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDeliverable>,
) -> AppResult<Json<Deliverable>> {
    let org_id = principal.require_staff()?;
    let existing = load_scoped(&state, org_id, id).await?;

    let mut tx = state.pool.begin().await?;
    let deliverable = DeliverableRepo::update(&mut tx, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(existing.deal_id),
            entity_type: entity_types::DELIVERABLE,
            entity_id: id,
            action: actions::UPDATED,
            actor: principal.actor().to_string(),
            summary: format!("Deliverable updated: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(deliverable))
}

/// POST /api/v1/deliverables/{id}/archive
pub async fn archive_deliverable(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Deliverable,
        id,
        LifecycleOp::Archive,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/deliverables/{id}/restore
///
/// Clears `archived_at` and the cancellation markers; a canceled status
/// falls back to draft.
pub async fn restore_deliverable(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<LifecycleResponse>> {
    let org_id = principal.require_staff()?;
    let response = apply_lifecycle(
        &state,
        org_id,
        principal.actor(),
        ArchivableKind::Deliverable,
        id,
        LifecycleOp::Restore,
    )
    .await?;
    Ok(Json(response))
}

/// POST /api/v1/deliverables/{id}/cancel
///
/// Terminal abandonment: stamps `canceled_at`/`canceled_by` (once) and sets
/// the status to canceled. Distinct from archiving, which merely hides.
pub async fn cancel_deliverable(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Deliverable>> {
    let org_id = principal.require_staff()?;
    let existing = load_scoped(&state, org_id, id).await?;

    let mut tx = state.pool.begin().await?;
    let deliverable = DeliverableRepo::cancel(&mut tx, id, principal.actor())
        .await?
        .ok_or_else(|| not_found(id))?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(existing.deal_id),
            entity_type: entity_types::DELIVERABLE,
            entity_id: id,
            action: actions::CANCELED,
            actor: principal.actor().to_string(),
            summary: format!("Deliverable canceled: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(deliverable))
}

/// GET /api/v1/deliverables/{id}/proofs
pub async fn list_proofs(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Proof>>> {
    let org_id = principal.require_staff()?;
    load_scoped(&state, org_id, id).await?;
    let proofs = ProofRepo::list_for_deliverable(&state.pool, id).await?;
    Ok(Json(proofs))
}

/// POST /api/v1/deliverables/{id}/proofs
pub async fn add_proof(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<CreateProof>,
) -> AppResult<Json<Proof>> {
    let org_id = principal.require_staff()?;
    let deliverable = load_scoped(&state, org_id, id).await?;
    validate_proof(&input).map_err(AppError::Core)?;

    let mut tx = state.pool.begin().await?;
    let proof = ProofRepo::create(&mut tx, id, &input).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(deliverable.deal_id),
            entity_type: entity_types::PROOF,
            entity_id: proof.id,
            action: actions::CREATED,
            actor: principal.actor().to_string(),
            summary: format!("Proof added for deliverable: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(proof))
}

/// GET /api/v1/deliverables/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Comment>>> {
    let org_id = principal.require_staff()?;
    load_scoped(&state, org_id, id).await?;
    let comments = CommentRepo::list_for_deliverable(&state.pool, id).await?;
    Ok(Json(comments))
}

/// POST /api/v1/deliverables/{id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Path(id): Path<DbId>,
    Json(input): Json<CreateComment>,
) -> AppResult<Json<Comment>> {
    let org_id = principal.require_staff()?;
    let deliverable = load_scoped(&state, org_id, id).await?;
    if input.body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Comment body is required".into(),
        )));
    }

    let mut tx = state.pool.begin().await?;
    let comment = CommentRepo::create(&mut tx, id, principal.actor(), &input.body).await?;
    ActivityRepo::append(
        &mut tx,
        &NewActivityEvent {
            organization_id: org_id,
            deal_id: Some(deliverable.deal_id),
            entity_type: entity_types::DELIVERABLE,
            entity_id: comment.id,
            action: actions::COMMENTED,
            actor: principal.actor().to_string(),
            summary: format!("Comment on deliverable: {}", deliverable.title),
        },
    )
    .await?;
    tx.commit().await?;

    Ok(Json(comment))
}
