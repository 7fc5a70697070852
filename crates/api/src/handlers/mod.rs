//! Request handlers, one module per resource.
//!
//! Every mutating handler follows the same shape: authorize once at the
//! boundary (staff extractor or portal token resolution), validate, then
//! perform the entity write and its activity event on a single transaction.
//! A failed activity append rolls the whole operation back.

pub mod activity;
pub mod auth;
pub mod claims;
pub mod deals;
pub mod deliverables;
pub mod orgs;
pub mod portal;
pub mod sponsors;
pub mod tickets;

use sponsorops_core::error::CoreError;
use sponsorops_core::lifecycle::LifecycleOp;
use sponsorops_core::types::DbId;
use sponsorops_db::models::activity::NewActivityEvent;
use sponsorops_db::repositories::lifecycle_repo::ArchivableKind;
use sponsorops_db::repositories::{ActivityRepo, DealRepo, DeliverableRepo, LifecycleRepo};

use crate::error::{AppError, AppResult};
use crate::response::LifecycleResponse;
use crate::state::AppState;

/// Apply an archive/restore operation to any archivable entity, with the
/// entity-specific side effects and the activity event, in one transaction.
///
/// Side effects on top of the shared `archived_at` move:
/// - archiving a deal flips its status to `archived`; restoring flips an
///   `archived` status back to `active`
/// - restoring a deliverable clears its cancellation markers (a canceled
///   status falls back to draft)
///
/// An operation that changes nothing (already in the target state) succeeds
/// without appending an event.
pub(crate) async fn apply_lifecycle(
    state: &AppState,
    organization_id: DbId,
    actor: &str,
    kind: ArchivableKind,
    id: DbId,
    op: LifecycleOp,
) -> AppResult<LifecycleResponse> {
    let mut tx = state.pool.begin().await?;

    let scope = LifecycleRepo::scope(&mut tx, kind, id)
        .await?
        .filter(|scope| scope.organization_id == organization_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.display_name(),
            id,
        }))?;

    let outcome = LifecycleRepo::apply(&mut tx, kind, id, op)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: kind.display_name(),
            id,
        }))?;

    let side_effect_changed = match (kind, op) {
        (ArchivableKind::Deal, LifecycleOp::Archive) => {
            DealRepo::mark_status_archived(&mut tx, id).await?
        }
        (ArchivableKind::Deal, LifecycleOp::Restore) => {
            DealRepo::reactivate_status(&mut tx, id).await?
        }
        (ArchivableKind::Deliverable, LifecycleOp::Restore) => {
            DeliverableRepo::clear_cancellation(&mut tx, id).await?
        }
        _ => false,
    };

    let changed = outcome.changed || side_effect_changed;
    if changed {
        ActivityRepo::append(
            &mut tx,
            &NewActivityEvent {
                organization_id,
                deal_id: scope.deal_id,
                entity_type: kind.entity_type(),
                entity_id: id,
                action: op.action(),
                actor: actor.to_string(),
                summary: format!("{} {}: {}", kind.display_name(), op.action(), scope.label),
            },
        )
        .await?;
    }

    tx.commit().await?;

    Ok(LifecycleResponse {
        entity_type: kind.entity_type(),
        id,
        archived_at: outcome.archived_at,
        changed,
    })
}
