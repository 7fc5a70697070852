//! Activity trail models. Events are append-only: there is no update DTO
//! and no delete path anywhere in the repository.

use serde::Serialize;
use sqlx::FromRow;

use sponsorops_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEvent {
    pub id: DbId,
    pub organization_id: DbId,
    pub deal_id: Option<DbId>,
    pub entity_type: String,
    pub entity_id: DbId,
    pub action: String,
    pub actor: String,
    pub summary: String,
    pub created_at: Timestamp,
}

/// Insert payload, built by handlers from `sponsorops_core::activity`
/// constants and the resolved principal.
#[derive(Debug, Clone)]
pub struct NewActivityEvent {
    pub organization_id: DbId,
    pub deal_id: Option<DbId>,
    pub entity_type: &'static str,
    pub entity_id: DbId,
    pub action: &'static str,
    pub actor: String,
    pub summary: String,
}
