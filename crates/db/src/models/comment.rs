use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sponsorops_core::types::{DbId, Timestamp};

/// A comment on a deliverable. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub deliverable_id: DbId,
    pub author: String,
    pub body: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub body: String,
}
