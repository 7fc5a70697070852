use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sponsorops_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrganization {
    pub name: String,
}
