use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use sponsorops_core::types::{DbId, Timestamp};

/// A sponsor. `portal_token` is assigned at insert and never changes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sponsor {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub contact_email: Option<String>,
    pub portal_token: String,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSponsor {
    pub organization_id: DbId,
    pub name: String,
    #[validate(email)]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSponsor {
    pub name: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
}
