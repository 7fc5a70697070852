//! Staff user rows.
//!
//! Users are provisioned by the admin bootstrap or directly through
//! [`crate::repositories::UserRepo`]; there is no user-management API.
//! A staff user belongs to exactly one organization, which becomes the
//! scope of every request they make.

use serde::Serialize;
use sqlx::FromRow;

use sponsorops_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub organization_id: DbId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Insert payload. `password_hash` must already be an Argon2id PHC string.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub organization_id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
