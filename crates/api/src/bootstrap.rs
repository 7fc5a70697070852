//! First-run admin provisioning.
//!
//! There is no user-management API; the initial staff account comes from the
//! `ADMIN_EMAIL` / `ADMIN_PASSWORD` environment variables at startup. The
//! bootstrap is idempotent: an existing user with that email is left alone.

use sponsorops_db::models::user::CreateUser;
use sponsorops_db::repositories::{OrganizationRepo, UserRepo};
use sponsorops_db::DbPool;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};

/// Ensure an admin user exists for `email`, creating the first organization
/// if the database is empty.
pub async fn ensure_admin(pool: &DbPool, email: &str, password: &str) -> AppResult<()> {
    if UserRepo::find_by_email(pool, email).await?.is_some() {
        return Ok(());
    }

    let existing_org = OrganizationRepo::first(pool).await?;
    let mut tx = pool.begin().await?;

    let org = match existing_org {
        Some(org) => org,
        None => OrganizationRepo::create(&mut tx, "Default Org").await?,
    };

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &mut tx,
        &CreateUser {
            organization_id: org.id,
            email: email.to_string(),
            password_hash,
            role: "superadmin".to_string(),
        },
    )
    .await?;

    tx.commit().await?;
    tracing::info!(user_id = user.id, org_id = org.id, "admin user provisioned");
    Ok(())
}
