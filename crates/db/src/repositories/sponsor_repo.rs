//! Repository for the `sponsors` table.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::token::generate_portal_token;
use sponsorops_core::types::DbId;

use crate::models::sponsor::{CreateSponsor, Sponsor, UpdateSponsor};

const COLUMNS: &str =
    "id, organization_id, name, contact_email, portal_token, archived_at, created_at";

/// Provides CRUD operations for sponsors.
pub struct SponsorRepo;

impl SponsorRepo {
    /// Insert a new sponsor with a freshly generated portal token.
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &CreateSponsor,
    ) -> Result<Sponsor, sqlx::Error> {
        let query = format!(
            "INSERT INTO sponsors (organization_id, name, contact_email, portal_token, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(input.organization_id)
            .bind(&input.name)
            .bind(&input.contact_email)
            .bind(generate_portal_token())
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Find a sponsor by id within an organization scope. Archived rows are
    /// returned; visibility is a list-time concern.
    pub async fn find_by_id(
        pool: &SqlitePool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Sponsor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sponsors WHERE id = ? AND organization_id = ?");
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a portal token to its sponsor. Unknown tokens are `None`;
    /// callers surface that as NotFound without distinguishing why.
    pub async fn find_by_token(
        pool: &SqlitePool,
        token: &str,
    ) -> Result<Option<Sponsor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sponsors WHERE portal_token = ?");
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List sponsors for an organization, name ascending.
    pub async fn list(
        pool: &SqlitePool,
        organization_id: DbId,
        include_archived: bool,
    ) -> Result<Vec<Sponsor>, sqlx::Error> {
        let filter = if include_archived {
            ""
        } else {
            " AND archived_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM sponsors WHERE organization_id = ?{filter} ORDER BY name ASC"
        );
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Update a sponsor. Only non-`None` fields in `input` are applied.
    pub async fn update(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        id: DbId,
        input: &UpdateSponsor,
    ) -> Result<Option<Sponsor>, sqlx::Error> {
        let query = format!(
            "UPDATE sponsors SET
                name = COALESCE(?, name),
                contact_email = COALESCE(?, contact_email)
             WHERE id = ? AND organization_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sponsor>(&query)
            .bind(&input.name)
            .bind(&input.contact_email)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }
}
