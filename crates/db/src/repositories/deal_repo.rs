//! Repository for the `deals` table.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::status::DealStatus;
use sponsorops_core::token::generate_portal_token;
use sponsorops_core::types::{DbId, Timestamp};

use crate::models::deal::{CreateDeal, Deal, DealSummary, UpdateDeal};

const COLUMNS: &str = "id, organization_id, sponsor_id, name, start_date, end_date, \
    total_value, status, guarantee_cap_pct, cure_days, portal_token, completed_at, \
    archived_at, created_at";

/// Provides CRUD operations for deals.
pub struct DealRepo;

impl DealRepo {
    /// Insert a new deal under a sponsor, with a fresh portal token.
    ///
    /// `organization_id` is the owning sponsor's organization, resolved by
    /// the caller.
    pub async fn create(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        input: &CreateDeal,
    ) -> Result<Deal, sqlx::Error> {
        let query = format!(
            "INSERT INTO deals (organization_id, sponsor_id, name, start_date, end_date,
                                total_value, status, guarantee_cap_pct, cure_days,
                                portal_token, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deal>(&query)
            .bind(organization_id)
            .bind(input.sponsor_id)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.total_value)
            .bind(DealStatus::Draft)
            .bind(input.guarantee_cap_pct)
            .bind(input.cure_days)
            .bind(generate_portal_token())
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Find a deal by id within an organization scope. Archived rows are
    /// returned; visibility is a list-time concern.
    pub async fn find_by_id(
        pool: &SqlitePool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Deal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deals WHERE id = ? AND organization_id = ?");
        sqlx::query_as::<_, Deal>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a portal token to its deal. Unknown tokens are `None`.
    pub async fn find_by_token(pool: &SqlitePool, token: &str) -> Result<Option<Deal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deals WHERE portal_token = ?");
        sqlx::query_as::<_, Deal>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List deals for an organization, most recent start date first.
    pub async fn list(
        pool: &SqlitePool,
        organization_id: DbId,
        include_archived: bool,
    ) -> Result<Vec<Deal>, sqlx::Error> {
        let filter = if include_archived {
            ""
        } else {
            " AND archived_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM deals WHERE organization_id = ?{filter} \
             ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, Deal>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// List a sponsor's deals, most recent start date first.
    pub async fn list_for_sponsor(
        pool: &SqlitePool,
        sponsor_id: DbId,
        include_archived: bool,
    ) -> Result<Vec<Deal>, sqlx::Error> {
        let filter = if include_archived {
            ""
        } else {
            " AND archived_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM deals WHERE sponsor_id = ?{filter} ORDER BY start_date DESC"
        );
        sqlx::query_as::<_, Deal>(&query)
            .bind(sponsor_id)
            .fetch_all(pool)
            .await
    }

    /// Summary projection of a sponsor's deals for the sponsor portal.
    pub async fn summaries_for_sponsor(
        pool: &SqlitePool,
        sponsor_id: DbId,
    ) -> Result<Vec<DealSummary>, sqlx::Error> {
        sqlx::query_as::<_, DealSummary>(
            "SELECT id, name, start_date, end_date, status, archived_at \
             FROM deals WHERE sponsor_id = ? ORDER BY start_date DESC",
        )
        .bind(sponsor_id)
        .fetch_all(pool)
        .await
    }

    /// Update contract fields. Only non-`None` fields in `input` are applied;
    /// status changes go through [`DealRepo::set_status`].
    pub async fn update(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        id: DbId,
        input: &UpdateDeal,
    ) -> Result<Option<Deal>, sqlx::Error> {
        let query = format!(
            "UPDATE deals SET
                name = COALESCE(?, name),
                start_date = COALESCE(?, start_date),
                end_date = COALESCE(?, end_date),
                total_value = COALESCE(?, total_value),
                guarantee_cap_pct = COALESCE(?, guarantee_cap_pct),
                cure_days = COALESCE(?, cure_days)
             WHERE id = ? AND organization_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deal>(&query)
            .bind(&input.name)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.total_value)
            .bind(input.guarantee_cap_pct)
            .bind(input.cure_days)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }

    /// Flip the status to `archived` alongside an archive transition.
    /// Returns whether the row changed.
    pub async fn mark_status_archived(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE deals SET status = 'archived' WHERE id = ? AND status != 'archived'")
                .bind(id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flip an archived status back to `active` alongside a restore.
    /// Returns whether the row changed.
    pub async fn reactivate_status(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE deals SET status = 'active' WHERE id = ? AND status = 'archived'")
                .bind(id)
                .execute(conn)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Set the deal status, optionally stamping `completed_at`.
    ///
    /// The completion precondition (every deliverable settled) is checked by
    /// the caller before this runs.
    pub async fn set_status(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        id: DbId,
        status: DealStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<Option<Deal>, sqlx::Error> {
        let query = format!(
            "UPDATE deals SET status = ?, completed_at = COALESCE(?, completed_at)
             WHERE id = ? AND organization_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deal>(&query)
            .bind(status)
            .bind(completed_at)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }
}
