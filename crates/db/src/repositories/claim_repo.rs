//! Repository for the `claims` table.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::status::ClaimStatus;
use sponsorops_core::types::DbId;

use crate::models::claim::{Claim, CreateClaim, DecideClaim, UpdateClaim};

const COLUMNS: &str = "id, organization_id, deal_id, deliverable_id, reason, description, \
    status, payout_type, payout_amount, notes, archived_at, created_at";

/// Provides CRUD and decision operations for guarantee claims.
pub struct ClaimRepo;

impl ClaimRepo {
    /// Insert a new claim in `submitted` status. Eligibility is validated by
    /// the caller before this runs.
    pub async fn create(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        deal_id: DbId,
        input: &CreateClaim,
    ) -> Result<Claim, sqlx::Error> {
        let query = format!(
            "INSERT INTO claims (organization_id, deal_id, deliverable_id, reason, description,
                                 status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Claim>(&query)
            .bind(organization_id)
            .bind(deal_id)
            .bind(input.deliverable_id)
            .bind(&input.reason)
            .bind(&input.description)
            .bind(ClaimStatus::Submitted)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Find a claim by id within an organization scope.
    pub async fn find_by_id(
        pool: &SqlitePool,
        organization_id: DbId,
        id: DbId,
    ) -> Result<Option<Claim>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM claims WHERE id = ? AND organization_id = ?");
        sqlx::query_as::<_, Claim>(&query)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(pool)
            .await
    }

    /// List claims for an organization, newest first.
    pub async fn list(
        pool: &SqlitePool,
        organization_id: DbId,
        include_archived: bool,
    ) -> Result<Vec<Claim>, sqlx::Error> {
        let filter = if include_archived {
            ""
        } else {
            " AND archived_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM claims WHERE organization_id = ?{filter} \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Claim>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// List a deal's claims, newest first.
    pub async fn list_for_deal(pool: &SqlitePool, deal_id: DbId) -> Result<Vec<Claim>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM claims WHERE deal_id = ? ORDER BY created_at DESC");
        sqlx::query_as::<_, Claim>(&query)
            .bind(deal_id)
            .fetch_all(pool)
            .await
    }

    /// Record a decision: status, payout bookkeeping, and notes in one
    /// atomic update. The status restriction (approved/denied) is validated
    /// by the caller.
    pub async fn decide(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        id: DbId,
        input: &DecideClaim,
    ) -> Result<Option<Claim>, sqlx::Error> {
        let query = format!(
            "UPDATE claims SET status = ?, payout_type = ?, payout_amount = ?, notes = ?
             WHERE id = ? AND organization_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Claim>(&query)
            .bind(input.status)
            .bind(input.payout_type)
            .bind(input.payout_amount)
            .bind(&input.notes)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }

    /// Administrative override: apply any provided fields directly, with no
    /// eligibility or transition re-check.
    pub async fn update(
        conn: &mut SqliteConnection,
        organization_id: DbId,
        id: DbId,
        input: &UpdateClaim,
    ) -> Result<Option<Claim>, sqlx::Error> {
        let query = format!(
            "UPDATE claims SET
                status = COALESCE(?, status),
                payout_type = COALESCE(?, payout_type),
                payout_amount = COALESCE(?, payout_amount),
                notes = COALESCE(?, notes)
             WHERE id = ? AND organization_id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Claim>(&query)
            .bind(input.status)
            .bind(input.payout_type)
            .bind(input.payout_amount)
            .bind(&input.notes)
            .bind(id)
            .bind(organization_id)
            .fetch_optional(conn)
            .await
    }
}
