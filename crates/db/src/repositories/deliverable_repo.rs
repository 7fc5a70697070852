//! Repository for the `deliverables` table.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::status::DeliverableStatus;
use sponsorops_core::types::DbId;

use crate::models::deliverable::{CreateDeliverable, Deliverable, UpdateDeliverable};

const COLUMNS: &str = "id, deal_id, title, kind, due_date, status, owner, brief, value, \
    guaranteed, sponsor_approval_required, sponsor_approved_at, sponsor_approved_by, \
    canceled_at, canceled_by, archived_at, created_at";

/// Provides CRUD and workflow operations for deliverables.
pub struct DeliverableRepo;

impl DeliverableRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        deal_id: DbId,
        input: &CreateDeliverable,
    ) -> Result<Deliverable, sqlx::Error> {
        let query = format!(
            "INSERT INTO deliverables (deal_id, title, kind, due_date, status, owner, brief,
                                       value, guaranteed, sponsor_approval_required, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(deal_id)
            .bind(&input.title)
            .bind(&input.kind)
            .bind(input.due_date)
            .bind(DeliverableStatus::Draft)
            .bind(&input.owner)
            .bind(&input.brief)
            .bind(input.value)
            .bind(input.guaranteed)
            .bind(input.sponsor_approval_required)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Find a deliverable by id, archived or not. Callers are responsible
    /// for scoping (staff: via the owning deal's organization; portal: via
    /// [`DeliverableRepo::find_in_deal`]).
    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deliverables WHERE id = ?");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a deliverable only if it belongs to `deal_id`. The portal uses
    /// this so a deal token can never reach a sibling deal's deliverables.
    pub async fn find_in_deal(
        pool: &SqlitePool,
        deal_id: DbId,
        id: DbId,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM deliverables WHERE id = ? AND deal_id = ?");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .bind(deal_id)
            .fetch_optional(pool)
            .await
    }

    /// List a deal's deliverables ordered by due date.
    pub async fn list_for_deal(
        pool: &SqlitePool,
        deal_id: DbId,
        include_archived: bool,
    ) -> Result<Vec<Deliverable>, sqlx::Error> {
        let filter = if include_archived {
            ""
        } else {
            " AND archived_at IS NULL"
        };
        let query = format!(
            "SELECT {COLUMNS} FROM deliverables WHERE deal_id = ?{filter} ORDER BY due_date ASC"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(deal_id)
            .fetch_all(pool)
            .await
    }

    /// Update a deliverable. Only non-`None` fields are applied. A status
    /// here is a direct reassignment; the approval and cancellation markers
    /// are deliberately untouched.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: DbId,
        input: &UpdateDeliverable,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!(
            "UPDATE deliverables SET
                title = COALESCE(?, title),
                kind = COALESCE(?, kind),
                due_date = COALESCE(?, due_date),
                status = COALESCE(?, status),
                owner = COALESCE(?, owner),
                brief = COALESCE(?, brief),
                value = COALESCE(?, value),
                guaranteed = COALESCE(?, guaranteed),
                sponsor_approval_required = COALESCE(?, sponsor_approval_required)
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(&input.title)
            .bind(&input.kind)
            .bind(input.due_date)
            .bind(input.status)
            .bind(&input.owner)
            .bind(&input.brief)
            .bind(input.value)
            .bind(input.guaranteed)
            .bind(input.sponsor_approval_required)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Set the workflow status only.
    pub async fn set_status(
        conn: &mut SqliteConnection,
        id: DbId,
        status: DeliverableStatus,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!("UPDATE deliverables SET status = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(status)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Stamp the sponsor approval if it has not been stamped yet.
    ///
    /// Returns the row after the attempt. When the approval was already
    /// recorded the guarded update matches nothing and the original stamp is
    /// returned unchanged, making the operation an idempotent no-op.
    pub async fn approve(
        conn: &mut SqliteConnection,
        id: DbId,
        approved_by: &str,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        sqlx::query(
            "UPDATE deliverables SET sponsor_approved_at = ?, sponsor_approved_by = ?
             WHERE id = ? AND sponsor_approved_at IS NULL",
        )
        .bind(chrono::Utc::now())
        .bind(approved_by)
        .bind(id)
        .execute(&mut *conn)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM deliverables WHERE id = ?");
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Cancel a deliverable: stamp `canceled_at`/`canceled_by` once and set
    /// the status to canceled. Re-canceling keeps the first stamp.
    pub async fn cancel(
        conn: &mut SqliteConnection,
        id: DbId,
        canceled_by: &str,
    ) -> Result<Option<Deliverable>, sqlx::Error> {
        let query = format!(
            "UPDATE deliverables SET
                canceled_at = COALESCE(canceled_at, ?),
                canceled_by = COALESCE(canceled_by, ?),
                status = ?
             WHERE id = ?
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Deliverable>(&query)
            .bind(chrono::Utc::now())
            .bind(canceled_by)
            .bind(DeliverableStatus::Canceled)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Clear the cancellation markers on restore. A canceled status falls
    /// back to draft; any other status is left alone. Returns whether the
    /// row actually changed.
    pub async fn clear_cancellation(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE deliverables SET
                canceled_at = NULL,
                canceled_by = NULL,
                status = CASE WHEN status = 'canceled' THEN 'draft' ELSE status END
             WHERE id = ? AND (canceled_at IS NOT NULL OR status = 'canceled')",
        )
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count deliverables that are neither delivered nor canceled. Used by
    /// the deal completion check.
    pub async fn count_unsettled(
        conn: &mut SqliteConnection,
        deal_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM deliverables \
             WHERE deal_id = ? AND status NOT IN ('delivered', 'canceled')",
        )
        .bind(deal_id)
        .fetch_one(conn)
        .await?;
        Ok(count.0)
    }
}
