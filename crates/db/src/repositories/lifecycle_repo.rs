//! Cross-table archive/restore operations.
//!
//! Soft-delete is one capability shared by five entity kinds, so the state
//! check and the guarded UPDATE are implemented once here instead of per
//! table. Entity-specific side effects of a lifecycle change (a deal's
//! status flip, a deliverable's cancellation cleanup) stay in the owning
//! handlers; this repository only moves `archived_at`.

use sqlx::{FromRow, SqliteConnection};

use sponsorops_core::lifecycle::{self, LifecycleOp};
use sponsorops_core::types::{DbId, Timestamp};

/// The entity kinds that support archive/restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivableKind {
    Sponsor,
    Deal,
    Deliverable,
    Ticket,
    Claim,
}

impl ArchivableKind {
    fn table(&self) -> &'static str {
        match self {
            ArchivableKind::Sponsor => "sponsors",
            ArchivableKind::Deal => "deals",
            ArchivableKind::Deliverable => "deliverables",
            ArchivableKind::Ticket => "tickets",
            ArchivableKind::Claim => "claims",
        }
    }

    /// Entity-type name used in activity events and NotFound errors.
    pub fn entity_type(&self) -> &'static str {
        match self {
            ArchivableKind::Sponsor => "sponsor",
            ArchivableKind::Deal => "deal",
            ArchivableKind::Deliverable => "deliverable",
            ArchivableKind::Ticket => "ticket",
            ArchivableKind::Claim => "claim",
        }
    }

    /// Human-readable label in error messages and activity summaries.
    pub fn display_name(&self) -> &'static str {
        match self {
            ArchivableKind::Sponsor => "Sponsor",
            ArchivableKind::Deal => "Deal",
            ArchivableKind::Deliverable => "Deliverable",
            ArchivableKind::Ticket => "Ticket",
            ArchivableKind::Claim => "Claim",
        }
    }

    /// SELECT yielding (organization_id, deal_id, archived_at, label) for
    /// one row of this kind. Deliverables resolve their organization through
    /// the owning deal; everything else carries it directly.
    fn scope_sql(&self) -> String {
        match self {
            ArchivableKind::Sponsor => "SELECT organization_id, NULL AS deal_id, archived_at, \
                 name AS label FROM sponsors WHERE id = ?"
                .to_string(),
            ArchivableKind::Deal => "SELECT organization_id, id AS deal_id, archived_at, \
                 name AS label FROM deals WHERE id = ?"
                .to_string(),
            ArchivableKind::Deliverable => "SELECT d.organization_id, dl.deal_id, dl.archived_at, \
                 dl.title AS label \
                 FROM deliverables dl JOIN deals d ON d.id = dl.deal_id WHERE dl.id = ?"
                .to_string(),
            ArchivableKind::Ticket => "SELECT organization_id, deal_id, archived_at, \
                 subject AS label FROM tickets WHERE id = ?"
                .to_string(),
            ArchivableKind::Claim => "SELECT organization_id, deal_id, archived_at, \
                 reason AS label FROM claims WHERE id = ?"
                .to_string(),
        }
    }
}

/// Ownership and lifecycle state of one archivable row.
#[derive(Debug, Clone, FromRow)]
pub struct EntityScope {
    pub organization_id: DbId,
    pub deal_id: Option<DbId>,
    pub archived_at: Option<Timestamp>,
    pub label: String,
}

/// Outcome of a lifecycle operation.
#[derive(Debug, Clone)]
pub struct LifecycleOutcome {
    pub scope: EntityScope,
    /// `archived_at` after the operation.
    pub archived_at: Option<Timestamp>,
    /// False when the record was already in the target state (no-op).
    pub changed: bool,
}

/// Applies archive/restore transitions for every archivable entity kind.
pub struct LifecycleRepo;

impl LifecycleRepo {
    /// Fetch ownership and lifecycle state for a row, or `None` if the id
    /// does not exist.
    pub async fn scope(
        conn: &mut SqliteConnection,
        kind: ArchivableKind,
        id: DbId,
    ) -> Result<Option<EntityScope>, sqlx::Error> {
        sqlx::query_as::<_, EntityScope>(&kind.scope_sql())
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Apply `op` to the row. Returns `None` if the id does not exist.
    ///
    /// Both operations succeed when the row is already in the target state;
    /// in that case nothing is written and `archived_at` keeps its original
    /// value (idempotent state and timestamp).
    pub async fn apply(
        conn: &mut SqliteConnection,
        kind: ArchivableKind,
        id: DbId,
        op: LifecycleOp,
    ) -> Result<Option<LifecycleOutcome>, sqlx::Error> {
        let scope = match Self::scope(conn, kind, id).await? {
            Some(scope) => scope,
            None => return Ok(None),
        };

        let transition = lifecycle::apply(op, scope.archived_at, chrono::Utc::now());
        if transition.changed {
            let sql = format!("UPDATE {} SET archived_at = ? WHERE id = ?", kind.table());
            sqlx::query(&sql)
                .bind(transition.archived_at)
                .bind(id)
                .execute(conn)
                .await?;
        }

        Ok(Some(LifecycleOutcome {
            scope,
            archived_at: transition.archived_at,
            changed: transition.changed,
        }))
    }
}
