//! Repository for the `proofs` table. Proofs are immutable: insert and read
//! only.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::types::DbId;

use crate::models::proof::{CreateProof, Proof};

const COLUMNS: &str =
    "id, deliverable_id, kind, url, note, file_path, file_name, mime_type, created_at";

/// Provides append and read operations for proofs of delivery.
pub struct ProofRepo;

impl ProofRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        deliverable_id: DbId,
        input: &CreateProof,
    ) -> Result<Proof, sqlx::Error> {
        let query = format!(
            "INSERT INTO proofs (deliverable_id, kind, url, note, file_path, file_name,
                                 mime_type, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Proof>(&query)
            .bind(deliverable_id)
            .bind(input.kind)
            .bind(&input.url)
            .bind(&input.note)
            .bind(&input.file_path)
            .bind(&input.file_name)
            .bind(&input.mime_type)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// List proofs for one deliverable, newest first.
    pub async fn list_for_deliverable(
        pool: &SqlitePool,
        deliverable_id: DbId,
    ) -> Result<Vec<Proof>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM proofs WHERE deliverable_id = ? ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Proof>(&query)
            .bind(deliverable_id)
            .fetch_all(pool)
            .await
    }

    /// List every proof under a deal (portal subgraph view).
    pub async fn list_for_deal(pool: &SqlitePool, deal_id: DbId) -> Result<Vec<Proof>, sqlx::Error> {
        sqlx::query_as::<_, Proof>(
            "SELECT p.id, p.deliverable_id, p.kind, p.url, p.note, p.file_path, p.file_name, \
                    p.mime_type, p.created_at \
             FROM proofs p \
             JOIN deliverables d ON d.id = p.deliverable_id \
             WHERE d.deal_id = ? \
             ORDER BY p.created_at DESC",
        )
        .bind(deal_id)
        .fetch_all(pool)
        .await
    }
}
