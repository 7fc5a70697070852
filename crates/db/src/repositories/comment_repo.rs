//! Repository for the `deliverable_comments` table. Comments are immutable:
//! insert and read only.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::types::DbId;

use crate::models::comment::Comment;

const COLUMNS: &str = "id, deliverable_id, author, body, created_at";

/// Provides append and read operations for deliverable comments.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        deliverable_id: DbId,
        author: &str,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO deliverable_comments (deliverable_id, author, body, created_at)
             VALUES (?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(deliverable_id)
            .bind(author)
            .bind(body)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// List comments for one deliverable, oldest first (thread order).
    pub async fn list_for_deliverable(
        pool: &SqlitePool,
        deliverable_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM deliverable_comments WHERE deliverable_id = ? \
             ORDER BY created_at ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(deliverable_id)
            .fetch_all(pool)
            .await
    }

    /// List every comment under a deal (portal subgraph view), thread order.
    pub async fn list_for_deal(
        pool: &SqlitePool,
        deal_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            "SELECT c.id, c.deliverable_id, c.author, c.body, c.created_at \
             FROM deliverable_comments c \
             JOIN deliverables d ON d.id = c.deliverable_id \
             WHERE d.deal_id = ? \
             ORDER BY c.created_at ASC",
        )
        .bind(deal_id)
        .fetch_all(pool)
        .await
    }
}
