//! Repository for the `activity_events` table.
//!
//! Strictly append-and-read: there is no update or delete method, and none
//! should ever be added. Every mutating handler appends exactly one event on
//! the same transaction as its write, so a failed append fails the whole
//! operation.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::types::DbId;

use crate::models::activity::{ActivityEvent, NewActivityEvent};

const COLUMNS: &str = "id, organization_id, deal_id, entity_type, entity_id, action, actor, \
    summary, created_at";

/// Default page size for activity listings.
const DEFAULT_LIMIT: i64 = 100;
/// Hard cap on activity page size.
const MAX_LIMIT: i64 = 500;

/// Clamp a requested limit into `1..=MAX_LIMIT`.
fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Clamp a requested offset to be non-negative.
fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Provides append and read operations for the activity trail.
pub struct ActivityRepo;

impl ActivityRepo {
    pub async fn append(
        conn: &mut SqliteConnection,
        event: &NewActivityEvent,
    ) -> Result<ActivityEvent, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_events (organization_id, deal_id, entity_type, entity_id,
                                          action, actor, summary, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityEvent>(&query)
            .bind(event.organization_id)
            .bind(event.deal_id)
            .bind(event.entity_type)
            .bind(event.entity_id)
            .bind(event.action)
            .bind(&event.actor)
            .bind(&event.summary)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Reverse-chronological page of an organization's events, optionally
    /// narrowed to one deal. Ties on `created_at` break by id so pagination
    /// is stable within a transaction's burst of events.
    pub async fn list(
        pool: &SqlitePool,
        organization_id: DbId,
        deal_id: Option<DbId>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<ActivityEvent>, sqlx::Error> {
        let deal_filter = if deal_id.is_some() {
            " AND deal_id = ?"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM activity_events WHERE organization_id = ?{deal_filter} \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        );

        let mut q = sqlx::query_as::<_, ActivityEvent>(&query).bind(organization_id);
        if let Some(deal_id) = deal_id {
            q = q.bind(deal_id);
        }
        q.bind(clamp_limit(limit))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), 100);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(-5)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(10_000)), 500);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-1)), 0);
        assert_eq!(clamp_offset(Some(25)), 25);
    }
}
