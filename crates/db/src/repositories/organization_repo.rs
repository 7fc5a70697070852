//! Repository for the `organizations` table.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::types::DbId;

use crate::models::organization::Organization;

const COLUMNS: &str = "id, name, created_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        name: &str,
    ) -> Result<Organization, sqlx::Error> {
        let query = format!(
            "INSERT INTO organizations (name, created_at) VALUES (?, ?) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Organization>(&query)
            .bind(name)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// The oldest organization, if any. Used by the admin bootstrap.
    pub async fn first(pool: &SqlitePool) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations ORDER BY id ASC LIMIT 1");
        sqlx::query_as::<_, Organization>(&query)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &SqlitePool,
        id: DbId,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = ?");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn rename(
        conn: &mut SqliteConnection,
        id: DbId,
        name: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("UPDATE organizations SET name = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, Organization>(&query)
            .bind(name)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
