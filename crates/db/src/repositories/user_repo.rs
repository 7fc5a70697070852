//! Repository for the `users` table (staff accounts).

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str = "id, organization_id, email, password_hash, role, created_at";

/// Provides lookup and insert operations for staff users.
pub struct UserRepo;

impl UserRepo {
    pub async fn create(
        conn: &mut SqliteConnection,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (organization_id, email, password_hash, role, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(input.organization_id)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_email(
        pool: &SqlitePool,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = ?");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
