//! Repository for the `brand_kits` table.
//!
//! One kit per deal, created lazily on first read. Updates replace the whole
//! object; there is no partial merge.

use sqlx::{SqliteConnection, SqlitePool};

use sponsorops_core::types::DbId;

use crate::models::brand_kit::{BrandKitRow, UpdateBrandKit};

const COLUMNS: &str = "id, deal_id, guidelines_md, hashtags_json, required_tags_json, \
    do_json, dont_json, assets_json, updated_at";

/// Provides read and whole-object-replace operations for brand kits.
pub struct BrandKitRepo;

impl BrandKitRepo {
    pub async fn find_by_deal(
        pool: &SqlitePool,
        deal_id: DbId,
    ) -> Result<Option<BrandKitRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brand_kits WHERE deal_id = ?");
        sqlx::query_as::<_, BrandKitRow>(&query)
            .bind(deal_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the deal's kit, inserting an empty one if none exists yet.
    pub async fn get_or_create(
        conn: &mut SqliteConnection,
        deal_id: DbId,
    ) -> Result<BrandKitRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO brand_kits (deal_id, updated_at) VALUES (?, ?)
             ON CONFLICT(deal_id) DO UPDATE SET deal_id = deal_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BrandKitRow>(&query)
            .bind(deal_id)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Replace the deal's kit with `input`, creating the row if needed.
    pub async fn replace(
        conn: &mut SqliteConnection,
        deal_id: DbId,
        input: &UpdateBrandKit,
    ) -> Result<BrandKitRow, sqlx::Error> {
        let hashtags = to_json(&input.hashtags)?;
        let required_tags = to_json(&input.required_tags)?;
        let do_list = to_json(&input.r#do)?;
        let dont_list = to_json(&input.dont)?;
        let assets = to_json(&input.assets)?;

        let query = format!(
            "INSERT INTO brand_kits (deal_id, guidelines_md, hashtags_json,
                                     required_tags_json, do_json, dont_json, assets_json,
                                     updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(deal_id) DO UPDATE SET
                guidelines_md = excluded.guidelines_md,
                hashtags_json = excluded.hashtags_json,
                required_tags_json = excluded.required_tags_json,
                do_json = excluded.do_json,
                dont_json = excluded.dont_json,
                assets_json = excluded.assets_json,
                updated_at = excluded.updated_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BrandKitRow>(&query)
            .bind(deal_id)
            .bind(&input.guidelines_md)
            .bind(hashtags)
            .bind(required_tags)
            .bind(do_list)
            .bind(dont_list)
            .bind(assets)
            .bind(chrono::Utc::now())
            .fetch_one(conn)
            .await
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, sqlx::Error> {
    serde_json::to_string(value).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}
