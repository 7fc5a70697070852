//! Brand kit models.
//!
//! The list fields (hashtags, tags, do/dont, assets) are stored as JSON TEXT
//! columns and decoded into vectors at the repository boundary. Updates are
//! whole-object replacements; there is no partial merge.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sponsorops_core::error::CoreError;
use sponsorops_core::types::{DbId, Timestamp};

/// Raw row as stored.
#[derive(Debug, Clone, FromRow)]
pub struct BrandKitRow {
    pub id: DbId,
    pub deal_id: DbId,
    pub guidelines_md: String,
    pub hashtags_json: String,
    pub required_tags_json: String,
    pub do_json: String,
    pub dont_json: String,
    pub assets_json: String,
    pub updated_at: Timestamp,
}

/// A named asset link (logo pack, font bundle, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandKitAsset {
    pub name: String,
    pub url: String,
}

/// Decoded brand kit as exposed over the API.
#[derive(Debug, Clone, Serialize)]
pub struct BrandKit {
    pub id: DbId,
    pub deal_id: DbId,
    pub guidelines_md: String,
    pub hashtags: Vec<String>,
    pub required_tags: Vec<String>,
    pub r#do: Vec<String>,
    pub dont: Vec<String>,
    pub assets: Vec<BrandKitAsset>,
    pub updated_at: Timestamp,
}

/// Whole-object replacement payload.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBrandKit {
    #[serde(default)]
    pub guidelines_md: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub required_tags: Vec<String>,
    #[serde(default)]
    pub r#do: Vec<String>,
    #[serde(default)]
    pub dont: Vec<String>,
    #[serde(default)]
    pub assets: Vec<BrandKitAsset>,
}

impl TryFrom<BrandKitRow> for BrandKit {
    type Error = CoreError;

    fn try_from(row: BrandKitRow) -> Result<Self, Self::Error> {
        let decode_strings = |field: &str, json: &str| -> Result<Vec<String>, CoreError> {
            serde_json::from_str(json).map_err(|e| {
                CoreError::Internal(format!("Corrupt brand kit column {field}: {e}"))
            })
        };
        let assets: Vec<BrandKitAsset> = serde_json::from_str(&row.assets_json)
            .map_err(|e| CoreError::Internal(format!("Corrupt brand kit column assets: {e}")))?;

        Ok(BrandKit {
            id: row.id,
            deal_id: row.deal_id,
            guidelines_md: row.guidelines_md,
            hashtags: decode_strings("hashtags", &row.hashtags_json)?,
            required_tags: decode_strings("required_tags", &row.required_tags_json)?,
            r#do: decode_strings("do", &row.do_json)?,
            dont: decode_strings("dont", &row.dont_json)?,
            assets,
            updated_at: row.updated_at,
        })
    }
}
