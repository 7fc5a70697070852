//! Shared query parameter types for API handlers.

use serde::Deserialize;

use sponsorops_core::types::DbId;

/// Query parameters for list endpoints over archivable entities.
///
/// Archived rows are hidden by default; `?include_archived=true` reveals
/// them. Visibility is purely a read-time filter.
#[derive(Debug, Deserialize)]
pub struct IncludeArchivedParams {
    #[serde(default)]
    pub include_archived: bool,
}

/// Query parameters for the activity trail listing.
#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub deal_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query parameter carrying a deal portal token.
#[derive(Debug, Deserialize)]
pub struct DealTokenParams {
    pub deal_token: String,
}

/// Query parameters carrying a sponsor portal token, optionally narrowed by
/// a deal token.
#[derive(Debug, Deserialize)]
pub struct SponsorTokenParams {
    pub sponsor_token: String,
    pub deal_token: Option<String>,
}
