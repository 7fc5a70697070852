use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use sponsorops_core::status::DealStatus;
use sponsorops_core::types::{Date, DbId, Timestamp};

/// A sponsorship deal. Owns deliverables, a brand kit, deal-scoped tickets,
/// and guarantee claims. `portal_token` is assigned at insert and never
/// changes; `guarantee_cap_pct` and `cure_days` are contractual figures and
/// informational to the workflow engine.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deal {
    pub id: DbId,
    pub organization_id: DbId,
    pub sponsor_id: DbId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub total_value: Option<f64>,
    pub status: DealStatus,
    pub guarantee_cap_pct: f64,
    pub cure_days: i64,
    pub portal_token: String,
    pub completed_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDeal {
    pub sponsor_id: DbId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub total_value: Option<f64>,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub guarantee_cap_pct: f64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub cure_days: i64,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDeal {
    pub name: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub total_value: Option<f64>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub guarantee_cap_pct: Option<f64>,
    #[validate(range(min = 0))]
    pub cure_days: Option<i64>,
    pub status: Option<DealStatus>,
}

/// Summary projection exposed to the sponsor portal (no portal token of
/// sibling deals, no internal bookkeeping).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DealSummary {
    pub id: DbId,
    pub name: String,
    pub start_date: Date,
    pub end_date: Date,
    pub status: DealStatus,
    pub archived_at: Option<Timestamp>,
}
