use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sponsorops_core::status::DeliverableStatus;
use sponsorops_core::types::{Date, DbId, Timestamp};

/// A deliverable owed under a deal.
///
/// `sponsor_approved_at`/`sponsor_approved_by` are stamped at most once and
/// survive any later status change. `canceled_at`/`canceled_by` mark
/// terminal abandonment and are distinct from `archived_at` (hidden, not
/// abandoned).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Deliverable {
    pub id: DbId,
    pub deal_id: DbId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: Date,
    pub status: DeliverableStatus,
    pub owner: Option<String>,
    pub brief: Option<String>,
    pub value: Option<f64>,
    pub guaranteed: bool,
    pub sponsor_approval_required: bool,
    pub sponsor_approved_at: Option<Timestamp>,
    pub sponsor_approved_by: Option<String>,
    pub canceled_at: Option<Timestamp>,
    pub canceled_by: Option<String>,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDeliverable {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub due_date: Date,
    pub owner: Option<String>,
    pub brief: Option<String>,
    pub value: Option<f64>,
    #[serde(default)]
    pub guaranteed: bool,
    #[serde(default)]
    pub sponsor_approval_required: bool,
}

/// Patch payload. A `status` here is a direct reassignment; it never touches
/// the approval or cancellation markers.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDeliverable {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub due_date: Option<Date>,
    pub status: Option<DeliverableStatus>,
    pub owner: Option<String>,
    pub brief: Option<String>,
    pub value: Option<f64>,
    pub guaranteed: Option<bool>,
    pub sponsor_approval_required: Option<bool>,
}
