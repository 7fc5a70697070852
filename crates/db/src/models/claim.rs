use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sponsorops_core::status::{ClaimStatus, PayoutType};
use sponsorops_core::types::{DbId, Timestamp};

/// A guarantee claim against a guaranteed deliverable.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Claim {
    pub id: DbId,
    pub organization_id: DbId,
    pub deal_id: DbId,
    pub deliverable_id: DbId,
    pub reason: String,
    pub description: Option<String>,
    pub status: ClaimStatus,
    pub payout_type: Option<PayoutType>,
    pub payout_amount: Option<f64>,
    pub notes: Option<String>,
    pub archived_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Portal submission payload (the deal is resolved from the token).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClaim {
    pub deliverable_id: DbId,
    pub reason: String,
    pub description: Option<String>,
}

/// Staff decision: status + payout bookkeeping in one atomic update.
#[derive(Debug, Clone, Deserialize)]
pub struct DecideClaim {
    pub status: ClaimStatus,
    pub payout_type: Option<PayoutType>,
    pub payout_amount: Option<f64>,
    pub notes: Option<String>,
}

/// Administrative override patch. May set any status directly and performs
/// no eligibility re-check.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClaim {
    pub status: Option<ClaimStatus>,
    pub payout_type: Option<PayoutType>,
    pub payout_amount: Option<f64>,
    pub notes: Option<String>,
}
