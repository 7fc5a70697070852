use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sponsorops_core::status::ProofKind;
use sponsorops_core::types::{DbId, Timestamp};

/// Proof of delivery. Immutable once created. File proofs reference the
/// external blob store by path; this core never reads the bytes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Proof {
    pub id: DbId,
    pub deliverable_id: DbId,
    pub kind: ProofKind,
    pub url: Option<String>,
    pub note: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProof {
    pub kind: ProofKind,
    pub url: Option<String>,
    pub note: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub mime_type: Option<String>,
}
