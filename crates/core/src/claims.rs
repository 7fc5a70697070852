//! Guarantee-claim eligibility and decision rules.
//!
//! Claim creation is only reachable through a deal portal token, so the
//! checks here take the already-resolved deal scope. Decisions are a staff
//! operation; the administrative quick-status override bypasses
//! [`validate_decision`] by design (it exists to correct mistakes and
//! re-checks nothing).

use crate::error::CoreError;
use crate::status::ClaimStatus;
use crate::types::DbId;

/// Validate the submission payload for a new claim.
///
/// The deliverable must belong to the deal the token resolved to (a mismatch
/// reads as NotFound so sibling deals cannot be probed), must be guaranteed,
/// and the reason must be non-empty.
pub fn validate_submission(
    deliverable_id: DbId,
    deliverable_deal_id: DbId,
    token_deal_id: DbId,
    guaranteed: bool,
    reason: &str,
) -> Result<(), CoreError> {
    if deliverable_deal_id != token_deal_id {
        return Err(CoreError::NotFound {
            entity: "Deliverable",
            id: deliverable_id,
        });
    }
    if !guaranteed {
        return Err(CoreError::Validation(
            "Deliverable is not guaranteed".into(),
        ));
    }
    if reason.trim().is_empty() {
        return Err(CoreError::Validation("Claim reason is required".into()));
    }
    Ok(())
}

/// A decide operation may only approve or deny a claim.
pub fn validate_decision(status: ClaimStatus) -> Result<(), CoreError> {
    match status {
        ClaimStatus::Approved | ClaimStatus::Denied => Ok(()),
        other => Err(CoreError::Validation(format!(
            "Invalid decision '{other}'. Must be one of: approved, denied",
        ))),
    }
}
