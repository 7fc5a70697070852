//! Resolved request principals.
//!
//! Every request is authorized exactly once at the boundary, producing a
//! [`Principal`] that the handler threads into business logic. Staff
//! requests carry an explicit organization scope; portal requests carry the
//! single sponsor or deal their opaque token resolved to. Handlers declare
//! which kinds they accept by calling the matching `require_*` accessor and
//! propagating its error.

use crate::error::CoreError;
use crate::types::DbId;

/// The authority behind a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// An authenticated staff member, scoped to one organization.
    OrgStaff {
        user_id: DbId,
        organization_id: DbId,
        /// Actor label recorded in activity events (the staff email).
        actor: String,
    },
    /// A sponsor portal token: read access to the sponsor's deals plus
    /// organization-level ticket creation.
    SponsorPortal {
        sponsor_id: DbId,
        organization_id: DbId,
    },
    /// A deal portal token: read/write access to one deal's subgraph and
    /// nothing else, not even sibling deals of the same sponsor.
    DealPortal {
        deal_id: DbId,
        sponsor_id: DbId,
        organization_id: DbId,
    },
}

impl Principal {
    /// The organization every principal kind is ultimately scoped to.
    pub fn organization_id(&self) -> DbId {
        match self {
            Principal::OrgStaff {
                organization_id, ..
            }
            | Principal::SponsorPortal {
                organization_id, ..
            }
            | Principal::DealPortal {
                organization_id, ..
            } => *organization_id,
        }
    }

    /// Actor label for activity events.
    pub fn actor(&self) -> &str {
        match self {
            Principal::OrgStaff { actor, .. } => actor,
            Principal::SponsorPortal { .. } | Principal::DealPortal { .. } => "sponsor",
        }
    }

    /// Accept only staff principals, yielding the explicit org scope.
    pub fn require_staff(&self) -> Result<DbId, CoreError> {
        match self {
            Principal::OrgStaff {
                organization_id, ..
            } => Ok(*organization_id),
            _ => Err(CoreError::Unauthorized(
                "Staff credentials required".into(),
            )),
        }
    }

    /// Accept only a deal portal principal for the given deal.
    ///
    /// A token for a different deal reads as NotFound, never as a
    /// permission error, so callers cannot probe for sibling deals.
    pub fn require_deal(&self, deal_id: DbId) -> Result<(), CoreError> {
        match self {
            Principal::DealPortal {
                deal_id: scoped, ..
            } if *scoped == deal_id => Ok(()),
            Principal::DealPortal { .. } => Err(CoreError::NotFound {
                entity: "Deal",
                id: deal_id,
            }),
            _ => Err(CoreError::Unauthorized("Deal token required".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn staff() -> Principal {
        Principal::OrgStaff {
            user_id: 1,
            organization_id: 7,
            actor: "ops@example.com".into(),
        }
    }

    fn deal_portal(deal_id: DbId) -> Principal {
        Principal::DealPortal {
            deal_id,
            sponsor_id: 3,
            organization_id: 7,
        }
    }

    #[test]
    fn staff_scope_is_explicit() {
        assert_eq!(staff().require_staff().unwrap(), 7);
    }

    #[test]
    fn portal_principal_is_not_staff() {
        let err = deal_portal(5).require_staff().unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
    }

    #[test]
    fn deal_token_matches_only_its_own_deal() {
        assert!(deal_portal(5).require_deal(5).is_ok());
        // A sibling deal id must read as missing, not forbidden.
        let err = deal_portal(5).require_deal(6).unwrap_err();
        assert!(matches!(err, CoreError::NotFound { entity: "Deal", id: 6 }));
    }

    #[test]
    fn portal_actor_label() {
        assert_eq!(deal_portal(5).actor(), "sponsor");
        assert_eq!(staff().actor(), "ops@example.com");
    }
}
