//! Activity-trail constants.
//!
//! Every mutating operation appends exactly one activity event in the same
//! transaction as its write. The action and entity-type vocabularies are
//! fixed here so dashboards and tests never match on ad-hoc strings.

/// Known action names for activity events.
pub mod actions {
    pub const CREATED: &str = "created";
    pub const UPDATED: &str = "updated";
    pub const ARCHIVED: &str = "archived";
    pub const RESTORED: &str = "restored";
    pub const CANCELED: &str = "canceled";
    pub const COMMENTED: &str = "commented";
    pub const APPROVED: &str = "approved";
    pub const DECIDED: &str = "decided";
    pub const REPLIED: &str = "replied";
}

/// Known entity-type names for activity events.
pub mod entity_types {
    pub const ORGANIZATION: &str = "organization";
    pub const SPONSOR: &str = "sponsor";
    pub const DEAL: &str = "deal";
    pub const DELIVERABLE: &str = "deliverable";
    pub const PROOF: &str = "proof";
    pub const BRANDKIT: &str = "brandkit";
    pub const TICKET: &str = "ticket";
    pub const CLAIM: &str = "claim";
}
