//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope used by list endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result of a lifecycle operation on any archivable entity.
#[derive(Debug, Serialize)]
pub struct LifecycleResponse {
    pub entity_type: &'static str,
    pub id: sponsorops_core::types::DbId,
    /// `archived_at` after the operation (None when active).
    pub archived_at: Option<sponsorops_core::types::Timestamp>,
    /// False when the record was already in the requested state.
    pub changed: bool,
}
