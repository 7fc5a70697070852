//! Handler for the `/activity` resource.

use axum::extract::{Query, State};
use axum::Json;

use sponsorops_db::models::activity::ActivityEvent;
use sponsorops_db::repositories::ActivityRepo;

use crate::auth::staff::Staff;
use crate::error::AppResult;
use crate::query::ActivityParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/activity
///
/// Reverse-chronological page of the caller's organization trail, optionally
/// narrowed to one deal. Limit is clamped to 1..=500 in the repository.
pub async fn list_activity(
    State(state): State<AppState>,
    Staff(principal): Staff,
    Query(params): Query<ActivityParams>,
) -> AppResult<Json<DataResponse<Vec<ActivityEvent>>>> {
    let org_id = principal.require_staff()?;
    let events = ActivityRepo::list(
        &state.pool,
        org_id,
        params.deal_id,
        params.limit,
        params.offset,
    )
    .await?;
    Ok(Json(DataResponse { data: events }))
}
