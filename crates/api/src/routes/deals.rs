//! Route definitions for the `/deals` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::deals;
use crate::state::AppState;

/// Routes mounted at `/deals`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(deals::list_deals).post(deals::create_deal))
        .route("/{id}", get(deals::get_deal).patch(deals::update_deal))
        .route("/{id}/archive", post(deals::archive_deal))
        .route("/{id}/restore", post(deals::restore_deal))
        .route(
            "/{id}/deliverables",
            get(deals::list_deliverables).post(deals::create_deliverable),
        )
        .route(
            "/{id}/brandkit",
            get(deals::get_brandkit).put(deals::update_brandkit),
        )
        .route("/{id}/claims", get(deals::list_deal_claims))
}
