//! Route definitions for the `/orgs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::orgs;
use crate::state::AppState;

/// Routes mounted at `/orgs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orgs::list_orgs).post(orgs::create_org))
        .route("/{id}", get(orgs::get_org).patch(orgs::update_org))
}
